use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    api::models::{
        AccountResponse, BalanceResponse, DetailResponse, ErrorResponse, ExchangeTokenRequest, GoogleLoginRequest,
        LinkTokenResponse, LoginRequest, MessageResponse, RefreshRequest, UpdatePasswordRequest, UserPublic,
    },
    core::{
        models::{
            analytics::{
                BudgetCategoryStat, BudgetOverview, CategoryStat, ComparisonWindow, IncomeExpenseComparison,
                LineChartResponse, LinePoint, MonthComparison, PaymentStat, PieChartResponse, SummaryResponse, Timeframe,
                TotalSpent,
            },
            bank::{BankAccount, BankTransaction},
            budget::{Budget, BudgetInput, BudgetUpdate},
            category::{Category, CategoryInput, CategoryUpdate},
            payment_method::{PaymentMethod, PaymentMethodInput, PaymentMethodUpdate},
            refresh_token::TokenResponse,
            transaction::{PaginatedTransactions, Transaction, TransactionInput, TransactionSource, TransactionType},
            user::Registration,
        },
        services::{
            bank::{ConnectionResponse, SyncResponse},
            tips::TipsResponse,
        },
    },
};

/// Registers the bearer scheme referenced by `security(("Bearer" = []))`.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::root::welcome,
        super::handlers::auth::register,
        super::handlers::auth::login,
        super::handlers::auth::google_login,
        super::handlers::auth::refresh,
        super::handlers::auth::logout,
        super::handlers::auth::logout_all,
        super::handlers::account::me,
        super::handlers::account::delete_account,
        super::handlers::account::update_password,
        super::handlers::account::balance,
        super::handlers::transactions::create_transaction,
        super::handlers::transactions::list_transactions,
        super::handlers::transactions::get_transaction,
        super::handlers::transactions::update_transaction,
        super::handlers::transactions::delete_transaction,
        super::handlers::categories::list_categories,
        super::handlers::categories::create_category,
        super::handlers::categories::get_category,
        super::handlers::categories::update_category,
        super::handlers::categories::delete_category,
        super::handlers::payment_methods::list_payment_methods,
        super::handlers::payment_methods::create_payment_method,
        super::handlers::payment_methods::get_payment_method,
        super::handlers::payment_methods::update_payment_method,
        super::handlers::payment_methods::delete_payment_method,
        super::handlers::budgets::create_budget,
        super::handlers::budgets::list_budgets,
        super::handlers::budgets::update_budget,
        super::handlers::budgets::delete_budget,
        super::handlers::analytics::summary,
        super::handlers::analytics::pie_chart,
        super::handlers::analytics::line_chart,
        super::handlers::analytics::compare_months,
        super::handlers::analytics::budget_analysis,
        super::handlers::analytics::compare_types,
        super::handlers::ai::tips,
        super::handlers::plaid::create_link_token,
        super::handlers::plaid::exchange_public_token,
        super::handlers::plaid::sync_accounts,
        super::handlers::plaid::import_transactions,
        super::handlers::plaid::sync_latest,
        super::handlers::plaid::delete_connection
    ),
    components(schemas(
        Registration,
        LoginRequest,
        GoogleLoginRequest,
        RefreshRequest,
        UpdatePasswordRequest,
        ExchangeTokenRequest,
        TokenResponse,
        UserPublic,
        AccountResponse,
        BalanceResponse,
        MessageResponse,
        DetailResponse,
        ErrorResponse,
        LinkTokenResponse,
        Transaction,
        TransactionInput,
        TransactionType,
        TransactionSource,
        PaginatedTransactions,
        Category,
        CategoryInput,
        CategoryUpdate,
        PaymentMethod,
        PaymentMethodInput,
        PaymentMethodUpdate,
        Budget,
        BudgetInput,
        BudgetUpdate,
        Timeframe,
        ComparisonWindow,
        TotalSpent,
        CategoryStat,
        PaymentStat,
        SummaryResponse,
        PieChartResponse,
        LinePoint,
        LineChartResponse,
        MonthComparison,
        BudgetCategoryStat,
        BudgetOverview,
        IncomeExpenseComparison,
        TipsResponse,
        BankAccount,
        BankTransaction,
        ConnectionResponse,
        SyncResponse
    )),
    modifiers(&BearerAuth),
    info(
        title = "Expense Tracker API",
        description = "Personal finance backend: transactions, budgets, analytics and bank sync",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_protected_and_public_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/auth/login"));
        assert!(paths.contains_key("/transactions/{transaction_id}"));
        assert!(paths.contains_key("/analytics/transactions/compare-types"));
        assert!(paths.contains_key("/plaid/connection/{connection_id}"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("Bearer"));
    }
}
