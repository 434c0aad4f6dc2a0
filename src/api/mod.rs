use crate::core::services::FinanceService;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;

pub type SharedService = Arc<FinanceService<InMemoryStorage>>;

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    use handlers::*;

    let protected_routes = Router::new()
        .route("/auth/logout-all", post(auth::logout_all))
        .route("/account/me", get(account::me))
        .route("/account/delete", delete(account::delete_account))
        .route("/account/update-password", put(account::update_password))
        .route("/account/balance", get(account::balance))
        .route("/transactions", post(transactions::create_transaction))
        .route("/transactions/all", get(transactions::list_transactions))
        .route(
            "/transactions/{transaction_id}",
            get(transactions::get_transaction)
                .put(transactions::update_transaction)
                .delete(transactions::delete_transaction),
        )
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{category_id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/payment-methods",
            get(payment_methods::list_payment_methods).post(payment_methods::create_payment_method),
        )
        .route(
            "/payment-methods/{method_id}",
            get(payment_methods::get_payment_method)
                .put(payment_methods::update_payment_method)
                .delete(payment_methods::delete_payment_method),
        )
        .route("/budgets", get(budgets::list_budgets).post(budgets::create_budget))
        .route(
            "/budgets/{category}",
            put(budgets::update_budget).delete(budgets::delete_budget),
        )
        .route("/analytics/transactions/summary", get(analytics::summary))
        .route("/analytics/transactions/pie", get(analytics::pie_chart))
        .route("/analytics/transactions/line", get(analytics::line_chart))
        .route("/analytics/transactions/compare", get(analytics::compare_months))
        .route("/analytics/transactions/budget-analysis", get(analytics::budget_analysis))
        .route("/analytics/transactions/compare-types", get(analytics::compare_types))
        .route("/ai/tips", get(ai::tips))
        .route("/plaid/link-token", post(plaid::create_link_token))
        .route("/plaid/exchange-public-token", post(plaid::exchange_public_token))
        .route("/plaid/accounts", get(plaid::sync_accounts))
        .route("/plaid/transactions", get(plaid::import_transactions))
        .route("/plaid/transactions/sync-latest", get(plaid::sync_latest))
        .route("/plaid/connection/{connection_id}", delete(plaid::delete_connection))
        .route_layer(axum::middleware::from_fn_with_state(
            service.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/", get(root::welcome)) // Unprotected
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/google", post(auth::google_login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .merge(protected_routes)
        .with_state(service)
}
