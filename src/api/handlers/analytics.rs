//! Reports over the unified manual and bank ledger. Every handler reads the
//! clock once and hands it to the service.

use crate::api::SharedService;
use crate::api::extract::ApiQuery;
use crate::api::models::{ApiError, ErrorResponse, LineChartQuery, TimeframeQuery, TransactionTypeQuery};
use crate::core::models::analytics::{
    BudgetOverview, IncomeExpenseComparison, LineChartResponse, MonthComparison, PieChartResponse, SummaryResponse,
};
use crate::core::models::user::User;
use axum::{Extension, Json, extract::State};
use chrono::Utc;

#[utoipa::path(
    get,
    path = "/analytics/transactions/summary",
    params(TransactionTypeQuery),
    responses(
        (status = 200, description = "Totals, top categories and payment methods", body = SummaryResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn summary(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<TransactionTypeQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = service.summary(&user.id, query.transaction_type, Utc::now()).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/analytics/transactions/pie",
    params(TransactionTypeQuery),
    responses(
        (status = 200, description = "Current month by category", body = PieChartResponse),
        (status = 404, description = "No transactions found for this month", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn pie_chart(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<TransactionTypeQuery>,
) -> Result<Json<PieChartResponse>, ApiError> {
    let pie = service.pie_chart(&user.id, query.transaction_type, Utc::now()).await?;
    Ok(Json(pie))
}

#[utoipa::path(
    get,
    path = "/analytics/transactions/line",
    params(LineChartQuery),
    responses(
        (status = 200, description = "Daily totals over the timeframe", body = LineChartResponse),
        (status = 404, description = "No transactions in the window", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn line_chart(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<LineChartQuery>,
) -> Result<Json<LineChartResponse>, ApiError> {
    let line = service
        .line_chart(&user.id, query.transaction_type, query.timeframe, Utc::now())
        .await?;
    Ok(Json(line))
}

#[utoipa::path(
    get,
    path = "/analytics/transactions/compare",
    params(TransactionTypeQuery),
    responses(
        (status = 200, description = "Previous against current month", body = MonthComparison)
    ),
    security(("Bearer" = []))
)]
pub async fn compare_months(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<TransactionTypeQuery>,
) -> Result<Json<MonthComparison>, ApiError> {
    let comparison = service
        .compare_months(&user.id, query.transaction_type, Utc::now())
        .await?;
    Ok(Json(comparison))
}

#[utoipa::path(
    get,
    path = "/analytics/transactions/budget-analysis",
    responses(
        (status = 200, description = "Current-month spending per budget", body = BudgetOverview),
        (status = 404, description = "No budgets found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn budget_analysis(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<BudgetOverview>, ApiError> {
    Ok(Json(service.budget_analysis(&user.id, Utc::now()).await?))
}

#[utoipa::path(
    get,
    path = "/analytics/transactions/compare-types",
    params(TimeframeQuery),
    responses(
        (status = 200, description = "Income against expenses", body = IncomeExpenseComparison),
        (status = 404, description = "No transactions in the window", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn compare_types(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<TimeframeQuery>,
) -> Result<Json<IncomeExpenseComparison>, ApiError> {
    let comparison = service.compare_types(&user.id, query.timeframe, Utc::now()).await?;
    Ok(Json(comparison))
}
