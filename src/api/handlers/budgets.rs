use crate::api::SharedService;
use crate::api::extract::ApiJson;
use crate::api::models::{ApiError, ErrorResponse};
use crate::core::models::budget::{Budget, BudgetInput, BudgetUpdate};
use crate::core::models::user::User;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    post,
    path = "/budgets",
    request_body = BudgetInput,
    responses(
        (status = 201, description = "Budget created", body = Budget),
        (status = 409, description = "Budget for this category already exists", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn create_budget(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiJson(req): ApiJson<BudgetInput>,
) -> Result<(StatusCode, Json<Budget>), ApiError> {
    let budget = service.create_budget(&user.id, req).await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

#[utoipa::path(
    get,
    path = "/budgets",
    responses(
        (status = 200, description = "Budgets of the user", body = Vec<Budget>)
    ),
    security(("Bearer" = []))
)]
pub async fn list_budgets(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Budget>>, ApiError> {
    Ok(Json(service.list_budgets(&user.id).await?))
}

#[utoipa::path(
    put,
    path = "/budgets/{category}",
    request_body = BudgetUpdate,
    params(
        ("category" = String, Path, description = "Category the budget applies to")
    ),
    responses(
        (status = 200, description = "Budget updated", body = Budget),
        (status = 404, description = "Budget not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_budget(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(category): Path<String>,
    ApiJson(req): ApiJson<BudgetUpdate>,
) -> Result<Json<Budget>, ApiError> {
    let budget = service.update_budget(&user.id, &category, req.limit).await?;
    Ok(Json(budget))
}

#[utoipa::path(
    delete,
    path = "/budgets/{category}",
    params(
        ("category" = String, Path, description = "Category the budget applies to")
    ),
    responses(
        (status = 204, description = "Budget deleted"),
        (status = 404, description = "Budget not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_budget(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    Path(category): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_budget(&user.id, &category).await?;
    Ok(StatusCode::NO_CONTENT)
}
