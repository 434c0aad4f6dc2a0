use crate::api::SharedService;
use crate::api::models::{ApiError, ErrorResponse};
use crate::core::models::user::User;
use crate::core::services::tips::TipsResponse;
use axum::{Extension, Json, extract::State};
use chrono::Utc;

#[utoipa::path(
    get,
    path = "/ai/tips",
    responses(
        (status = 200, description = "Spending tips for the current month", body = TipsResponse),
        (status = 404, description = "No expenses found to analyze", body = ErrorResponse),
        (status = 500, description = "Completion provider failed", body = ErrorResponse),
        (status = 503, description = "Completion provider not configured", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn tips(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<TipsResponse>, ApiError> {
    Ok(Json(service.spending_tips(&user.id, Utc::now()).await?))
}
