use crate::api::models::MessageResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse)
    )
)]
pub async fn welcome() -> Json<MessageResponse> {
    MessageResponse::new("Welcome to Expense Tracker API")
}
