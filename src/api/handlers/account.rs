use crate::api::SharedService;
use crate::api::extract::ApiJson;
use crate::api::models::{
    AccountResponse, ApiError, BalanceResponse, DetailResponse, ErrorResponse, MessageResponse, UpdatePasswordRequest,
};
use crate::core::models::user::User;
use axum::{Extension, Json, extract::State};

#[utoipa::path(
    get,
    path = "/account/me",
    responses(
        (status = 200, description = "Current user", body = AccountResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn me(Extension(user): Extension<User>) -> Json<AccountResponse> {
    Json(AccountResponse::from(&user))
}

#[utoipa::path(
    delete,
    path = "/account/delete",
    responses(
        (status = 200, description = "Account and owned data deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn delete_account(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<MessageResponse>, ApiError> {
    service.delete_account(&user).await?;
    Ok(MessageResponse::new("Account deleted successfully"))
}

#[utoipa::path(
    put,
    path = "/account/update-password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = DetailResponse),
        (status = 400, description = "New password equals the old one", body = ErrorResponse),
        (status = 401, description = "Old password is incorrect", body = ErrorResponse),
        (status = 422, description = "Password too short", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn update_password(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
    ApiJson(req): ApiJson<UpdatePasswordRequest>,
) -> Result<Json<DetailResponse>, ApiError> {
    service
        .update_password(&user, &req.old_password, &req.new_password)
        .await?;
    Ok(DetailResponse::new("Password updated successfully."))
}

#[utoipa::path(
    get,
    path = "/account/balance",
    responses(
        (status = 200, description = "Current balance", body = BalanceResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn balance(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = service.get_balance(&user.id).await?;
    Ok(Json(BalanceResponse { balance }))
}
