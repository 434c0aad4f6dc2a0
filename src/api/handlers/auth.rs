use crate::api::SharedService;
use crate::api::extract::ApiJson;
use crate::api::models::{
    ApiError, DetailResponse, ErrorResponse, GoogleLoginRequest, LoginRequest, RefreshRequest, UserPublic,
};
use crate::core::models::refresh_token::TokenResponse;
use crate::core::models::user::{Registration, User};
use axum::{Extension, Json, extract::State};

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = Registration,
    responses(
        (status = 200, description = "User registered", body = UserPublic),
        (status = 400, description = "Email taken or invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn register(
    State(service): State<SharedService>,
    ApiJson(req): ApiJson<Registration>,
) -> Result<Json<UserPublic>, ApiError> {
    let user = service.register(req).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn login(
    State(service): State<SharedService>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = service.login(&req.email, &req.password).await?;
    Ok(Json(tokens))
}

#[utoipa::path(
    post,
    path = "/auth/google",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Missing token or incomplete profile", body = ErrorResponse),
        (status = 401, description = "Invalid Google ID token", body = ErrorResponse),
        (status = 409, description = "Email registered with a password", body = ErrorResponse)
    )
)]
pub async fn google_login(
    State(service): State<SharedService>,
    ApiJson(req): ApiJson<GoogleLoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = service.google_login(&req.id_token).await?;
    Ok(Json(tokens))
}

#[utoipa::path(
    post,
    path = "/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Tokens rotated", body = TokenResponse),
        (status = 400, description = "Refresh token required", body = ErrorResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse)
    )
)]
pub async fn refresh(
    State(service): State<SharedService>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let tokens = service.refresh(&req.refresh_token).await?;
    Ok(Json(tokens))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Logged out", body = DetailResponse),
        (status = 400, description = "Refresh token required", body = ErrorResponse)
    )
)]
pub async fn logout(
    State(service): State<SharedService>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> Result<Json<DetailResponse>, ApiError> {
    service.logout(&req.refresh_token).await?;
    Ok(DetailResponse::new("Successfully logged out"))
}

#[utoipa::path(
    post,
    path = "/auth/logout-all",
    responses(
        (status = 200, description = "All sessions ended", body = DetailResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn logout_all(
    State(service): State<SharedService>,
    Extension(user): Extension<User>,
) -> Result<Json<DetailResponse>, ApiError> {
    service.logout_all(&user.id).await?;
    Ok(DetailResponse::new("Logged out from all devices"))
}
