use super::SharedService;
use crate::api::models::ApiError;
use crate::core::errors::FinanceError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use http::header;

/// Resolves the bearer token to a user and stores it in the request
/// extensions for the handlers.
pub async fn auth_middleware(
    State(service): State<SharedService>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| FinanceError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .ok_or_else(|| FinanceError::Unauthorized("Invalid Authorization header".to_string()))?;

    let user = service.authenticate(token.trim()).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
