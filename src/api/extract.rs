//! Request extractors whose rejections use the `{detail}` error body.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::api::models::ApiError;
use crate::core::errors::FinanceError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        tracing::debug!("Rejected request body: {}", detail);
        match rejection {
            // well-formed JSON with missing or mistyped fields
            JsonRejection::JsonDataError(_) => ApiError(FinanceError::invalid_input("body", detail)),
            _ => ApiError(FinanceError::BadRequest(format!("Missing or invalid JSON body: {}", detail))),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(FinanceError::BadRequest(rejection.body_text()))
    }
}
