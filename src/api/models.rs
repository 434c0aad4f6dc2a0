use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::FinanceError;
use crate::core::models::analytics::{ComparisonWindow, Timeframe};
use crate::core::models::transaction::{TransactionSource, TransactionType};
use crate::core::models::user::User;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct GoogleLoginRequest {
    #[serde(default)]
    pub id_token: String,
}

/// Body of `/auth/refresh` and `/auth/logout`.
#[derive(Deserialize, ToSchema)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ExchangeTokenRequest {
    #[serde(default)]
    pub public_token: String,
}

// Query strings
fn default_limit() -> usize {
    20
}

#[derive(Deserialize, IntoParams)]
pub struct TransactionListQuery {
    /// `manual` or `plaid`
    pub source_filter: Option<TransactionSource>,
    pub transaction_type: Option<TransactionType>,
    #[serde(default = "default_limit")]
    #[param(default = 20, minimum = 1, maximum = 500)]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

#[derive(Deserialize, IntoParams)]
pub struct TransactionTypeQuery {
    pub transaction_type: Option<TransactionType>,
}

#[derive(Deserialize, IntoParams)]
pub struct LineChartQuery {
    #[serde(default)]
    pub timeframe: Timeframe,
    pub transaction_type: Option<TransactionType>,
}

#[derive(Deserialize, IntoParams)]
pub struct TimeframeQuery {
    /// `week`, `month` or `year`
    #[serde(default)]
    pub timeframe: ComparisonWindow,
}

#[derive(Deserialize, IntoParams)]
pub struct AccountTypeQuery {
    /// Aggregator account type, e.g. `depository` or `credit`
    pub account_type: Option<String>,
}

// Responses
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UserPublic {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = Option<String>)]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub balance: Decimal,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        UserPublic {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: user.birth_date,
            balance: user.balance,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for AccountResponse {
    fn from(user: &User) -> Self {
        AccountResponse {
            id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct BalanceResponse {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub balance: Decimal,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Json<Self> {
        Json(MessageResponse {
            message: message.to_string(),
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: &str) -> Json<Self> {
        Json(DetailResponse {
            detail: detail.to_string(),
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LinkTokenResponse {
    pub link_token: String,
}

// Error response struct
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

// Newtype wrapper for FinanceError to implement IntoResponse
pub struct ApiError(pub FinanceError);

impl From<FinanceError> for ApiError {
    fn from(err: FinanceError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            FinanceError::InvalidEmail(_) | FinanceError::EmailAlreadyRegistered(_) | FinanceError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            FinanceError::InvalidInput(_, _) => StatusCode::UNPROCESSABLE_ENTITY,
            FinanceError::InvalidCredentials | FinanceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            FinanceError::Forbidden(_) => StatusCode::FORBIDDEN,
            FinanceError::NotFound(_)
            | FinanceError::TransactionNotFound(_)
            | FinanceError::CategoryNotFound(_)
            | FinanceError::PaymentMethodNotFound(_)
            | FinanceError::BudgetNotFound(_)
            | FinanceError::BankConnectionNotFound(_) => StatusCode::NOT_FOUND,
            FinanceError::Conflict(_) => StatusCode::CONFLICT,
            FinanceError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            FinanceError::PlaidError(_)
            | FinanceError::OpenAiError(_)
            | FinanceError::InternalServerError(_)
            | FinanceError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let detail = match &self.0 {
            FinanceError::InvalidInput(_, field_error) => field_error.description.clone(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!("{} {}", status, detail);
        }
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (FinanceError::EmailAlreadyRegistered("a@b.co".to_string()), StatusCode::BAD_REQUEST),
            (FinanceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (FinanceError::invalid_input("limit", "too big"), StatusCode::UNPROCESSABLE_ENTITY),
            (FinanceError::Forbidden("no".to_string()), StatusCode::FORBIDDEN),
            (FinanceError::BudgetNotFound("Food".to_string()), StatusCode::NOT_FOUND),
            (FinanceError::Conflict("dup".to_string()), StatusCode::CONFLICT),
            (FinanceError::PlaidError("down".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
            (FinanceError::ServiceUnavailable("off".to_string()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[test]
    fn resource_not_found_messages_hide_ids() {
        assert_eq!(
            FinanceError::TransactionNotFound("abc".to_string()).to_string(),
            "Transaction not found"
        );
        assert_eq!(FinanceError::BudgetNotFound("Food".to_string()).to_string(), "Budget not found");
    }
}
