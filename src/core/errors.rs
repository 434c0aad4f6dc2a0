use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum FinanceError {
    /// Email format is invalid
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Email is already registered
    #[error("User with this email already exists")]
    EmailAlreadyRegistered(String),

    /// Email/password pair did not match a user
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{}`: {}", .0, .1.description)]
    InvalidInput(String, FieldError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Transaction not found")]
    TransactionNotFound(String),

    #[error("Category not found")]
    CategoryNotFound(String),

    #[error("Payment method not found")]
    PaymentMethodNotFound(String),

    #[error("Budget not found")]
    BudgetNotFound(String),

    #[error("Bank connection not found")]
    BankConnectionNotFound(String),

    /// The bank-data aggregator rejected a call or was unreachable
    #[error("Plaid API error: {0}")]
    PlaidError(String),

    /// The completion provider rejected a call or was unreachable
    #[error("OpenAI error: {0}")]
    OpenAiError(String),

    /// An optional integration is not configured
    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl FinanceError {
    pub fn invalid_input(field: &str, description: impl Into<String>) -> Self {
        FinanceError::InvalidInput(
            field.to_string(),
            FieldError::new(field, format!("Invalid {}", field), description),
        )
    }
}
