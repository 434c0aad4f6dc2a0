use crate::core::errors::FinanceError;
use std::time::Duration;

const UA: &str = concat!("expense-tracker/", env!("CARGO_PKG_VERSION"));

/// Shared client for the outbound integrations.
pub fn http_client(timeout_secs: u64) -> Result<reqwest::Client, FinanceError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()
        .map_err(|e| FinanceError::InternalServerError(format!("HTTP client error: {}", e)))
}
