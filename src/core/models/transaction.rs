use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSource {
    Manual,
    Plaid,
}

/// A manual transaction as stored, and the unified view of any transaction
/// (manual or bank-imported) as returned to clients.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub source: TransactionSource,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    #[schema(value_type = String, example = "2025-06-01T12:34:56Z")]
    pub date: DateTime<Utc>,
    pub description: Option<String>,
}

impl Transaction {
    /// Effect of this transaction on the owner's balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedTransactions {
    pub items: Vec<Transaction>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_next: bool,
}

/// Client-supplied fields of a manual transaction, used for both creation
/// and full replacement.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct TransactionInput {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    #[schema(value_type = Option<String>, example = "2025-06-01T12:34:56Z")]
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}
