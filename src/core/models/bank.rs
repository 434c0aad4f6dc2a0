use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transaction::{Transaction, TransactionSource, TransactionType};
use crate::core::errors::FinanceError;
use crate::core::money::to_decimal;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankConnection {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub item_id: String,
    pub institution_id: Option<String>,
    pub institution_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BankAccount {
    pub id: String,
    pub user_id: String,
    pub bank_connection_id: String,
    /// Aggregator account id
    pub account_id: String,
    pub name: String,
    pub official_name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: String,
    pub subtype: Option<String>,
    pub mask: Option<String>,
    pub current_balance: Option<f64>,
    pub available_balance: Option<f64>,
    pub iso_currency_code: Option<String>,
    #[schema(value_type = String, example = "2025-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct BankTransaction {
    pub id: String,
    pub user_id: String,
    pub bank_account_id: String,
    /// Aggregator transaction id, unique across imports
    pub transaction_id: String,
    pub source: TransactionSource,
    pub name: String,
    /// Positive when money leaves the account, negative when it arrives
    pub amount: f64,
    #[schema(value_type = String, example = "2025-06-01")]
    pub date: NaiveDate,
    pub category: Option<Vec<String>>,
    pub payment_method: Option<String>,
    pub payment_channel: Option<String>,
    pub iso_currency_code: Option<String>,
    pub pending: bool,
    #[schema(value_type = String, example = "2025-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

impl BankTransaction {
    pub fn kind(&self) -> TransactionType {
        if self.amount < 0.0 {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }

    /// The aggregator amount as a decimal, sign preserved.
    pub fn decimal_amount(&self) -> Result<Decimal, FinanceError> {
        to_decimal(self.amount).ok_or_else(|| {
            FinanceError::InternalServerError(format!(
                "Bank transaction {} has an unrepresentable amount",
                self.transaction_id
            ))
        })
    }

    pub fn signed_amount(&self) -> Result<Decimal, FinanceError> {
        Ok(-self.decimal_amount()?)
    }

    /// The transaction as it appears in the unified ledger.
    pub fn to_ledger_entry(&self) -> Result<Transaction, FinanceError> {
        Ok(Transaction {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            amount: self.decimal_amount()?.abs(),
            source: TransactionSource::Plaid,
            kind: self.kind(),
            category: self
                .category
                .as_ref()
                .filter(|names| !names.is_empty())
                .map(|names| names.join(", ")),
            payment_method: self.payment_method.clone(),
            date: self.date.and_time(NaiveTime::MIN).and_utc(),
            description: Some(self.name.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn bank_txn(amount: f64, category: Option<Vec<String>>) -> BankTransaction {
        BankTransaction {
            id: "b1".to_string(),
            user_id: "u1".to_string(),
            bank_account_id: "a1".to_string(),
            transaction_id: "plaid-1".to_string(),
            source: TransactionSource::Plaid,
            name: "Coffee Shop".to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            category,
            payment_method: Some("Plaid - Card".to_string()),
            payment_channel: Some("in store".to_string()),
            iso_currency_code: Some("USD".to_string()),
            pending: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn negative_amount_is_income() {
        let entry = bank_txn(-250.5, None).to_ledger_entry().unwrap();
        assert_eq!(entry.kind, TransactionType::Income);
        assert_eq!(entry.amount, Decimal::from_str("250.5").unwrap());
        assert_eq!(entry.category, None);
    }

    #[test]
    fn ledger_entry_joins_categories_and_uses_midnight() {
        let entry = bank_txn(4.75, Some(vec!["Food".to_string(), "Coffee".to_string()]))
            .to_ledger_entry()
            .unwrap();
        assert_eq!(entry.kind, TransactionType::Expense);
        assert_eq!(entry.source, TransactionSource::Plaid);
        assert_eq!(entry.category.as_deref(), Some("Food, Coffee"));
        assert_eq!(entry.description.as_deref(), Some("Coffee Shop"));
        assert_eq!(entry.date.to_rfc3339(), "2025-03-14T00:00:00+00:00");
    }

    #[test]
    fn signed_amount_flips_aggregator_sign() {
        assert_eq!(bank_txn(10.0, None).signed_amount().unwrap(), Decimal::from(-10));
        assert_eq!(bank_txn(-10.0, None).signed_amount().unwrap(), Decimal::from(10));
        assert!(bank_txn(f64::INFINITY, None).signed_amount().is_err());
    }
}
