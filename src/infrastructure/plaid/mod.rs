//! Bank-data aggregator integration.
//!
//! [`BankDataProvider`] is the seam the service talks to; [`client::PlaidClient`]
//! implements it over Plaid's REST API. The provider types mirror Plaid's JSON
//! so they deserialize straight from responses.

use crate::core::errors::FinanceError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

pub mod client;

#[derive(Clone, Debug, Deserialize)]
pub struct ItemCredentials {
    pub access_token: String,
    pub item_id: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Institution {
    pub institution_id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProviderBalances {
    pub current: Option<f64>,
    pub available: Option<f64>,
    pub iso_currency_code: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProviderAccount {
    pub account_id: String,
    pub name: String,
    pub official_name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: String,
    pub subtype: Option<String>,
    pub mask: Option<String>,
    #[serde(default)]
    pub balances: ProviderBalances,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProviderTransaction {
    pub transaction_id: String,
    pub account_id: String,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: Option<Vec<String>>,
    pub payment_channel: Option<String>,
    pub iso_currency_code: Option<String>,
    #[serde(default)]
    pub pending: bool,
}

#[async_trait]
pub trait BankDataProvider: Send + Sync {
    async fn create_link_token(&self, client_user_id: &str) -> Result<String, FinanceError>;
    async fn exchange_public_token(&self, public_token: &str) -> Result<ItemCredentials, FinanceError>;
    /// Institution behind an item, when the aggregator reports one.
    async fn institution(&self, access_token: &str) -> Result<Option<Institution>, FinanceError>;
    async fn accounts(&self, access_token: &str) -> Result<Vec<ProviderAccount>, FinanceError>;
    /// Every transaction of `account_id` dated within `start..=end`.
    async fn transactions(
        &self,
        access_token: &str,
        account_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ProviderTransaction>, FinanceError>;
}
