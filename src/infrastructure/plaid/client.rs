use super::{BankDataProvider, Institution, ItemCredentials, ProviderAccount, ProviderTransaction};
use crate::core::errors::FinanceError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const CLIENT_NAME: &str = "Expense Tracker";
const COUNTRY_CODES: [&str; 2] = ["US", "CA"];
const PAGE_SIZE: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaidEnvironment {
    Sandbox,
    Development,
    Production,
}

impl PlaidEnvironment {
    /// Unknown names fall back to the sandbox.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "production" => PlaidEnvironment::Production,
            "development" => PlaidEnvironment::Development,
            _ => PlaidEnvironment::Sandbox,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            PlaidEnvironment::Sandbox => "https://sandbox.plaid.com",
            PlaidEnvironment::Development => "https://development.plaid.com",
            PlaidEnvironment::Production => "https://production.plaid.com",
        }
    }
}

#[derive(Deserialize)]
struct PlaidApiError {
    error_code: Option<String>,
    error_message: Option<String>,
}

pub struct PlaidClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    secret: String,
}

impl PlaidClient {
    pub fn new(http: reqwest::Client, environment: PlaidEnvironment, client_id: String, secret: String) -> Self {
        PlaidClient {
            http,
            base_url: environment.base_url().to_string(),
            client_id,
            secret,
        }
    }

    /// POSTs `body` with the client credentials merged in.
    async fn post<T: DeserializeOwned>(&self, path: &str, mut body: Value) -> Result<T, FinanceError> {
        if let Some(fields) = body.as_object_mut() {
            fields.insert("client_id".to_string(), json!(self.client_id));
            fields.insert("secret".to_string(), json!(self.secret));
        }

        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .map_err(|e| FinanceError::PlaidError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<PlaidApiError>().await {
                Ok(PlaidApiError {
                    error_code,
                    error_message,
                }) => format!(
                    "{} {}",
                    error_code.unwrap_or_else(|| status.to_string()),
                    error_message.unwrap_or_default()
                ),
                Err(_) => status.to_string(),
            };
            return Err(FinanceError::PlaidError(detail.trim().to_string()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FinanceError::PlaidError(format!("Invalid response from {}: {}", path, e)))
    }
}

#[derive(Serialize)]
struct LinkTokenUser<'a> {
    client_user_id: &'a str,
}

#[derive(Deserialize)]
struct LinkTokenResponse {
    link_token: String,
}

#[derive(Deserialize)]
struct Item {
    institution_id: Option<String>,
}

#[derive(Deserialize)]
struct ItemResponse {
    item: Item,
}

#[derive(Deserialize)]
struct InstitutionResponse {
    institution: Institution,
}

#[derive(Deserialize)]
struct AccountsResponse {
    accounts: Vec<ProviderAccount>,
}

#[derive(Deserialize)]
struct TransactionsResponse {
    transactions: Vec<ProviderTransaction>,
    total_transactions: usize,
}

#[async_trait]
impl BankDataProvider for PlaidClient {
    async fn create_link_token(&self, client_user_id: &str) -> Result<String, FinanceError> {
        let response: LinkTokenResponse = self
            .post(
                "/link/token/create",
                json!({
                    "user": LinkTokenUser { client_user_id },
                    "client_name": CLIENT_NAME,
                    "products": ["transactions"],
                    "country_codes": COUNTRY_CODES,
                    "language": "en",
                }),
            )
            .await?;
        Ok(response.link_token)
    }

    async fn exchange_public_token(&self, public_token: &str) -> Result<ItemCredentials, FinanceError> {
        self.post("/item/public_token/exchange", json!({ "public_token": public_token }))
            .await
    }

    async fn institution(&self, access_token: &str) -> Result<Option<Institution>, FinanceError> {
        let item: ItemResponse = self.post("/item/get", json!({ "access_token": access_token })).await?;
        let Some(institution_id) = item.item.institution_id else {
            return Ok(None);
        };
        let response: InstitutionResponse = self
            .post(
                "/institutions/get_by_id",
                json!({
                    "institution_id": institution_id,
                    "country_codes": COUNTRY_CODES,
                }),
            )
            .await?;
        Ok(Some(response.institution))
    }

    async fn accounts(&self, access_token: &str) -> Result<Vec<ProviderAccount>, FinanceError> {
        let response: AccountsResponse = self.post("/accounts/get", json!({ "access_token": access_token })).await?;
        Ok(response.accounts)
    }

    async fn transactions(
        &self,
        access_token: &str,
        account_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ProviderTransaction>, FinanceError> {
        let mut collected = Vec::new();
        loop {
            let page: TransactionsResponse = self
                .post(
                    "/transactions/get",
                    json!({
                        "access_token": access_token,
                        "start_date": start.format("%Y-%m-%d").to_string(),
                        "end_date": end.format("%Y-%m-%d").to_string(),
                        "options": {
                            "account_ids": [account_id],
                            "count": PAGE_SIZE,
                            "offset": collected.len(),
                        },
                    }),
                )
                .await?;
            let received = page.transactions.len();
            collected.extend(page.transactions);
            if received == 0 || collected.len() >= page.total_transactions {
                break;
            }
        }
        tracing::debug!("Fetched {} transactions for account {}", collected.len(), account_id);
        Ok(collected)
    }
}
