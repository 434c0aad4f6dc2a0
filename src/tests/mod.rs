mod budget_tests;
mod category_tests;
mod payment_method_tests;
mod user_tests;

use crate::auth::jwt::JwtService;
use crate::auth::password::PasswordHasher;
use crate::core::errors::FinanceError;
use crate::core::models::transaction::{Transaction, TransactionInput, TransactionType};
use crate::core::models::user::{Registration, User};
use crate::core::services::{FinanceService, Integrations};
use crate::infrastructure::google::{GoogleIdentity, GoogleTokenVerifier};
use crate::infrastructure::openai::AdviceProvider;
use crate::infrastructure::plaid::{
    BankDataProvider, Institution, ItemCredentials, ProviderAccount, ProviderBalances, ProviderTransaction,
};
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-secret";
pub const PASSWORD: &str = "password123";

/// Aggregator double: serves fixed accounts and transactions to any token.
#[derive(Default)]
pub struct FakeBank {
    pub accounts: Vec<ProviderAccount>,
    pub transactions: Vec<ProviderTransaction>,
    pub institution: Option<Institution>,
}

#[async_trait]
impl BankDataProvider for FakeBank {
    async fn create_link_token(&self, client_user_id: &str) -> Result<String, FinanceError> {
        Ok(format!("link-sandbox-{}", client_user_id))
    }

    async fn exchange_public_token(&self, public_token: &str) -> Result<ItemCredentials, FinanceError> {
        if public_token == "bad-token" {
            return Err(FinanceError::PlaidError("INVALID_PUBLIC_TOKEN".to_string()));
        }
        Ok(ItemCredentials {
            access_token: format!("access-{}", public_token),
            item_id: format!("item-{}", public_token),
        })
    }

    async fn institution(&self, _access_token: &str) -> Result<Option<Institution>, FinanceError> {
        Ok(self.institution.clone())
    }

    async fn accounts(&self, _access_token: &str) -> Result<Vec<ProviderAccount>, FinanceError> {
        Ok(self.accounts.clone())
    }

    async fn transactions(
        &self,
        _access_token: &str,
        account_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ProviderTransaction>, FinanceError> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.account_id == account_id && t.date >= start && t.date <= end)
            .cloned()
            .collect())
    }
}

pub struct FakeAdvice {
    pub answer: Option<String>,
}

#[async_trait]
impl AdviceProvider for FakeAdvice {
    fn model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, _system_prompt: &str, user_prompt: &str) -> Result<Option<String>, FinanceError> {
        if !user_prompt.contains("CAD") {
            return Err(FinanceError::OpenAiError("unexpected prompt".to_string()));
        }
        Ok(self.answer.clone())
    }
}

/// Maps ID tokens to identities; unknown tokens are rejected.
#[derive(Default)]
pub struct FakeGoogle {
    pub identities: HashMap<String, GoogleIdentity>,
}

#[async_trait]
impl GoogleTokenVerifier for FakeGoogle {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, FinanceError> {
        self.identities
            .get(id_token)
            .cloned()
            .ok_or_else(|| FinanceError::Unauthorized("Invalid or expired Google ID token.".to_string()))
    }
}

pub fn test_integrations() -> Integrations {
    Integrations {
        bank: Arc::new(FakeBank::default()),
        advice: Some(Arc::new(FakeAdvice {
            answer: Some("1. Cook at home\n2. Cancel unused subscriptions\n3. Walk more".to_string()),
        })),
        google: Arc::new(FakeGoogle::default()),
    }
}

/// Service plus a handle on its storage for seeding and inspection.
pub fn create_test_service_with(integrations: Integrations) -> (FinanceService<InMemoryStorage>, InMemoryStorage) {
    let storage = InMemoryStorage::new();
    let jwt_service = JwtService::new(TEST_SECRET.to_string());
    let service = FinanceService::new(
        storage.clone(),
        jwt_service,
        PasswordHasher::new(4),
        integrations,
    );
    (service, storage)
}

pub fn create_test_service() -> FinanceService<InMemoryStorage> {
    create_test_service_with(test_integrations()).0
}

pub fn registration(email: &str) -> Registration {
    Registration {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        birth_date: None,
        initial_balance: Some(Decimal::from(100)),
    }
}

pub async fn register_user(service: &FinanceService<InMemoryStorage>, email: &str) -> User {
    service.register(registration(email)).await.unwrap()
}

pub fn expense(amount: Decimal, category: &str, date: DateTime<Utc>) -> TransactionInput {
    TransactionInput {
        amount,
        kind: TransactionType::Expense,
        category: Some(category.to_string()),
        payment_method: Some("Cash".to_string()),
        date: Some(date),
        description: None,
    }
}

pub fn income(amount: Decimal, date: DateTime<Utc>) -> TransactionInput {
    TransactionInput {
        amount,
        kind: TransactionType::Income,
        category: Some("Salary".to_string()),
        payment_method: None,
        date: Some(date),
        description: Some("Paycheck".to_string()),
    }
}

pub async fn add_transaction(
    service: &FinanceService<InMemoryStorage>,
    user: &User,
    input: TransactionInput,
) -> Transaction {
    service.create_transaction(&user.id, input).await.unwrap()
}

pub fn provider_account(account_id: &str, account_type: &str) -> ProviderAccount {
    ProviderAccount {
        account_id: account_id.to_string(),
        name: "Everyday Checking".to_string(),
        official_name: None,
        account_type: account_type.to_string(),
        subtype: Some("checking".to_string()),
        mask: Some("0000".to_string()),
        balances: ProviderBalances {
            current: Some(1200.0),
            available: Some(1100.0),
            iso_currency_code: Some("CAD".to_string()),
        },
    }
}

pub fn provider_transaction(
    transaction_id: &str,
    account_id: &str,
    amount: f64,
    date: NaiveDate,
    category: Option<&str>,
    channel: &str,
) -> ProviderTransaction {
    ProviderTransaction {
        transaction_id: transaction_id.to_string(),
        account_id: account_id.to_string(),
        name: format!("Merchant {}", transaction_id),
        amount,
        date,
        category: category.map(|c| vec![c.to_string(), "Sub".to_string()]),
        payment_channel: Some(channel.to_string()),
        iso_currency_code: Some("CAD".to_string()),
        pending: false,
    }
}
