//! Business operations, one submodule per resource. Every method returns
//! `Result<_, FinanceError>` and persists through the [`Storage`] trait.

use crate::auth::jwt::{Claims, JwtService};
use crate::auth::password::PasswordHasher;
use crate::core::balance::ledger_balance;
use crate::core::errors::{FieldError, FinanceError};
use crate::core::models::{
    bank::BankTransaction,
    category::{Category, DEFAULT_CATEGORIES},
    transaction::Transaction,
    user::User,
};
use crate::core::money::{MAX_AMOUNT, max_amount};
use crate::infrastructure::google::GoogleTokenVerifier;
use crate::infrastructure::openai::AdviceProvider;
use crate::infrastructure::plaid::BankDataProvider;
use crate::infrastructure::storage::Storage;
use email_address::EmailAddress;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

pub mod account;
pub mod analytics;
pub mod auth;
pub mod bank;
pub mod budgets;
pub mod categories;
pub mod payment_methods;
pub mod tips;
pub mod transactions;

/// Outbound services the finance service depends on.
#[derive(Clone)]
pub struct Integrations {
    pub bank: Arc<dyn BankDataProvider>,
    /// `None` when no completion API key is configured
    pub advice: Option<Arc<dyn AdviceProvider>>,
    pub google: Arc<dyn GoogleTokenVerifier>,
}

pub struct FinanceService<S: Storage> {
    storage: S,
    jwt_service: JwtService,
    hasher: PasswordHasher,
    integrations: Integrations,
}

impl<S: Storage> FinanceService<S> {
    pub fn new(storage: S, jwt_service: JwtService, hasher: PasswordHasher, integrations: Integrations) -> Self {
        FinanceService {
            storage,
            jwt_service,
            hasher,
            integrations,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, FinanceError> {
        self.jwt_service.validate_token(token)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, FinanceError> {
        self.storage.get_user(user_id).await
    }

    /// Inserts the global default categories that are missing. Returns how
    /// many were created.
    pub async fn seed_default_categories(&self) -> Result<usize, FinanceError> {
        let mut created = 0;
        for (name, icon, color) in DEFAULT_CATEGORIES {
            if self.storage.find_default_category(name).await?.is_some() {
                continue;
            }
            self.storage
                .save_category(Category {
                    id: Uuid::new_v4().to_string(),
                    name: name.to_string(),
                    icon: Some(icon.to_string()),
                    color: Some(color.to_string()),
                    user_id: None,
                    is_default: true,
                })
                .await?;
            created += 1;
        }
        if created > 0 {
            tracing::info!("Seeded {} default categories", created);
        }
        Ok(created)
    }

    /// Both transaction collections of a user, loaded concurrently.
    async fn load_ledger(&self, user_id: &str) -> Result<(Vec<Transaction>, Vec<BankTransaction>), FinanceError> {
        futures::try_join!(
            self.storage.get_user_transactions(user_id),
            self.storage.get_user_bank_transactions(user_id)
        )
    }

    /// Recomputes the cached balance from the ledger and stores it.
    pub async fn recalculate_balance(&self, user_id: &str) -> Result<Decimal, FinanceError> {
        let mut user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| FinanceError::NotFound("User not found".to_string()))?;
        let (manual, bank) = self.load_ledger(user_id).await?;
        user.balance = ledger_balance(user.opening_balance, &manual, &bank)?;
        let balance = user.balance;
        self.storage.update_user(user).await?;
        tracing::debug!("Balance for user {} recalculated: {}", user_id, balance);
        Ok(balance)
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), FinanceError> {
        if value.trim().is_empty() {
            return Err(FinanceError::InvalidInput(
                field.to_string(),
                FieldError::new(field, format!("Invalid {}", field), format!("{} cannot be empty", field)),
            ));
        }
        if value.trim().chars().count() > max_length {
            return Err(FinanceError::InvalidInput(
                field.to_string(),
                FieldError::new(
                    field,
                    format!("{} Too Long", field),
                    format!("{} cannot exceed {} characters", field, max_length),
                ),
            ));
        }
        Ok(())
    }

    fn validate_optional_length(&self, field: &str, value: Option<&str>, max_length: usize) -> Result<(), FinanceError> {
        match value {
            Some(v) if v.chars().count() > max_length => Err(FinanceError::invalid_input(
                field,
                format!("{} cannot exceed {} characters", field, max_length),
            )),
            _ => Ok(()),
        }
    }

    fn validate_email(&self, email: &str) -> Result<(), FinanceError> {
        if !EmailAddress::is_valid(email) {
            return Err(FinanceError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: Decimal, allow_zero: bool) -> Result<(), FinanceError> {
        if amount < Decimal::ZERO || (!allow_zero && amount.is_zero()) {
            let bound = if allow_zero { "negative" } else { "zero or negative" };
            return Err(FinanceError::InvalidInput(
                field.to_string(),
                FieldError::new(field, "Invalid Amount", format!("{} cannot be {}", field, bound)),
            ));
        }
        if amount > max_amount() {
            return Err(FinanceError::InvalidInput(
                field.to_string(),
                FieldError::new(field, "Invalid Amount", format!("{} cannot exceed {}", field, MAX_AMOUNT)),
            ));
        }
        if amount.normalize().scale() > 2 {
            return Err(FinanceError::InvalidInput(
                field.to_string(),
                FieldError::new(field, "Invalid Amount", "Amount cannot have more than 2 decimal places"),
            ));
        }
        Ok(())
    }
}

/// Trims an optional text field, dropping it when blank.
fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
