use super::FinanceService;
use crate::core::errors::FinanceError;
use crate::core::models::bank::{BankAccount, BankConnection, BankTransaction};
use crate::core::models::category::{Category, UNCATEGORIZED};
use crate::core::models::transaction::TransactionSource;
use crate::core::money::{max_amount, to_decimal};
use crate::infrastructure::plaid::ProviderTransaction;
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

const FULL_IMPORT_DAYS: i64 = 30;
const LATEST_IMPORT_DAYS: i64 = 3;
const IMPORTED_CATEGORY_ICON: &str = "📦";
const IMPORTED_CATEGORY_COLOR: &str = "#9CA3AF";

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ConnectionResponse {
    pub status: String,
    pub message: String,
    pub item_id: String,
    pub institution_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SyncResponse {
    pub status: String,
    pub imported: usize,
}

/// Payment method recorded for an imported transaction.
pub fn payment_method_for_channel(channel: Option<&str>) -> &'static str {
    match channel {
        Some("online") => "Plaid - Online",
        Some("in store") => "Plaid - Card",
        Some("other") => "Plaid - Other",
        _ => "Plaid - Unknown",
    }
}

/// Aggregator amounts must convert to a decimal within the accepted range.
fn is_importable_amount(amount: f64) -> bool {
    to_decimal(amount).is_some_and(|value| value.abs() <= max_amount())
}

/// What to do with an account whose connection no longer exists.
#[derive(Clone, Copy, PartialEq, Eq)]
enum MissingConnection {
    Fail,
    Skip,
}

impl<S: Storage> FinanceService<S> {
    pub async fn create_link_token(&self, user_id: &str) -> Result<String, FinanceError> {
        let token = self.integrations.bank.create_link_token(user_id).await?;
        tracing::debug!("Created link token for user {}", user_id);
        Ok(token)
    }

    pub async fn connect_bank(&self, user_id: &str, public_token: &str) -> Result<ConnectionResponse, FinanceError> {
        if public_token.trim().is_empty() {
            return Err(FinanceError::BadRequest("public_token required".to_string()));
        }
        let credentials = self.integrations.bank.exchange_public_token(public_token).await?;

        let institution = match self.integrations.bank.institution(&credentials.access_token).await {
            Ok(institution) => institution,
            Err(e) => {
                tracing::warn!("Institution lookup failed for item {}: {}", credentials.item_id, e);
                None
            }
        };

        let connection = BankConnection {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            access_token: credentials.access_token,
            item_id: credentials.item_id,
            institution_id: institution.as_ref().map(|i| i.institution_id.clone()),
            institution_name: institution.map(|i| i.name),
            created_at: Utc::now(),
        };
        self.storage.save_bank_connection(connection.clone()).await?;
        tracing::info!("Connected bank item {} for user {}", connection.item_id, user_id);

        Ok(ConnectionResponse {
            status: "success".to_string(),
            message: "Bank account connected".to_string(),
            item_id: connection.item_id,
            institution_name: connection.institution_name,
        })
    }

    /// Fetches the accounts of every connection and stores the unseen ones.
    /// Returns only the newly stored accounts.
    pub async fn sync_bank_accounts(&self, user_id: &str) -> Result<Vec<BankAccount>, FinanceError> {
        let connections = self.storage.get_user_bank_connections(user_id).await?;
        if connections.is_empty() {
            return Err(FinanceError::NotFound("No bank connections found".to_string()));
        }

        let mut saved = Vec::new();
        for connection in connections {
            let accounts = match self.integrations.bank.accounts(&connection.access_token).await {
                Ok(accounts) => accounts,
                Err(e) => {
                    tracing::warn!("Skipping accounts of connection {}: {}", connection.id, e);
                    continue;
                }
            };
            for account in accounts {
                if self
                    .storage
                    .get_bank_account_by_account_id(&account.account_id)
                    .await?
                    .is_some()
                {
                    continue;
                }
                let stored = BankAccount {
                    id: Uuid::new_v4().to_string(),
                    user_id: user_id.to_string(),
                    bank_connection_id: connection.id.clone(),
                    account_id: account.account_id,
                    name: account.name,
                    official_name: account.official_name,
                    account_type: account.account_type,
                    subtype: account.subtype,
                    mask: account.mask,
                    current_balance: account.balances.current,
                    available_balance: account.balances.available,
                    iso_currency_code: account.balances.iso_currency_code,
                    created_at: Utc::now(),
                };
                self.storage.save_bank_account(stored.clone()).await?;
                saved.push(stored);
            }
        }
        tracing::info!("Stored {} new bank accounts for user {}", saved.len(), user_id);
        Ok(saved)
    }

    /// Imports the last 30 days of every account (optionally of one type).
    /// Returns the newly imported transactions, newest first.
    pub async fn import_bank_transactions(
        &self,
        user_id: &str,
        account_type: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<BankTransaction>, FinanceError> {
        let mut imported = self
            .import_window(user_id, account_type, FULL_IMPORT_DAYS, MissingConnection::Fail, now)
            .await?;
        imported.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(imported)
    }

    /// Imports the last 3 days, skipping accounts whose connection is gone.
    pub async fn sync_latest_transactions(&self, user_id: &str, now: DateTime<Utc>) -> Result<SyncResponse, FinanceError> {
        let imported = self
            .import_window(user_id, None, LATEST_IMPORT_DAYS, MissingConnection::Skip, now)
            .await?;
        Ok(SyncResponse {
            status: "success".to_string(),
            imported: imported.len(),
        })
    }

    pub async fn delete_bank_connection(&self, user_id: &str, connection_id: &str) -> Result<(), FinanceError> {
        let connection = self
            .storage
            .get_bank_connection(connection_id)
            .await?
            .ok_or_else(|| FinanceError::BankConnectionNotFound(connection_id.to_string()))?;
        if connection.user_id != user_id {
            return Err(FinanceError::Forbidden(
                "Not authorized to access this bank connection".to_string(),
            ));
        }

        let accounts = self.storage.delete_connection_accounts(&connection.id).await?;
        self.storage.delete_bank_connection(&connection.id).await?;
        self.recalculate_balance(user_id).await?;
        tracing::info!(
            "Deleted bank connection {} with {} accounts for user {}",
            connection.id,
            accounts,
            user_id
        );
        Ok(())
    }

    async fn import_window(
        &self,
        user_id: &str,
        account_type: Option<&str>,
        days: i64,
        on_missing: MissingConnection,
        now: DateTime<Utc>,
    ) -> Result<Vec<BankTransaction>, FinanceError> {
        let accounts: Vec<BankAccount> = self
            .storage
            .get_user_bank_accounts(user_id)
            .await?
            .into_iter()
            .filter(|a| account_type.is_none_or(|t| a.account_type == t))
            .collect();
        if accounts.is_empty() {
            return Err(FinanceError::NotFound("No bank accounts found".to_string()));
        }

        let mut linked = Vec::with_capacity(accounts.len());
        for account in accounts {
            match self.storage.get_bank_connection(&account.bank_connection_id).await? {
                Some(connection) => linked.push((account, connection)),
                None if on_missing == MissingConnection::Fail => {
                    return Err(FinanceError::BadRequest(
                        "Invalid bank connection or missing access token. Please reconnect.".to_string(),
                    ));
                }
                None => tracing::warn!("Skipping account {} without a connection", account.id),
            }
        }

        let end = now.date_naive();
        let start = (now - TimeDelta::days(days)).date_naive();
        let outcome = self.import_accounts(user_id, &linked, start, end).await;

        // Rows stored before a failure still count towards the balance.
        self.recalculate_balance(user_id).await?;
        let imported = outcome?;
        tracing::info!("Imported {} bank transactions for user {}", imported.len(), user_id);
        Ok(imported)
    }

    async fn import_accounts(
        &self,
        user_id: &str,
        linked: &[(BankAccount, BankConnection)],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BankTransaction>, FinanceError> {
        let mut imported = Vec::new();
        for (account, connection) in linked {
            let fetched = match self
                .integrations
                .bank
                .transactions(&connection.access_token, &account.account_id, start, end)
                .await
            {
                Ok(fetched) => fetched,
                Err(e) => {
                    tracing::warn!("Skipping transactions of account {}: {}", account.id, e);
                    continue;
                }
            };

            for txn in fetched {
                if !is_importable_amount(txn.amount) {
                    tracing::warn!(
                        "Skipping transaction {} of account {} with unusable amount {}",
                        txn.transaction_id,
                        account.id,
                        txn.amount
                    );
                    continue;
                }
                if self.storage.bank_transaction_exists(&txn.transaction_id).await? {
                    continue;
                }
                let stored = self.store_bank_transaction(user_id, account, txn).await?;
                imported.push(stored);
            }
        }
        Ok(imported)
    }

    async fn store_bank_transaction(
        &self,
        user_id: &str,
        account: &BankAccount,
        txn: ProviderTransaction,
    ) -> Result<BankTransaction, FinanceError> {
        let category_name = txn
            .category
            .as_ref()
            .and_then(|names| names.first())
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNCATEGORIZED);
        let category = self.find_or_create_category(user_id, category_name).await?;

        let stored = BankTransaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            bank_account_id: account.id.clone(),
            transaction_id: txn.transaction_id,
            source: TransactionSource::Plaid,
            name: txn.name,
            amount: txn.amount,
            date: txn.date,
            category: Some(vec![category.name]),
            payment_method: Some(payment_method_for_channel(txn.payment_channel.as_deref()).to_string()),
            payment_channel: txn.payment_channel,
            iso_currency_code: txn.iso_currency_code,
            pending: txn.pending,
            created_at: Utc::now(),
        };
        self.storage.save_bank_transaction(stored.clone()).await?;
        Ok(stored)
    }

    async fn find_or_create_category(&self, user_id: &str, name: &str) -> Result<Category, FinanceError> {
        if let Some(existing) = self.storage.find_user_category(user_id, name).await? {
            return Ok(existing);
        }
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            icon: Some(IMPORTED_CATEGORY_ICON.to_string()),
            color: Some(IMPORTED_CATEGORY_COLOR.to_string()),
            user_id: Some(user_id.to_string()),
            is_default: false,
        };
        self.storage.save_category(category.clone()).await?;
        tracing::debug!("Created category {} for imported transactions of user {}", name, user_id);
        Ok(category)
    }
}
