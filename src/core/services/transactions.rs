use super::{FinanceService, clean};
use crate::core::analytics::{merge_ledger, paginate};
use crate::core::errors::FinanceError;
use crate::core::models::transaction::{
    PaginatedTransactions, Transaction, TransactionInput, TransactionSource, TransactionType,
};
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use uuid::Uuid;

pub const MAX_PAGE_SIZE: usize = 500;
const DESCRIPTION_MAX_LENGTH: usize = 500;

impl<S: Storage> FinanceService<S> {
    fn validate_transaction_input(&self, input: &TransactionInput) -> Result<(), FinanceError> {
        self.validate_amount_input("amount", input.amount, false)?;
        self.validate_optional_length("description", input.description.as_deref(), DESCRIPTION_MAX_LENGTH)
    }

    /// Loads a manual transaction and checks it belongs to `user_id`.
    async fn owned_transaction(&self, user_id: &str, transaction_id: &str, action: &str) -> Result<Transaction, FinanceError> {
        let transaction = self
            .storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| FinanceError::TransactionNotFound(transaction_id.to_string()))?;
        if transaction.user_id != user_id {
            return Err(FinanceError::Forbidden(format!(
                "Not authorized to {} this transaction",
                action
            )));
        }
        Ok(transaction)
    }

    pub async fn create_transaction(&self, user_id: &str, input: TransactionInput) -> Result<Transaction, FinanceError> {
        self.validate_transaction_input(&input)?;
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            amount: input.amount,
            source: TransactionSource::Manual,
            kind: input.kind,
            category: clean(input.category),
            payment_method: clean(input.payment_method),
            date: input.date.unwrap_or_else(Utc::now),
            description: clean(input.description),
        };
        self.storage.save_transaction(transaction.clone()).await?;
        self.recalculate_balance(user_id).await?;
        tracing::info!(
            "Created {} transaction {} of {} for user {}",
            transaction.kind,
            transaction.id,
            transaction.amount,
            user_id
        );
        Ok(transaction)
    }

    /// Unified manual + bank view, newest first.
    pub async fn list_transactions(
        &self,
        user_id: &str,
        source: Option<TransactionSource>,
        kind: Option<TransactionType>,
        limit: usize,
        offset: usize,
    ) -> Result<PaginatedTransactions, FinanceError> {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(FinanceError::invalid_input(
                "limit",
                format!("limit must be between 1 and {}", MAX_PAGE_SIZE),
            ));
        }
        let (manual, bank) = self.load_ledger(user_id).await?;
        let page = paginate(merge_ledger(manual, &bank, source, kind)?, limit, offset);
        tracing::debug!(
            "Listed {} of {} transactions for user {}",
            page.items.len(),
            page.total,
            user_id
        );
        Ok(page)
    }

    pub async fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction, FinanceError> {
        self.owned_transaction(user_id, transaction_id, "access").await
    }

    /// Replaces every client field; the date is kept when omitted.
    pub async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        input: TransactionInput,
    ) -> Result<Transaction, FinanceError> {
        let mut transaction = self.owned_transaction(user_id, transaction_id, "update").await?;
        self.validate_transaction_input(&input)?;

        transaction.amount = input.amount;
        transaction.kind = input.kind;
        transaction.category = clean(input.category);
        transaction.payment_method = clean(input.payment_method);
        transaction.description = clean(input.description);
        if let Some(date) = input.date {
            transaction.date = date;
        }

        self.storage.save_transaction(transaction.clone()).await?;
        self.recalculate_balance(user_id).await?;
        tracing::info!("Updated transaction {} for user {}", transaction.id, user_id);
        Ok(transaction)
    }

    pub async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<(), FinanceError> {
        let transaction = self.owned_transaction(user_id, transaction_id, "delete").await?;
        self.storage.delete_transaction(&transaction.id).await?;
        self.recalculate_balance(user_id).await?;
        tracing::info!("Deleted transaction {} for user {}", transaction.id, user_id);
        Ok(())
    }
}
