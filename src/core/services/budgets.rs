use super::FinanceService;
use crate::core::errors::FinanceError;
use crate::core::models::budget::{Budget, BudgetInput};
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

const CATEGORY_MAX_LENGTH: usize = 50;

impl<S: Storage> FinanceService<S> {
    pub async fn create_budget(&self, user_id: &str, input: BudgetInput) -> Result<Budget, FinanceError> {
        let category = input.category.trim().to_string();
        self.validate_string_input("category", &category, CATEGORY_MAX_LENGTH)?;
        self.validate_amount_input("limit", input.limit, true)?;
        if self.storage.get_budget(user_id, &category).await?.is_some() {
            return Err(FinanceError::Conflict(
                "Budget for this category already exists.".to_string(),
            ));
        }

        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category,
            limit: input.limit,
            created_at: Utc::now(),
        };
        self.storage.save_budget(budget.clone()).await?;
        tracing::info!("Created budget for {} ({}) for user {}", budget.category, budget.limit, user_id);
        Ok(budget)
    }

    pub async fn list_budgets(&self, user_id: &str) -> Result<Vec<Budget>, FinanceError> {
        self.storage.get_user_budgets(user_id).await
    }

    pub async fn update_budget(&self, user_id: &str, category: &str, limit: Decimal) -> Result<Budget, FinanceError> {
        self.validate_amount_input("limit", limit, true)?;
        let mut budget = self
            .storage
            .get_budget(user_id, category)
            .await?
            .ok_or_else(|| FinanceError::BudgetNotFound(category.to_string()))?;
        budget.limit = limit;
        self.storage.save_budget(budget.clone()).await?;
        tracing::info!("Budget for {} set to {} for user {}", category, limit, user_id);
        Ok(budget)
    }

    pub async fn delete_budget(&self, user_id: &str, category: &str) -> Result<(), FinanceError> {
        if !self.storage.delete_budget(user_id, category).await? {
            return Err(FinanceError::BudgetNotFound(category.to_string()));
        }
        tracing::info!("Deleted budget for {} for user {}", category, user_id);
        Ok(())
    }
}
