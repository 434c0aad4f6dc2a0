use super::FinanceService;
use crate::core::errors::FinanceError;
use crate::core::models::user::User;
use crate::infrastructure::storage::Storage;
use rust_decimal::Decimal;

const OLD_PASSWORD_MIN_LENGTH: usize = 6;
const NEW_PASSWORD_MIN_LENGTH: usize = 8;

impl<S: Storage> FinanceService<S> {
    pub async fn delete_account(&self, user: &User) -> Result<(), FinanceError> {
        self.storage.purge_user(&user.id).await?;
        tracing::info!("Deleted account {} and its data", user.id);
        Ok(())
    }

    pub async fn update_password(&self, user: &User, old_password: &str, new_password: &str) -> Result<(), FinanceError> {
        if old_password.chars().count() < OLD_PASSWORD_MIN_LENGTH {
            return Err(FinanceError::invalid_input(
                "old_password",
                format!("old_password must be at least {} characters", OLD_PASSWORD_MIN_LENGTH),
            ));
        }
        if new_password.chars().count() < NEW_PASSWORD_MIN_LENGTH {
            return Err(FinanceError::invalid_input(
                "new_password",
                format!("new_password must be at least {} characters", NEW_PASSWORD_MIN_LENGTH),
            ));
        }
        if old_password == new_password {
            return Err(FinanceError::BadRequest(
                "New password must be different from the old one".to_string(),
            ));
        }

        // `user` may carry a stale balance
        let mut current = self
            .storage
            .get_user(&user.id)
            .await?
            .ok_or_else(|| FinanceError::Unauthorized("User not found".to_string()))?;
        let matches = current
            .hashed_password
            .as_deref()
            .is_some_and(|hashed| self.hasher.verify(old_password, hashed));
        if !matches {
            return Err(FinanceError::Unauthorized("Old password is incorrect".to_string()));
        }

        current.hashed_password = Some(self.hasher.hash(new_password)?);
        self.storage.update_user(current).await?;
        tracing::info!("Password updated for user {}", user.id);
        Ok(())
    }

    pub async fn get_balance(&self, user_id: &str) -> Result<Decimal, FinanceError> {
        let user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| FinanceError::NotFound("User not found".to_string()))?;
        tracing::debug!("Balance queried for user {}", user_id);
        Ok(user.balance)
    }
}
