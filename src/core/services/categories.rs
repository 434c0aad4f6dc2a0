use super::{FinanceService, clean};
use crate::core::errors::FinanceError;
use crate::core::models::category::{Category, CategoryInput, CategoryUpdate, UNCATEGORIZED};
use crate::infrastructure::storage::Storage;
use uuid::Uuid;

const NAME_MAX_LENGTH: usize = 50;
const ICON_MAX_LENGTH: usize = 10;

/// `#RRGGBB`
fn is_hex_color(value: &str) -> bool {
    value.len() == 7 && value.starts_with('#') && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl<S: Storage> FinanceService<S> {
    fn validate_category_fields(&self, icon: Option<&str>, color: Option<&str>) -> Result<(), FinanceError> {
        self.validate_optional_length("icon", icon, ICON_MAX_LENGTH)?;
        if let Some(color) = color {
            if !is_hex_color(color) {
                return Err(FinanceError::invalid_input(
                    "color",
                    "color must be a HEX color code (e.g. #FF5733)",
                ));
            }
        }
        Ok(())
    }

    async fn ensure_unique_category(&self, user_id: &str, name: &str, except_id: Option<&str>) -> Result<(), FinanceError> {
        if let Some(existing) = self.storage.find_user_category(user_id, name).await? {
            if Some(existing.id.as_str()) != except_id {
                return Err(FinanceError::BadRequest(
                    "Category with this name already exists.".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>, FinanceError> {
        self.storage.get_categories_for_user(user_id).await
    }

    pub async fn create_category(&self, user_id: &str, input: CategoryInput) -> Result<Category, FinanceError> {
        let name = input.name.trim().to_string();
        self.validate_string_input("name", &name, NAME_MAX_LENGTH)?;
        let icon = clean(input.icon);
        let color = clean(input.color);
        self.validate_category_fields(icon.as_deref(), color.as_deref())?;
        self.ensure_unique_category(user_id, &name, None).await?;

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name,
            icon,
            color,
            user_id: Some(user_id.to_string()),
            is_default: false,
        };
        self.storage.save_category(category.clone()).await?;
        tracing::info!("Created category {} ({}) for user {}", category.name, category.id, user_id);
        Ok(category)
    }

    /// Only the user's own categories are visible by id.
    pub async fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category, FinanceError> {
        self.storage
            .get_category(category_id)
            .await?
            .filter(|c| c.is_owned_by(user_id))
            .ok_or_else(|| FinanceError::CategoryNotFound(category_id.to_string()))
    }

    pub async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category, FinanceError> {
        let mut category = self
            .storage
            .get_category(category_id)
            .await?
            .ok_or_else(|| FinanceError::CategoryNotFound(category_id.to_string()))?;
        if !category.is_owned_by(user_id) {
            return Err(FinanceError::Forbidden(
                "Not authorized to update this category".to_string(),
            ));
        }

        let icon = clean(update.icon);
        let color = clean(update.color);
        self.validate_category_fields(icon.as_deref(), color.as_deref())?;
        if let Some(name) = update.name {
            let name = name.trim().to_string();
            self.validate_string_input("name", &name, NAME_MAX_LENGTH)?;
            self.ensure_unique_category(user_id, &name, Some(&category.id)).await?;
            category.name = name;
        }
        if icon.is_some() {
            category.icon = icon;
        }
        if color.is_some() {
            category.color = color;
        }

        self.storage.save_category(category.clone()).await?;
        tracing::info!("Updated category {} for user {}", category.id, user_id);
        Ok(category)
    }

    /// Deletes a user category; its transactions fall back to `Uncategorized`.
    pub async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<(), FinanceError> {
        let category = self
            .storage
            .get_category(category_id)
            .await?
            .ok_or_else(|| FinanceError::CategoryNotFound(category_id.to_string()))?;
        if !category.is_owned_by(user_id) {
            return Err(FinanceError::Forbidden(
                "You are not authorized to delete this category".to_string(),
            ));
        }

        let reassigned = self
            .storage
            .reassign_category(user_id, &category.name, UNCATEGORIZED)
            .await?;
        self.storage.delete_category(&category.id).await?;
        tracing::info!(
            "Deleted category {} for user {}, {} transactions moved to {}",
            category.name,
            user_id,
            reassigned,
            UNCATEGORIZED
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::is_hex_color;

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#FF5733"));
        assert!(is_hex_color("#9ca3af"));
        assert!(!is_hex_color("FF5733"));
        assert!(!is_hex_color("#FF573"));
        assert!(!is_hex_color("#GG5733"));
    }
}
