use super::{FinanceService, clean};
use crate::core::errors::FinanceError;
use crate::core::models::payment_method::{
    PaymentMethod, PaymentMethodInput, PaymentMethodUpdate, UNDEFINED_PAYMENT_METHOD,
};
use crate::infrastructure::storage::Storage;
use uuid::Uuid;

const NAME_MAX_LENGTH: usize = 100;
const CARD_TYPES: [&str; 2] = ["credit", "debit"];

impl<S: Storage> FinanceService<S> {
    fn validate_card_type(&self, card_type: Option<&str>) -> Result<(), FinanceError> {
        match card_type {
            Some(t) if !CARD_TYPES.contains(&t) => Err(FinanceError::invalid_input(
                "card_type",
                "card_type must be credit or debit",
            )),
            _ => Ok(()),
        }
    }

    async fn owned_payment_method(&self, user_id: &str, method_id: &str, denied: &str) -> Result<PaymentMethod, FinanceError> {
        let method = self
            .storage
            .get_payment_method(method_id)
            .await?
            .ok_or_else(|| FinanceError::PaymentMethodNotFound(method_id.to_string()))?;
        if method.user_id != user_id {
            return Err(FinanceError::Forbidden(denied.to_string()));
        }
        Ok(method)
    }

    pub async fn list_payment_methods(&self, user_id: &str) -> Result<Vec<PaymentMethod>, FinanceError> {
        self.storage.get_user_payment_methods(user_id).await
    }

    pub async fn create_payment_method(&self, user_id: &str, input: PaymentMethodInput) -> Result<PaymentMethod, FinanceError> {
        let name = input.name.trim().to_string();
        self.validate_string_input("name", &name, NAME_MAX_LENGTH)?;
        let card_type = clean(input.card_type);
        self.validate_card_type(card_type.as_deref())?;
        if let Some(last4) = &input.last4 {
            if last4.chars().count() != 4 {
                return Err(FinanceError::invalid_input("last4", "last4 must be exactly 4 characters"));
            }
        }
        if self.storage.find_payment_method(user_id, &name).await?.is_some() {
            return Err(FinanceError::BadRequest(
                "Payment method with this name already exists.".to_string(),
            ));
        }

        let method = PaymentMethod {
            id: Uuid::new_v4().to_string(),
            name,
            bank: clean(input.bank),
            card_type,
            last4: input.last4,
            icon: clean(input.icon),
            user_id: user_id.to_string(),
        };
        self.storage.save_payment_method(method.clone()).await?;
        tracing::info!("Created payment method {} ({}) for user {}", method.name, method.id, user_id);
        Ok(method)
    }

    pub async fn get_payment_method(&self, user_id: &str, method_id: &str) -> Result<PaymentMethod, FinanceError> {
        self.storage
            .get_payment_method(method_id)
            .await?
            .filter(|m| m.user_id == user_id)
            .ok_or_else(|| FinanceError::PaymentMethodNotFound(method_id.to_string()))
    }

    pub async fn update_payment_method(
        &self,
        user_id: &str,
        method_id: &str,
        update: PaymentMethodUpdate,
    ) -> Result<PaymentMethod, FinanceError> {
        let mut method = self
            .owned_payment_method(user_id, method_id, "Not authorized to update this method")
            .await?;

        let card_type = clean(update.card_type);
        self.validate_card_type(card_type.as_deref())?;
        if let Some(name) = update.name {
            let name = name.trim().to_string();
            self.validate_string_input("name", &name, NAME_MAX_LENGTH)?;
            if let Some(existing) = self.storage.find_payment_method(user_id, &name).await? {
                if existing.id != method.id {
                    return Err(FinanceError::BadRequest(
                        "Payment method with this name already exists.".to_string(),
                    ));
                }
            }
            method.name = name;
        }
        if let Some(bank) = clean(update.bank) {
            method.bank = Some(bank);
        }
        if card_type.is_some() {
            method.card_type = card_type;
        }
        if let Some(icon) = clean(update.icon) {
            method.icon = Some(icon);
        }

        self.storage.save_payment_method(method.clone()).await?;
        tracing::info!("Updated payment method {} for user {}", method.id, user_id);
        Ok(method)
    }

    /// Deletes a payment method; its transactions fall back to `Undefined`.
    pub async fn delete_payment_method(&self, user_id: &str, method_id: &str) -> Result<(), FinanceError> {
        let method = self.owned_payment_method(user_id, method_id, "Forbidden").await?;
        let reassigned = self
            .storage
            .reassign_payment_method(user_id, &method.name, UNDEFINED_PAYMENT_METHOD)
            .await?;
        self.storage.delete_payment_method(&method.id).await?;
        tracing::info!(
            "Deleted payment method {} for user {}, {} transactions moved to {}",
            method.name,
            user_id,
            reassigned,
            UNDEFINED_PAYMENT_METHOD
        );
        Ok(())
    }
}
