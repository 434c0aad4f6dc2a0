use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name assigned to transactions whose payment method was deleted.
pub const UNDEFINED_PAYMENT_METHOD: &str = "Undefined";

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub bank: Option<String>,
    /// `credit` or `debit`
    pub card_type: Option<String>,
    pub last4: Option<String>,
    pub icon: Option<String>,
    #[serde(skip_serializing)]
    pub user_id: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct PaymentMethodInput {
    pub name: String,
    pub bank: Option<String>,
    pub card_type: Option<String>,
    pub last4: Option<String>,
    pub icon: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct PaymentMethodUpdate {
    pub name: Option<String>,
    pub bank: Option<String>,
    pub card_type: Option<String>,
    pub icon: Option<String>,
}
