use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Budget {
    pub id: String,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub limit: Decimal,
    #[schema(value_type = String, example = "2025-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct BudgetInput {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub limit: Decimal,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct BudgetUpdate {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub limit: Decimal,
}
