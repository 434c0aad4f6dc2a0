use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<DateTime<Utc>>,
    /// Absent for accounts created through Google sign-in
    pub hashed_password: Option<String>,
    pub google_id: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Balance declared at registration, the base of every recomputation
    pub opening_balance: Decimal,
    /// Cached `opening_balance` plus the signed sum of all transactions
    pub balance: Decimal,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = Option<String>, example = "1990-04-12T00:00:00Z")]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub initial_balance: Option<Decimal>,
}
