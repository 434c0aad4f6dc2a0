pub mod analytics;
pub mod balance;
pub mod errors;
pub mod models;
pub mod money;
pub mod services;
