pub mod analytics;
pub mod bank;
pub mod budget;
pub mod category;
pub mod payment_method;
pub mod refresh_token;
pub mod transaction;
pub mod user;
