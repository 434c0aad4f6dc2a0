//! Route handlers, one module per resource. Protected handlers receive the
//! authenticated [`User`](crate::core::models::user::User) through
//! `Extension`, inserted by the auth middleware.

pub mod account;
pub mod ai;
pub mod analytics;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod payment_methods;
pub mod plaid;
pub mod root;
pub mod transactions;
