//! Decimal helpers shared by the balance and analytics code. Sums and ratios
//! use checked arithmetic and report overflow as an error.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::errors::FinanceError;

/// Largest amount, limit or opening balance a client may submit.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

pub fn max_amount() -> Decimal {
    Decimal::from(MAX_AMOUNT)
}

pub fn overflow() -> FinanceError {
    FinanceError::InternalServerError("Amount overflow".to_string())
}

/// Rounds to cents, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal, FinanceError> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value).ok_or_else(overflow))
}

/// `amount` as a percentage of `total`, rounded to two places. Zero when
/// `total` is zero.
pub fn percent(amount: Decimal, total: Decimal) -> Result<Decimal, FinanceError> {
    if total.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let ratio = amount
        .checked_div(total)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(overflow)?;
    Ok(round_money(ratio))
}

/// Converts an aggregator float into a decimal using its shortest
/// representation, so `12.1` becomes `12.1` rather than its binary expansion.
/// `None` for NaN, infinities and values beyond the decimal range.
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}
