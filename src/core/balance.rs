use rust_decimal::Decimal;

use crate::core::errors::FinanceError;
use crate::core::models::bank::BankTransaction;
use crate::core::models::transaction::Transaction;
use crate::core::money::{checked_sum, overflow};

/// Recomputes a balance from the full ledger: the opening balance plus every
/// manual transaction and every imported bank transaction, signed.
pub fn ledger_balance(
    opening: Decimal,
    manual: &[Transaction],
    bank: &[BankTransaction],
) -> Result<Decimal, FinanceError> {
    let manual_total = checked_sum(manual.iter().map(Transaction::signed_amount))?;
    let bank_amounts = bank
        .iter()
        .map(BankTransaction::signed_amount)
        .collect::<Result<Vec<_>, _>>()?;
    let bank_total = checked_sum(bank_amounts)?;
    opening
        .checked_add(manual_total)
        .and_then(|b| b.checked_add(bank_total))
        .ok_or_else(overflow)
}
