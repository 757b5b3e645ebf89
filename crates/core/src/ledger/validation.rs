//! Business rule validation for journal lines.

use rust_decimal::Decimal;
use tillbook_shared::types::{is_negligible, round_to_cents};

use super::error::LedgerError;
use super::types::{JournalLine, JournalLineInput, LineAmounts};

/// Normalizes raw input lines.
///
/// Account codes are trimmed and amounts are rounded to cents. Lines with
/// neither a debit nor a credit left carry no information and are dropped.
/// Signs are kept, so negative values reach [`validate_lines`] and are
/// rejected there.
#[must_use]
pub fn normalize_lines(inputs: &[JournalLineInput]) -> Vec<JournalLine> {
    inputs
        .iter()
        .map(|input| JournalLine {
            account_code: input.account_code.trim().to_string(),
            debit: round_to_cents(input.debit),
            credit: round_to_cents(input.credit),
        })
        .filter(|line| !(line.debit.is_zero() && line.credit.is_zero()))
        .collect()
}

/// Sums the debits and credits of a set of lines.
#[must_use]
pub fn line_totals<L: LineAmounts>(lines: &[L]) -> (Decimal, Decimal) {
    lines.iter().fold((Decimal::ZERO, Decimal::ZERO), |(debit, credit), line| {
        (debit + line.debit_amount(), credit + line.credit_amount())
    })
}

/// Returns true if total debits and credits differ by less than `EPSILON`.
///
/// Works on raw input lines as well, so a manual entry form can check
/// balance before submitting.
#[must_use]
pub fn entries_are_balanced<L: LineAmounts>(lines: &[L]) -> bool {
    let (debit, credit) = line_totals(lines);
    is_negligible(debit - credit)
}

/// Validates a set of normalized lines.
///
/// # Errors
///
/// - [`LedgerError::NoLines`] when the set is empty
/// - [`LedgerError::NegativeAmount`] when a line has a negative side
/// - [`LedgerError::MixedLine`] when a line has both a debit and a credit
/// - [`LedgerError::Unbalanced`] when the totals differ by `EPSILON` or more
pub fn validate_lines(lines: &[JournalLine]) -> Result<(), LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::NoLines);
    }

    for line in lines {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount {
                account_code: line.account_code.clone(),
            });
        }
        if !line.debit.is_zero() && !line.credit.is_zero() {
            return Err(LedgerError::MixedLine {
                account_code: line.account_code.clone(),
            });
        }
    }

    let (debit, credit) = line_totals(lines);
    if !is_negligible(debit - credit) {
        return Err(LedgerError::Unbalanced { debit, credit });
    }

    Ok(())
}
