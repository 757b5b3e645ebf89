//! Ledger error types.
//!
//! These are the hard validation failures of the engine: they reject a
//! single journal entry (or a malformed chart of accounts) synchronously and
//! are meant to be surfaced to whoever submitted the input.

use rust_decimal::Decimal;
use thiserror::Error;
use tillbook_shared::AppError;

/// Errors that can occur while constructing ledger data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Entry Validation Errors ==========
    /// No line carries a nonzero amount after normalization.
    #[error("Journal entry requires at least one line item.")]
    NoLines,

    /// Total debits and credits differ by the tolerance or more.
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// A line carries a negative debit or credit.
    #[error("Line for account {account_code} has a negative amount")]
    NegativeAmount {
        /// Account code of the offending line.
        account_code: String,
    },

    /// A line carries both a debit and a credit.
    #[error("Line for account {account_code} must specify either debit or credit, not both")]
    MixedLine {
        /// Account code of the offending line.
        account_code: String,
    },

    // ========== Chart of Accounts Errors ==========
    /// Two chart rows share a code.
    #[error("Duplicate account code in chart of accounts: {0}")]
    DuplicateAccountCode(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoLines => "NO_LINES",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::MixedLine { .. } => "MIXED_LINE",
            Self::DuplicateAccountCode(_) => "DUPLICATE_ACCOUNT_CODE",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::Validation(err.to_string())
    }
}
