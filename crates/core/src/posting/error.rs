//! Posting error types.

use thiserror::Error;
use tillbook_shared::AppError;

use crate::ledger::LedgerError;

/// A business event that could not be turned into a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostingError {
    /// The generated entry failed ledger validation.
    #[error("Cannot post {reference}: {source}")]
    InvalidEntry {
        /// Reference key of the entry that failed.
        reference: String,
        /// Underlying validation failure.
        source: LedgerError,
    },
}

impl PostingError {
    /// Reference key of the event half that failed.
    #[must_use]
    pub fn reference(&self) -> &str {
        match self {
            Self::InvalidEntry { reference, .. } => reference,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEntry { source, .. } => source.error_code(),
        }
    }
}

impl From<PostingError> for AppError {
    fn from(err: PostingError) -> Self {
        Self::Validation(err.to_string())
    }
}
