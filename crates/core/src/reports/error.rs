//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;
use tillbook_shared::AppError;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Account not found in the chart.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            ReportError::InvalidDateRange { .. } => Self::Validation(err.to_string()),
        }
    }
}
