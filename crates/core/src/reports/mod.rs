//! Financial report generation.
//!
//! This module derives financial statements from a journal:
//! - Trial Balance
//! - Profit and Loss (date-ranged)
//! - Balance Sheet (point-in-time, net income folded into retained earnings)
//! - Account Ledger

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
