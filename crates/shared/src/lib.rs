//! Shared types, errors, and configuration for Tillbook.
//!
//! This crate provides common pieces used by the ledger engine:
//! - Decimal amounts with the comparison tolerance
//! - Journal entry id generation
//! - Application-wide error types
//! - Configuration management
//! - Tracing setup

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::{AccountCodes, AppConfig, LedgerConfig};
pub use error::{AppError, AppResult};
