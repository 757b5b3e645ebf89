//! Core business logic for Tillbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every function takes the journal and chart of accounts as values and returns
//! new data; nothing here holds the journal as shared state.
//!
//! # Modules
//!
//! - `ledger` - Entries, validation, reconciliation, and account balances
//! - `posting` - Translation of sales, expenses, and purchase orders into entries
//! - `reports` - Trial balance, profit and loss, and balance sheet

pub mod ledger;
pub mod posting;
pub mod reports;
