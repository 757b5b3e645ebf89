//! Double-entry ledger logic.
//!
//! This module implements the core ledger functionality:
//! - Domain types for accounts, lines, and journal entries
//! - The chart of accounts
//! - Entry normalization and balance validation
//! - Entry construction and canonical ordering
//! - Reference reconciliation over the journal log
//! - Per-account balances and ledger detail

pub mod balance;
pub mod chart;
pub mod entry;
pub mod error;
pub mod reconcile;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use balance::{
    AccountBalance, AccountBalanceIndex, LedgerAccount, LedgerTransaction,
    build_account_balance_index, calculate_ledger_account,
};
pub use chart::ChartOfAccounts;
pub use entry::{
    chronological_order, create_journal_entry, create_journal_entry_at, sort_journal_entries,
};
pub use error::LedgerError;
pub use reconcile::{
    JournalUpdate, apply_update, entries_for_source, remove_journal_entries_by_id,
    remove_journal_entries_by_reference, replace_journal_entries,
};
pub use types::{
    Account, AccountType, EntryMetadata, EntrySource, JournalEntry, JournalLine,
    JournalLineInput, LineAmounts, NewJournalEntry, NormalBalance,
};
pub use validation::{entries_are_balanced, normalize_lines, validate_lines};
