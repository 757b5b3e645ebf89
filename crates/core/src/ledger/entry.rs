//! Journal entry construction and canonical ordering.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tillbook_shared::types::{DEFAULT_ENTRY_PREFIX, generate_entry_id_at};

use super::error::LedgerError;
use super::types::{JournalEntry, NewJournalEntry};
use super::validation::{normalize_lines, validate_lines};

/// Creates a validated journal entry stamped with the current time.
///
/// # Errors
///
/// Returns [`LedgerError`] if the lines are empty after normalization,
/// contain a negative or two-sided line, or do not balance.
pub fn create_journal_entry(input: NewJournalEntry) -> Result<JournalEntry, LedgerError> {
    create_journal_entry_at(input, Utc::now())
}

/// Creates a validated journal entry stamped with `created_at`.
///
/// An id of the form `je-<millis>-<random>` is generated when the input
/// does not carry one.
///
/// # Errors
///
/// Same as [`create_journal_entry`].
pub fn create_journal_entry_at(
    input: NewJournalEntry,
    created_at: DateTime<Utc>,
) -> Result<JournalEntry, LedgerError> {
    let lines = normalize_lines(&input.entries);
    validate_lines(&lines)?;

    let id = input
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| generate_entry_id_at(DEFAULT_ENTRY_PREFIX, created_at));

    Ok(JournalEntry {
        id,
        date: input.date,
        description: input.description,
        lines,
        reference: input.reference,
        metadata: input.metadata,
        created_at,
    })
}

/// Canonical chronological order: date, then creation time, then id.
#[must_use]
pub fn chronological_order(a: &JournalEntry, b: &JournalEntry) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Returns a copy of the journal in canonical chronological order.
///
/// Every running-balance computation walks the journal in this order.
#[must_use]
pub fn sort_journal_entries(journal: &[JournalEntry]) -> Vec<JournalEntry> {
    let mut sorted = journal.to_vec();
    sorted.sort_by(chronological_order);
    sorted
}
