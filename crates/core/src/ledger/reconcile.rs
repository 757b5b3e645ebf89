//! Reference reconciliation over the journal log.
//!
//! The journal is an ordered, immutable log value. Every function here takes
//! the current log and returns a new one; nothing is mutated in place.
//! Replacing by reference is delete-then-insert, so stale and fresh postings
//! for the same source event never coexist.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::entry::sort_journal_entries;
use super::types::{EntrySource, JournalEntry};

/// A change to commit to the journal log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum JournalUpdate {
    /// Append entries as-is.
    Append(Vec<JournalEntry>),
    /// Supersede entries sharing a reference with the new ones.
    Replace(Vec<JournalEntry>),
    /// Remove every entry carrying one of the references.
    RemoveByReference(Vec<String>),
    /// Remove entries by id.
    RemoveById(Vec<String>),
}

/// Applies an update and returns the new journal.
#[must_use]
pub fn apply_update(journal: &[JournalEntry], update: JournalUpdate) -> Vec<JournalEntry> {
    match update {
        JournalUpdate::Append(entries) => {
            let mut next = journal.to_vec();
            next.extend(entries);
            sort_journal_entries(&next)
        }
        JournalUpdate::Replace(entries) => replace_journal_entries(journal, entries),
        JournalUpdate::RemoveByReference(references) => {
            remove_journal_entries_by_reference(journal, references)
        }
        JournalUpdate::RemoveById(ids) => remove_journal_entries_by_id(journal, ids),
    }
}

/// Supersedes prior postings with `new_entries`.
///
/// Removes every existing entry whose reference appears among the new
/// entries, appends the new entries, and re-sorts. An empty `new_entries`
/// returns the journal unchanged: nothing to post is not the same as
/// deleting everything.
#[must_use]
pub fn replace_journal_entries(
    journal: &[JournalEntry],
    new_entries: Vec<JournalEntry>,
) -> Vec<JournalEntry> {
    if new_entries.is_empty() {
        return journal.to_vec();
    }

    let superseded: HashSet<&str> = new_entries
        .iter()
        .filter_map(|entry| entry.reference.as_deref())
        .collect();

    let mut next: Vec<JournalEntry> = journal
        .iter()
        .filter(|entry| {
            entry
                .reference
                .as_deref()
                .is_none_or(|reference| !superseded.contains(reference))
        })
        .cloned()
        .collect();
    next.extend(new_entries);

    sort_journal_entries(&next)
}

/// Removes every entry whose reference is in `references`.
///
/// No-op for an empty reference set.
#[must_use]
pub fn remove_journal_entries_by_reference<I, S>(
    journal: &[JournalEntry],
    references: I,
) -> Vec<JournalEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let references: HashSet<String> = references
        .into_iter()
        .map(|reference| reference.as_ref().to_string())
        .collect();
    if references.is_empty() {
        return journal.to_vec();
    }

    journal
        .iter()
        .filter(|entry| {
            entry
                .reference
                .as_deref()
                .is_none_or(|reference| !references.contains(reference))
        })
        .cloned()
        .collect()
}

/// Removes entries by id.
#[must_use]
pub fn remove_journal_entries_by_id<I, S>(journal: &[JournalEntry], ids: I) -> Vec<JournalEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids: HashSet<String> = ids.into_iter().map(|id| id.as_ref().to_string()).collect();
    journal
        .iter()
        .filter(|entry| !ids.contains(&entry.id))
        .cloned()
        .collect()
}

/// Entries whose metadata points back at the given source event.
///
/// The back-reference is only compared, never resolved.
#[must_use]
pub fn entries_for_source<'a>(
    journal: &'a [JournalEntry],
    source: EntrySource,
    source_id: &str,
) -> Vec<&'a JournalEntry> {
    journal
        .iter()
        .filter(|entry| {
            entry
                .metadata
                .as_ref()
                .is_some_and(|meta| meta.source == source && meta.source_id == source_id)
        })
        .collect()
}
