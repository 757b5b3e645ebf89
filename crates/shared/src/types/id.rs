//! Journal entry identifiers.
//!
//! Entry ids have the shape `prefix-<unix millis>-<random>`. The timestamp keeps
//! ids roughly creation-ordered for humans; ordering inside the engine never
//! depends on it.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Default prefix for generated journal entry ids.
pub const DEFAULT_ENTRY_PREFIX: &str = "je";

/// Length of the random suffix in a generated id.
const RANDOM_SUFFIX_LEN: usize = 8;

/// Generates a new entry id using the current time.
#[must_use]
pub fn generate_entry_id(prefix: &str) -> String {
    generate_entry_id_at(prefix, Utc::now())
}

/// Generates a new entry id for the given timestamp.
#[must_use]
pub fn generate_entry_id_at(prefix: &str, at: DateTime<Utc>) -> String {
    let prefix = match prefix.trim() {
        "" => DEFAULT_ENTRY_PREFIX,
        trimmed => trimmed,
    };
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{prefix}-{}-{}",
        at.timestamp_millis(),
        &random[..RANDOM_SUFFIX_LEN]
    )
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
