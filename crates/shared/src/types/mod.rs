//! Common types used across the workspace.

pub mod amount;
pub mod date;
pub mod id;

pub use amount::{CENT_PLACES, EPSILON, is_negligible, round_to_cents, snap_to_zero};
pub use date::parse_date;
pub use id::{DEFAULT_ENTRY_PREFIX, generate_entry_id, generate_entry_id_at};
