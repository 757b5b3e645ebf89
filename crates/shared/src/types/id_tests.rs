use super::*;
use chrono::TimeZone;

#[test]
fn test_entry_id_shape() {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let id = generate_entry_id_at("je", at);
    let parts: Vec<&str> = id.split('-').collect();

    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "je");
    assert_eq!(parts[1], at.timestamp_millis().to_string());
    assert_eq!(parts[2].len(), RANDOM_SUFFIX_LEN);
    assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_blank_prefix_falls_back_to_default() {
    let id = generate_entry_id("  ");
    assert!(id.starts_with("je-"));
}

#[test]
fn test_entry_ids_are_unique() {
    let at = Utc::now();
    let first = generate_entry_id_at("je", at);
    let second = generate_entry_id_at("je", at);
    assert_ne!(first, second);
}
