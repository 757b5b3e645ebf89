//! Accounting date parsing.
//!
//! Source records carry either plain ISO dates (`2024-03-01`) or full
//! timestamps (`2024-03-01T10:15:00Z`). Both reduce to a calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, de::Error as _};

/// Parses an ISO date or timestamp into a calendar date.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|timestamp| timestamp.date())
}

/// Serde helper: a required date, accepting timestamps.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_date(&text).ok_or_else(|| D::Error::custom(format!("invalid date: {text}")))
}

/// Serde helper: an optional date; blank or unparseable values become `None`.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.as_deref().and_then(parse_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date("2024-03-01"), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn test_parse_timestamps() {
        assert_eq!(parse_date("2024-03-01T10:15:00Z"), Some(ymd(2024, 3, 1)));
        assert_eq!(parse_date("2024-03-01T23:59:59.999"), Some(ymd(2024, 3, 1)));
        assert_eq!(
            parse_date("2024-03-01T10:15:00+07:00"),
            Some(ymd(2024, 3, 1))
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
    }
}
