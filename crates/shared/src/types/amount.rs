//! Monetary amounts with decimal precision and a comparison tolerance.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are plain `rust_decimal::Decimal` values; this module owns the
//! tolerance used when comparing sums, plus the lenient coercion applied to
//! amounts and codes arriving from loosely typed sources.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Absolute tolerance for comparing monetary sums (0.01).
pub const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Decimal places kept on posted amounts.
pub const CENT_PLACES: u32 = 2;

/// Returns true if the amount is strictly within `EPSILON` of zero.
#[must_use]
pub fn is_negligible(amount: Decimal) -> bool {
    amount.abs() < EPSILON
}

/// Returns exactly zero for negligible amounts, the amount otherwise.
#[must_use]
pub fn snap_to_zero(amount: Decimal) -> Decimal {
    if is_negligible(amount) {
        Decimal::ZERO
    } else {
        amount
    }
}

/// Rounds an amount to whole cents using banker's rounding.
///
/// Posted lines carry cents only, so any nonzero balance is at least
/// `EPSILON` away from zero and snapping never hides real activity.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointNearestEven)
}

/// Parses a decimal from text, accepting scientific notation.
///
/// Blank or non-numeric text yields zero.
#[must_use]
pub fn parse_amount(text: &str) -> Decimal {
    let text = text.trim();
    if text.is_empty() {
        return Decimal::ZERO;
    }
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(text))
        .unwrap_or(Decimal::ZERO)
}

/// Coerces an arbitrary JSON value into an amount.
///
/// Numbers and numeric strings convert; booleans map to one and zero;
/// everything else (null, arrays, objects, junk text) becomes zero.
#[must_use]
pub fn coerce_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => parse_amount(&number.to_string()),
        Value::String(text) => parse_amount(text),
        Value::Bool(true) => Decimal::ONE,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => Decimal::ZERO,
    }
}

/// Coerces an arbitrary JSON value into a trimmed code or identifier.
#[must_use]
pub fn coerce_code(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Serde helper: deserializes any value into an amount, see [`coerce_amount`].
///
/// Pair with `#[serde(default)]` so missing fields also become zero.
pub fn deserialize_lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(Decimal::ZERO, coerce_amount))
}

/// Serde helper for optional amounts: `null` or missing stays `None`.
pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(|value| !value.is_null())
        .as_ref()
        .map(coerce_amount))
}

/// Serde helper: deserializes a string or number into a trimmed code.
pub fn deserialize_lenient_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_code).unwrap_or_default())
}

/// Serde helper for optional codes: blank values become `None`.
pub fn deserialize_optional_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .map(coerce_code)
        .filter(|code| !code.is_empty()))
}
