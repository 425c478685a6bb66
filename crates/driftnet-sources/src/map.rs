//! Field-fallback helpers for loosely-shaped upstream items.
//!
//! Providers describe their normalization as priority-ordered key lists;
//! the first present, usable value wins.

use serde_json::Value;

/// First present, non-empty string among `keys`, in priority order.
///
/// Numeric values are rendered to strings so sources with numeric ids
/// normalize cleanly.
pub(crate) fn first_string(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match item.get(key) {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// First numeric value among `keys`; absent or unusable values count as zero.
pub(crate) fn first_count(item: &Value, keys: &[&str]) -> u64 {
    opt_count(item, keys).unwrap_or(0)
}

/// Like [`first_count`], but a fully absent field stays absent.
///
/// Accepts JSON numbers and numeric strings (some upstreams return counts as
/// strings); negative values clamp to zero.
pub(crate) fn opt_count(item: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter()
        .find_map(|key| item.get(key).and_then(count_value))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .map(|float| if float > 0.0 { float as u64 } else { 0 })
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
