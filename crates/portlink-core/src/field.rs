//! Length bounds for name and type fields.
//!
//! Every textual field of the record store (module names, port names, port
//! types and destination references) holds at most [`MAX_FIELD_LEN`]
//! characters. Values arriving from outside (reference tokens, the backing
//! file) are cut down at that boundary instead of being rejected, which keeps
//! files written by older tooling loadable.

use log::warn;

/// Maximum number of characters stored in a single field.
pub const MAX_FIELD_LEN: usize = 63;

/// Returns the longest prefix of `value` that fits in a field.
///
/// The cut always lands on a character boundary.
///
/// # Examples
///
/// ```
/// use portlink_core::field::{MAX_FIELD_LEN, truncate};
///
/// assert_eq!(truncate("short"), "short");
///
/// let long = "x".repeat(100);
/// assert_eq!(truncate(&long).len(), MAX_FIELD_LEN);
/// ```
pub fn truncate(value: &str) -> &str {
    value
        .char_indices()
        .nth(MAX_FIELD_LEN)
        .map_or(value, |(idx, _)| &value[..idx])
}

/// Bounds `value` to [`MAX_FIELD_LEN`] characters, logging when it was cut.
///
/// # Arguments
///
/// * `field` - Human-readable field name used in the log record
/// * `value` - The raw field value
pub fn bounded(field: &'static str, value: &str) -> String {
    let kept = truncate(value);
    if kept.len() != value.len() {
        warn!(field = field, original = value, kept = kept; "Field exceeds maximum length, truncating");
    }
    kept.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_value_unchanged() {
        assert_eq!(truncate(""), "");
        assert_eq!(truncate("Mod"), "Mod");
    }

    #[test]
    fn test_truncate_exact_length_unchanged() {
        let value = "a".repeat(MAX_FIELD_LEN);
        assert_eq!(truncate(&value), value);
    }

    #[test]
    fn test_truncate_long_value() {
        let value = "b".repeat(MAX_FIELD_LEN + 10);
        assert_eq!(truncate(&value), "b".repeat(MAX_FIELD_LEN));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let value = "é".repeat(MAX_FIELD_LEN + 1);
        let kept = truncate(&value);

        assert_eq!(kept.chars().count(), MAX_FIELD_LEN);
        assert_eq!(kept, "é".repeat(MAX_FIELD_LEN));
    }

    #[test]
    fn test_bounded_returns_owned_prefix() {
        let value = "c".repeat(MAX_FIELD_LEN * 2);
        assert_eq!(bounded("module", &value), "c".repeat(MAX_FIELD_LEN));
        assert_eq!(bounded("module", "ok"), "ok");
    }
}
