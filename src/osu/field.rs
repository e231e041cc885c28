//! Culture-invariant primitive field parsing and formatting.
//!
//! Beatmap numbers always use a period decimal separator and no grouping,
//! regardless of the host locale. Rust's `FromStr`/`Display` for the
//! primitive types already are locale-independent, so this module mostly
//! pins that behavior down behind named helpers and attaches offending-line
//! context to failures.

use std::str::FromStr;

use super::{FormatError, Result};

/// Picks field `index` out of a comma-split record, failing with the field
/// name and offending line when the record is too short.
pub(crate) fn required<'a>(
    parts: &[&'a str],
    index: usize,
    field: &'static str,
    line: &str,
) -> Result<&'a str> {
    parts.get(index).copied().ok_or_else(|| FormatError::MissingField {
        field,
        line: line.to_owned(),
    })
}

/// Parses a numeric field under invariant formatting.
///
/// # Errors
///
/// Fails with [`FormatError::InvalidNumber`] naming `field` and carrying
/// the whole offending `line`.
pub fn parse_number<T: FromStr>(field: &'static str, line: &str, text: &str) -> Result<T> {
    text.trim().parse().map_err(|_| FormatError::InvalidNumber {
        field,
        line: line.to_owned(),
    })
}

/// The "try parse" variant for fields with documented fallback defaults:
/// returns `None` instead of failing.
#[must_use]
pub fn try_parse<T: FromStr>(text: &str) -> Option<T> {
    text.trim().parse().ok()
}

/// Formats a double with invariant culture semantics: shortest decimal
/// form that round-trips, period separator, no grouping, no exponent.
/// Integral values print without a decimal point (`12`, not `12.0`).
#[must_use]
pub fn format_f64(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_invariant() {
        assert_eq!(parse_number::<f64>("x", "l", "1.5"), Ok(1.5));
        assert_eq!(parse_number::<f64>("x", "l", " -100 "), Ok(-100.0));
        assert!(parse_number::<f64>("x", "l", "1,5").is_err());
        assert!(parse_number::<i32>("x", "l", "1.0").is_err());
    }

    #[test]
    fn parse_failure_carries_line() {
        let err = parse_number::<f64>("beatLength", "1000,abc", "abc").unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidNumber {
                field: "beatLength",
                line: "1000,abc".to_owned(),
            }
        );
        assert_eq!(err.line(), "1000,abc");
    }

    #[test]
    fn format_shortest_roundtrip() {
        assert_eq!(format_f64(1.5), "1.5");
        assert_eq!(format_f64(-100.0), "-100");
        assert_eq!(format_f64(0.75), "0.75");
        assert_eq!(format_f64(279.999999999999), "279.999999999999");
    }

    #[test]
    fn try_parse_fallback() {
        assert_eq!(try_parse::<f64>("70"), Some(70.0));
        assert_eq!(try_parse::<f64>(""), None);
        assert_eq!(try_parse::<u32>("-1"), None);
    }
}
