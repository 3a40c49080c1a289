//! Numeric coercion for user-entered values.
//!
//! Form inputs arrive as strings (or sometimes numbers, or nothing at all).
//! Whatever cannot be read as a number becomes `0.0`; it never surfaces as an
//! error or as `NaN`.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// A field value as submitted by a form or API client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// A JSON number.
    Number(f64),
    /// Text typed into an input box.
    Text(String),
    /// JSON `null`.
    Empty,
    /// Any other JSON value (booleans, arrays, objects).
    #[serde(skip_serializing)]
    Other(IgnoredAny),
}

impl RawNumber {
    /// Reads this value as a number, falling back to `0.0`.
    #[must_use]
    pub fn coerce(&self) -> f64 {
        match self {
            Self::Number(value) if !value.is_nan() => positive_zero(*value),
            Self::Number(_) | Self::Empty | Self::Other(_) => 0.0,
            Self::Text(text) => coerce_number(text),
        }
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Parses the leading decimal number of `raw`, returning `0.0` when there is
/// none.
///
/// Leading whitespace is skipped and trailing garbage is ignored, so
/// `"12.5 hrs"` reads as `12.5` while `""`, `"abc"` and `"."` read as `0.0`.
/// A leading `Infinity` (optionally signed) reads as infinity.
#[must_use]
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let len = decimal_prefix_len(trimmed);

    if len == 0 {
        return infinity_prefix(trimmed).unwrap_or(0.0);
    }

    trimmed[..len]
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
        .map_or(0.0, positive_zero)
}

/// Maps `-0.0` to `0.0` and leaves every other value alone.
const fn positive_zero(value: f64) -> f64 {
    value + 0.0
}

/// Length in bytes of the longest prefix of `s` shaped like
/// `[+-]digits[.digits][(e|E)[+-]digits]`, or `0` if there is no digit
/// before the exponent.
fn decimal_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;

    if bytes.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while bytes.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

fn infinity_prefix(s: &str) -> Option<f64> {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    rest.starts_with("Infinity").then_some(sign * f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_coerces(raw: &str, expected: f64) {
        let actual = coerce_number(raw);
        assert!(
            (actual - expected).abs() < 1e-12,
            "{raw:?} coerced to {actual}, expected {expected}"
        );
    }

    #[test]
    fn plain_numbers() {
        assert_coerces("1000", 1000.0);
        assert_coerces("3.5", 3.5);
        assert_coerces("-2", -2.0);
        assert_coerces("+7", 7.0);
        assert_coerces(".5", 0.5);
        assert_coerces("5.", 5.0);
        assert_coerces("1e3", 1000.0);
        assert_coerces("2.5E-1", 0.25);
    }

    #[test]
    fn unparseable_is_zero() {
        assert_coerces("", 0.0);
        assert_coerces("   ", 0.0);
        assert_coerces("abc", 0.0);
        assert_coerces(".", 0.0);
        assert_coerces("-", 0.0);
        assert_coerces("NaN", 0.0);
        assert_coerces("$500", 0.0);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_coerces("  12.5 hrs", 12.5);
        assert_coerces("15%", 15.0);
        assert_coerces("1e", 1.0);
        assert_coerces("1e+", 1.0);
        assert_coerces("3.2.1", 3.2);
    }

    #[test]
    fn infinity_prefix_is_read() {
        assert!(coerce_number("Infinity").is_infinite());
        assert!(coerce_number("-Infinity").is_sign_negative());
        assert_coerces("inf", 0.0);
    }

    #[test]
    fn negative_zero_reads_as_zero() {
        assert!(coerce_number("-0").is_sign_positive());
        assert!(coerce_number("-0.0e5").is_sign_positive());
        assert!(RawNumber::Number(-0.0).coerce().is_sign_positive());
        assert!(coerce_number("-0.5").is_sign_negative());
    }

    #[test]
    fn raw_number_variants() {
        assert!((RawNumber::from(4.5).coerce() - 4.5).abs() < f64::EPSILON);
        assert!((RawNumber::from("8").coerce() - 8.0).abs() < f64::EPSILON);
        assert!(RawNumber::from("").coerce().abs() < f64::EPSILON);
        assert!(RawNumber::Empty.coerce().abs() < f64::EPSILON);
        assert!(RawNumber::Number(f64::NAN).coerce().abs() < f64::EPSILON);
    }

    #[test]
    fn raw_number_deserializes_from_json() {
        let values: Vec<RawNumber> = serde_json::from_str(r#"[1.5, "2", null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                RawNumber::Number(1.5),
                RawNumber::Text("2".to_string()),
                RawNumber::Empty,
            ]
        );
    }

    #[test]
    fn other_json_values_read_as_zero() {
        let values: Vec<RawNumber> =
            serde_json::from_str(r#"[true, false, [1], {"a": 1}]"#).unwrap();
        assert_eq!(values.len(), 4);
        for value in values {
            assert!(matches!(value, RawNumber::Other(_)), "{value:?}");
            assert!(value.coerce().abs() < f64::EPSILON);
        }
    }
}
