//! Display formatting for calculator figures.

/// Maximum number of fraction digits shown.
const MAX_FRACTION_DIGITS: usize = 3;

/// Formats `value` the way the results panel shows it: comma-grouped
/// thousands and at most three fraction digits, trailing zeros dropped.
///
/// `1_411_975.0` renders as `"1,411,975"` and `866.25` as `"866.25"`.
#[must_use]
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }

    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(1_411_975.0), "1,411,975");
        assert_eq!(format_amount(18_683_000.0), "18,683,000");
    }

    #[test]
    fn trims_fraction_digits() {
        assert_eq!(format_amount(866.25), "866.25");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(1.23456), "1.235");
        assert_eq!(format_amount(1234.0001), "1,234");
    }

    #[test]
    fn negatives_keep_sign() {
        assert_eq!(format_amount(-1500.5), "-1,500.5");
        assert_eq!(format_amount(-0.0001), "0");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_amount(f64::INFINITY), "∞");
        assert_eq!(format_amount(f64::NEG_INFINITY), "-∞");
        assert_eq!(format_amount(f64::NAN), "NaN");
    }
}
