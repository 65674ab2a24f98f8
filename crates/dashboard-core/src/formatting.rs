//! Number, currency and quantity formatting for the dashboard, plus the
//! decimal rounding shared by the aggregation code.

/// Currency prefix used for every monetary figure.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Round `value` to `decimals` places, ties to even.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::round_to;
///
/// assert_eq!(round_to(1.4286, 2), 1.43);
/// assert_eq!(round_to(33.333, 1), 33.3);
/// assert_eq!(round_to(2.5, 0), 2.0);
/// assert_eq!(round_to(12.25, 1), 12.2);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Format a number with comma thousands separators and a fixed number of
/// decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a relative epsilon so binary midpoints like 1.005 round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let fixed = format!("{:.prec$}", rounded, prec = decimals as usize);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut result = group_thousands(int_part);
    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(frac);
    }

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount with the currency prefix and two decimals.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56), "R$ 1,234.56");
/// assert_eq!(format_currency(0.0), "R$ 0.00");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("{} {}", CURRENCY_SYMBOL, format_number(amount, 2))
}

/// Format a unit count: whole numbers print without decimals, fractional
/// counts keep two.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_quantity;
///
/// assert_eq!(format_quantity(1500.0), "1,500");
/// assert_eq!(format_quantity(12.25), "12.25");
/// ```
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number(value, 0)
    } else {
        format_number(value, 2)
    }
}

/// Format an optional percentage with one decimal, or `"n/a"`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", format_number(v, 1)),
        None => "n/a".to_string(),
    }
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `None` when `whole` is zero.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::percentage;
///
/// assert_eq!(percentage(50.0, 200.0, 1), Some(25.0));
/// assert_eq!(percentage(1.0, 0.0, 1), None);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> Option<f64> {
    if whole == 0.0 {
        return None;
    }
    Some(round_to((part / whole) * 100.0, decimal_places))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── round_to ─────────────────────────────────────────────────────────────

    #[test]
    fn test_round_to_two_places() {
        assert_eq!(round_to(50.0 / 35.0, 2), 1.43);
    }

    #[test]
    fn test_round_to_zero_places() {
        assert_eq!(round_to(14.6, 0), 15.0);
        assert_eq!(round_to(14.4, 0), 14.0);
    }

    #[test]
    fn test_round_to_midpoint_goes_to_even() {
        assert_eq!(round_to(14.5, 0), 14.0);
        assert_eq!(round_to(15.5, 0), 16.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
    }

    #[test]
    fn test_round_to_already_rounded() {
        assert_eq!(round_to(2.0, 2), 2.0);
    }

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
        assert_eq!(format_number(1_000.0, 0), "1,000");
        assert_eq!(format_number(123_456.0, 0), "123,456");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_negative_rounds_to_zero() {
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_number_rounds_up_midpoint() {
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    #[test]
    fn test_format_number_carry_into_thousands() {
        assert_eq!(format_number(999.999, 2), "1,000.00");
    }

    // ── format_currency ──────────────────────────────────────────────────────

    #[test]
    fn test_format_currency_positive() {
        assert_eq!(format_currency(1_234.56), "R$ 1,234.56");
    }

    #[test]
    fn test_format_currency_large() {
        assert_eq!(format_currency(1_000_000.0), "R$ 1,000,000.00");
    }

    // ── format_quantity ──────────────────────────────────────────────────────

    #[test]
    fn test_format_quantity_whole() {
        assert_eq!(format_quantity(35.0), "35");
        assert_eq!(format_quantity(12_000.0), "12,000");
    }

    #[test]
    fn test_format_quantity_fractional() {
        assert_eq!(format_quantity(2.5), "2.50");
    }

    // ── format_percent / percentage ──────────────────────────────────────────

    #[test]
    fn test_format_percent_some() {
        assert_eq!(format_percent(Some(42.0)), "42.0%");
    }

    #[test]
    fn test_format_percent_none() {
        assert_eq!(format_percent(None), "n/a");
    }

    #[test]
    fn test_percentage_basic() {
        assert_eq!(percentage(50.0, 200.0, 1), Some(25.0));
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1.0, 3.0, 1), Some(33.3));
    }

    #[test]
    fn test_percentage_midpoint_goes_to_even() {
        // 49 / 400 = 12.25 %
        assert_eq!(percentage(49.0, 400.0, 1), Some(12.2));
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10.0, 0.0, 1), None);
    }
}
