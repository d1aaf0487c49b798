//! Display formatting for derived amounts.
//!
//! Derived numbers are rendered for the non-authoritative field in plain
//! decimal notation. Fixed-precision formatting never emits an exponent,
//! so the scientific-notation re-expansion the UI needs falls out of the
//! same path that caps the displayed fraction.

/// What the derived field shows when no valid derived amount exists.
///
/// Deliberately not "0": downstream logic distinguishes neutral from a
/// true zero via [`crate::state::AmountState::neutral`], never by
/// comparing against this string.
pub const NEUTRAL_SENTINEL: &str = "--";

/// Displayed fractional digits are capped here; the f64 used for
/// calculation keeps its full precision.
pub const MAX_DISPLAY_FRACTION: usize = 6;

/// Render a derived asset amount: no exponent form, at most
/// [`MAX_DISPLAY_FRACTION`] fractional digits, trailing zeros trimmed.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return NEUTRAL_SENTINEL.to_string();
    }
    let mut text = format!("{:.*}", MAX_DISPLAY_FRACTION, value);
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

/// Render a derived fiat amount at exactly two decimals.
pub fn format_fiat(value: f64) -> String {
    if !value.is_finite() {
        return NEUTRAL_SENTINEL.to_string();
    }
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_decimal_no_exponent() {
        // 1e-7 would print as "1e-7" with default formatting
        assert_eq!(format_amount(0.0000001), "0");
        assert!(!format_amount(1e20).contains('e'));
    }

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(format_amount(0.044435), "0.044435");
        assert_eq!(format_amount(1.5), "1.5");
        assert_eq!(format_amount(3.0), "3");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn caps_displayed_fraction_at_six() {
        assert_eq!(format_amount(0.123456789), "0.123457");
    }

    #[test]
    fn fiat_always_two_decimals() {
        assert_eq!(format_fiat(100.0), "100.00");
        assert_eq!(format_fiat(2250.5), "2250.50");
        assert_eq!(format_fiat(0.0), "0.00");
    }

    #[test]
    fn non_finite_degrades_to_sentinel() {
        assert_eq!(format_amount(f64::NAN), NEUTRAL_SENTINEL);
        assert_eq!(format_fiat(f64::INFINITY), NEUTRAL_SENTINEL);
    }
}
