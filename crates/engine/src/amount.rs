//! Pure conversion arithmetic.
//!
//! The only module that turns amount text into numbers. Every function
//! here is total: malformed input comes back as `None`, never a panic,
//! and identical inputs always produce identical outputs.

use sendforge_core::ChainFamily;

/// Fiat amounts are always displayed and derived at two decimals.
pub const FIAT_DECIMALS: u32 = 2;

/// Parse amount text into a non-negative finite number.
///
/// Empty or non-numeric input yields `None`; negative values clamp to
/// zero rather than failing.
pub fn parse(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if value < 0.0 { 0.0 } else { value })
}

/// Half-up rounding at `decimals` places via integer scaling:
/// `round(value * 10^d) / 10^d`.
///
/// `f64::round` is half-away-from-zero, which equals half-up for the
/// non-negative amounts this engine sees. Residual float error on cases
/// like 1.005 is kept as-is to match the shipped behavior.
pub fn round(value: f64, decimals: u32) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let scale = 10f64.powi(decimals as i32);
    Some((value * scale).round() / scale)
}

/// Asset-side rounding precision for a chain selection.
/// No selection (or an unrecognized one) rounds to whole units.
pub fn decimals_for(chain: Option<ChainFamily>) -> u32 {
    chain.map(|c| c.decimals()).unwrap_or(0)
}

/// Derive the asset amount from fiat text and a price snapshot.
///
/// `None` unless the text parses and `price_usd` is a positive finite
/// number. A fiat amount of zero short-circuits to `Some(0.0)` without
/// touching the price.
pub fn derive_from_fiat(
    fiat_raw: &str,
    price_usd: f64,
    chain: Option<ChainFamily>,
) -> Option<f64> {
    let fiat = parse(fiat_raw)?;
    if !price_usd.is_finite() || price_usd <= 0.0 {
        return None;
    }
    if fiat == 0.0 {
        return Some(0.0);
    }
    round(fiat / price_usd, decimals_for(chain))
}

/// Mirror of [`derive_from_fiat`]: asset text to a fiat amount, always
/// rounded to [`FIAT_DECIMALS`].
pub fn derive_from_asset(asset_raw: &str, price_usd: f64) -> Option<f64> {
    let asset = parse(asset_raw)?;
    if !price_usd.is_finite() || price_usd <= 0.0 {
        return None;
    }
    if asset == 0.0 {
        return Some(0.0);
    }
    round(asset * price_usd, FIAT_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic() {
        assert_eq!(parse("100"), Some(100.0));
        assert_eq!(parse(" 1.5 "), Some(1.5));
        assert_eq!(parse("0"), Some(0.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("abc"), None);
        assert_eq!(parse("1.2.3"), None);
        assert_eq!(parse("NaN"), None);
        assert_eq!(parse("inf"), None);
    }

    #[test]
    fn parse_clamps_negative_to_zero() {
        assert_eq!(parse("-5"), Some(0.0));
        assert_eq!(parse("-0.01"), Some(0.0));
    }

    #[test]
    fn round_half_up() {
        assert_eq!(round(0.0444346, 6), Some(0.044435));
        assert_eq!(round(1.5, 0), Some(2.0));
        // 2.375 is binary-exact, so the half-up tie is genuine.
        assert_eq!(round(2.375, 2), Some(2.38));
    }

    #[test]
    fn round_preserves_float_scaling_behavior() {
        // 1.005 is stored slightly below 1.005, so integer scaling lands
        // on 1.0, not 1.01. This matches the shipped rounding exactly.
        assert_eq!(round(1.005, 2), Some(1.0));
    }

    #[test]
    fn round_rejects_non_finite() {
        assert_eq!(round(f64::NAN, 2), None);
        assert_eq!(round(f64::INFINITY, 2), None);
    }

    #[test]
    fn derive_from_fiat_ethereum() {
        // 100 / 2250.50 = 0.0444346... -> 0.044435 at 6 decimals
        let derived = derive_from_fiat("100", 2250.50, Some(ChainFamily::Ethereum));
        assert_eq!(derived, Some(0.044435));
    }

    #[test]
    fn derive_from_fiat_zero_short_circuits() {
        let derived = derive_from_fiat("0", 2250.50, Some(ChainFamily::Ethereum));
        assert_eq!(derived, Some(0.0));
    }

    #[test]
    fn derive_from_fiat_rejects_bad_price() {
        assert_eq!(derive_from_fiat("100", 0.0, Some(ChainFamily::Ethereum)), None);
        assert_eq!(derive_from_fiat("100", -1.0, Some(ChainFamily::Ethereum)), None);
        assert_eq!(derive_from_fiat("100", f64::NAN, Some(ChainFamily::Ethereum)), None);
    }

    #[test]
    fn derive_from_fiat_no_chain_rounds_to_whole_units() {
        assert_eq!(derive_from_fiat("100", 30.0, None), Some(3.0));
    }

    #[test]
    fn derive_from_asset_rounds_to_fiat_decimals() {
        assert_eq!(derive_from_asset("0.044435", 2250.50), Some(100.0));
        assert_eq!(derive_from_asset("0.5", 3000.0), Some(1500.0));
    }

    #[test]
    fn derive_from_asset_zero_and_bad_input() {
        assert_eq!(derive_from_asset("0", 2250.50), Some(0.0));
        assert_eq!(derive_from_asset("", 2250.50), None);
        assert_eq!(derive_from_asset("x", 2250.50), None);
        assert_eq!(derive_from_asset("1", 0.0), None);
    }

    #[test]
    fn bitcoin_uses_eight_decimals() {
        // 100 / 64000 = 0.0015625 exactly
        let derived = derive_from_fiat("100", 64000.0, Some(ChainFamily::Bitcoin));
        assert_eq!(derived, Some(0.0015625));
    }
}
