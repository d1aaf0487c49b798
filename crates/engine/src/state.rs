//! Send amount state and authority.
//!
//! One owned record per send flow, created by the driving session and
//! passed into the synchronizer. No module-level globals.

use serde::{Deserialize, Serialize};

use sendforge_core::{ChainFamily, Field, FocusState};

/// Which field is the source of truth.
///
/// Changed only by an explicit user toggle (or reset). Focus changes and
/// data updates never move authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityMode {
    #[default]
    Fiat,
    Asset,
}

impl AuthorityMode {
    /// The field the user types into under this mode.
    pub fn authoritative_field(&self) -> Field {
        match self {
            AuthorityMode::Fiat => Field::Fiat,
            AuthorityMode::Asset => Field::Asset,
        }
    }

    /// The field the synchronizer is allowed to write.
    pub fn derived_field(&self) -> Field {
        self.authoritative_field().other()
    }

    pub fn toggled(&self) -> AuthorityMode {
        match self {
            AuthorityMode::Fiat => AuthorityMode::Asset,
            AuthorityMode::Asset => AuthorityMode::Fiat,
        }
    }
}

/// The single mutable record backing the send amount UI.
///
/// INVARIANT: only the non-authoritative raw is system-writable; the
/// authoritative raw changes exclusively through direct user input
/// routed by the driving layer.
#[derive(Debug, Clone, Default)]
pub struct AmountState {
    pub mode: AuthorityMode,
    /// Fiat field text. ASCII digits plus at most one '.', at most two
    /// fractional digits (the input guard enforces this).
    pub fiat_raw: String,
    /// Asset field text. At most 17 digits total, separators excluded,
    /// enforced before mutation by the input guard.
    pub asset_raw: String,
    pub chain: Option<ChainFamily>,
    pub asset_symbol: Option<String>,
    /// Latest price snapshot. Must be present and positive for any
    /// derivation; invalid feed values are normalized to `None` on entry.
    pub price_usd: Option<f64>,
    /// Which fields are under active edit. Drives the write barrier.
    pub focus: FocusState,
    /// True while the derived field shows the neutral sentinel instead
    /// of a number. Callers check this flag, never the raw text.
    pub neutral: bool,
}

impl AmountState {
    /// Neutral entry state: fiat-authoritative, both fields empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the pristine entry state. Selection and price snapshot
    /// are dropped too; nothing outlives the send flow.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Toggle authority. Neither raw value changes: only which field the
    /// system may write moves.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn set_mode(&mut self, mode: AuthorityMode) {
        self.mode = mode;
    }

    /// Select a chain/asset pair. Both raw values survive; the caller
    /// runs a synchronization pass afterwards to re-derive from the
    /// existing authoritative text.
    pub fn select_asset(&mut self, symbol: &str, chain: ChainFamily) {
        self.asset_symbol = Some(symbol.trim().to_string());
        self.chain = Some(chain);
    }

    /// Record a fresh price snapshot. `None` (or a non-positive value)
    /// means data unavailable, which stalls derivation without error.
    pub fn set_price(&mut self, price_usd: Option<f64>) {
        self.price_usd = price_usd.filter(|p| p.is_finite() && *p > 0.0);
    }

    pub fn raw(&self, field: Field) -> &str {
        match field {
            Field::Fiat => &self.fiat_raw,
            Field::Asset => &self.asset_raw,
        }
    }

    /// The text the current derivation reads from.
    pub fn authoritative_raw(&self) -> &str {
        self.raw(self.mode.authoritative_field())
    }

    /// Write a field's text. Only the synchronizer (derived field) and
    /// the input path of the driving layer (authoritative field) call
    /// this.
    pub(crate) fn write_raw(&mut self, field: Field, text: String) {
        match field {
            Field::Fiat => self.fiat_raw = text,
            Field::Asset => self.asset_raw = text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_neutral_fiat_authoritative() {
        let state = AmountState::new();
        assert_eq!(state.mode, AuthorityMode::Fiat);
        assert!(state.fiat_raw.is_empty());
        assert!(state.asset_raw.is_empty());
        assert!(!state.neutral);
    }

    #[test]
    fn toggle_never_touches_raw_values() {
        let mut state = AmountState::new();
        state.fiat_raw = "100".to_string();
        state.asset_raw = "0.044435".to_string();
        state.toggle_mode();
        assert_eq!(state.mode, AuthorityMode::Asset);
        assert_eq!(state.fiat_raw, "100");
        assert_eq!(state.asset_raw, "0.044435");
        state.toggle_mode();
        assert_eq!(state.mode, AuthorityMode::Fiat);
        assert_eq!(state.fiat_raw, "100");
        assert_eq!(state.asset_raw, "0.044435");
    }

    #[test]
    fn select_asset_keeps_raw_values() {
        let mut state = AmountState::new();
        state.fiat_raw = "50".to_string();
        state.select_asset("ETH", ChainFamily::Ethereum);
        assert_eq!(state.fiat_raw, "50");
        assert_eq!(state.asset_symbol.as_deref(), Some("ETH"));
        assert_eq!(state.chain, Some(ChainFamily::Ethereum));
    }

    #[test]
    fn set_price_filters_invalid_snapshots() {
        let mut state = AmountState::new();
        state.set_price(Some(2250.5));
        assert_eq!(state.price_usd, Some(2250.5));
        state.set_price(Some(0.0));
        assert_eq!(state.price_usd, None);
        state.set_price(Some(-3.0));
        assert_eq!(state.price_usd, None);
        state.set_price(Some(f64::NAN));
        assert_eq!(state.price_usd, None);
        state.set_price(None);
        assert_eq!(state.price_usd, None);
    }

    #[test]
    fn reset_returns_to_entry_state() {
        let mut state = AmountState::new();
        state.fiat_raw = "12".to_string();
        state.select_asset("BTC", ChainFamily::Bitcoin);
        state.set_price(Some(64000.0));
        state.toggle_mode();
        state.reset();
        assert_eq!(state.mode, AuthorityMode::Fiat);
        assert!(state.fiat_raw.is_empty());
        assert!(state.asset_raw.is_empty());
        assert_eq!(state.chain, None);
        assert_eq!(state.price_usd, None);
    }
}
