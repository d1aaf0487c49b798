//! Recipient address validation and interaction gating.
//!
//! Structural (regex-level) checks only: shape, charset, length. No
//! checksum math, no network. Gating is independent of amount logic;
//! it answers whether the amount fields may be touched at all.

use std::sync::OnceLock;

use regex::Regex;

use sendforge_core::ChainFamily;

fn eth_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("eth address regex"))
}

fn sol_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").expect("sol address regex"))
}

fn btc_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Legacy base58 (1.../3...) or bech32 (bc1...).
    RE.get_or_init(|| {
        Regex::new(r"^(?:[13][1-9A-HJ-NP-Za-km-z]{25,34}|bc1[02-9ac-hj-np-z]{8,87})$")
            .expect("btc address regex")
    })
}

/// Structural validity of `address` for a chain family.
pub fn is_valid_address_format(address: &str, family: ChainFamily) -> bool {
    let addr = address.trim();
    if addr.is_empty() {
        return false;
    }
    match family {
        ChainFamily::Ethereum => eth_regex().is_match(addr),
        ChainFamily::Solana => sol_regex().is_match(addr),
        ChainFamily::Bitcoin => btc_regex().is_match(addr),
    }
}

/// Everything the gating layer knows about the recipient state, computed
/// purely from current inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCheck {
    pub present: bool,
    pub structurally_valid: bool,
    pub chain_supported: bool,
    pub chain_asset_match: bool,
}

impl AddressCheck {
    pub fn evaluate(
        address: &str,
        chain: Option<ChainFamily>,
        asset_symbol: Option<&str>,
    ) -> AddressCheck {
        let present = !address.trim().is_empty();
        let chain_supported = chain.is_some();
        let structurally_valid = match chain {
            Some(family) => present && is_valid_address_format(address, family),
            None => false,
        };
        let chain_asset_match = match (chain, asset_symbol) {
            (Some(family), Some(symbol)) => family.matches_asset(symbol),
            _ => false,
        };
        AddressCheck { present, structurally_valid, chain_supported, chain_asset_match }
    }

    /// Amount-field interaction and submission are allowed only with a
    /// structurally valid recipient.
    pub fn allows_amount_interaction(&self) -> bool {
        self.structurally_valid
    }
}

/// How the user (or the program) is trying to touch an amount field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionIntent {
    Click,
    Keystroke,
    PointerDown,
    DragConfirmStart,
    ProgrammaticFocus,
    TabFocus,
}

impl InteractionIntent {
    /// Intentional interactions get visible feedback when blocked;
    /// passive ones are blocked silently.
    pub fn is_intentional(&self) -> bool {
        matches!(
            self,
            InteractionIntent::Click
                | InteractionIntent::Keystroke
                | InteractionIntent::PointerDown
                | InteractionIntent::DragConfirmStart
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    /// Blocked, with user-facing feedback.
    BlockedNotify,
    /// Blocked, silently.
    BlockedSilent,
}

/// Decide whether an amount-field interaction may proceed.
pub fn gate_interaction(check: &AddressCheck, intent: InteractionIntent) -> GateDecision {
    if check.allows_amount_interaction() {
        return GateDecision::Allowed;
    }
    if intent.is_intentional() {
        GateDecision::BlockedNotify
    } else {
        GateDecision::BlockedSilent
    }
}
