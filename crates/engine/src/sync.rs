//! Mirror synchronizer: derives the non-authoritative field.
//!
//! Runs to completion synchronously inside the triggering event. The
//! focus write-barrier is the only guard: if the user is editing the
//! target field, the pass is a designed no-op and the next triggering
//! event re-attempts. The authoritative field is never written here on
//! any path.

use sendforge_core::Field;

use crate::amount;
use crate::display;
use crate::events::{SkipReason, SyncOutcome};
use crate::state::{AmountState, AuthorityMode};

/// Entry point for anything that may have changed a derivation input:
/// authoritative-field input, authority toggle, price update, chain or
/// asset change. Idempotent; redundant calls are safe.
pub fn on_amount_relevant_event(state: &mut AmountState) -> SyncOutcome {
    synchronize(state)
}

/// One synchronization pass over `state`.
pub fn synchronize(state: &mut AmountState) -> SyncOutcome {
    let price = match state.price_usd {
        Some(p) => p,
        None => return SyncOutcome::Skipped(SkipReason::MissingData),
    };
    if state.asset_symbol.is_none() {
        return SyncOutcome::Skipped(SkipReason::MissingData);
    }

    match state.mode {
        AuthorityMode::Fiat => {
            let derived = amount::derive_from_fiat(&state.fiat_raw, price, state.chain);
            apply(state, Field::Asset, derived.map(display::format_amount), derived)
        }
        AuthorityMode::Asset => {
            let derived = amount::derive_from_asset(&state.asset_raw, price);
            apply(state, Field::Fiat, derived.map(display::format_fiat), derived)
        }
    }
}

/// Write the derived text behind the focus barrier, or fall back to the
/// neutral policy when no positive derived value exists.
fn apply(
    state: &mut AmountState,
    target: Field,
    formatted: Option<String>,
    derived: Option<f64>,
) -> SyncOutcome {
    if state.focus.is_focused(target) {
        // Write barrier: no partial update, no queued retry.
        return SyncOutcome::Skipped(SkipReason::TargetFocused);
    }

    match (derived, formatted) {
        (Some(value), Some(text)) if value > 0.0 => {
            if !state.neutral && state.raw(target) == text {
                return SyncOutcome::Skipped(SkipReason::AlreadyCurrent);
            }
            state.write_raw(target, text);
            state.neutral = false;
            SyncOutcome::Applied { target }
        }
        _ => {
            // Neutral policy: the derived raw clears and the flag is
            // set; the sentinel itself is a render-time concern.
            if state.neutral && state.raw(target).is_empty() {
                return SyncOutcome::Skipped(SkipReason::AlreadyCurrent);
            }
            state.write_raw(target, String::new());
            state.neutral = true;
            SyncOutcome::Neutralized { target }
        }
    }
}
