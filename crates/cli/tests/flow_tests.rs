// End-to-end send-flow scenarios through SendSession: guard -> gating ->
// synchronizer, the same path the REPL drives.

use std::time::Instant;

use sendforge_cli::session::SendSession;
use sendforge_config::Settings;
use sendforge_core::{ChainFamily, Field};
use sendforge_engine::address::InteractionIntent;
use sendforge_engine::display::NEUTRAL_SENTINEL;
use sendforge_engine::events::{SkipReason, SyncOutcome};
use sendforge_engine::input::KeyInput;
use sendforge_engine::state::AuthorityMode;

const ETH_ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

fn session() -> SendSession {
    // Defaults select Ethereum; price injected per test.
    SendSession::new(&Settings::default())
}

#[test]
fn fiat_entry_derives_asset() {
    let mut s = session();
    s.set_address(ETH_ADDR);
    s.set_price(2250.50);
    s.type_text(Field::Fiat, "100", Instant::now());
    assert_eq!(s.state.fiat_raw, "100");
    assert_eq!(s.state.asset_raw, "0.044435");
    assert_eq!(s.last_outcome(), Some(SyncOutcome::Applied { target: Field::Asset }));
}

#[test]
fn typing_blocked_while_address_invalid() {
    let mut s = session();
    s.set_price(2250.50);
    s.set_address("not-an-address");
    s.type_text(Field::Fiat, "100", Instant::now());
    assert_eq!(s.state.fiat_raw, "", "blocked keystrokes must not land");
    let notices = s.drain_notices();
    assert_eq!(notices.len(), 1, "intentional interaction gets feedback");
}

#[test]
fn passive_focus_blocked_silently() {
    let mut s = session();
    s.set_address("not-an-address");
    assert!(!s.focus(Field::Fiat, InteractionIntent::TabFocus));
    assert!(s.drain_notices().is_empty(), "passive block is silent");
    assert!(!s.focus(Field::Fiat, InteractionIntent::ProgrammaticFocus));
    assert!(s.drain_notices().is_empty());
}

#[test]
fn neutral_until_positive_value() {
    let mut s = session();
    // Price arrives while fiat is still empty: neutral, not zero. The
    // sentinel is a render-time concern; the raw clears.
    s.set_price(2250.50);
    assert!(s.state.neutral);
    assert!(s.state.asset_raw.is_empty());

    // Entering an amount exits neutral the moment a positive derived
    // value exists.
    s.set_address(ETH_ADDR);
    s.type_text(Field::Fiat, "50", Instant::now());
    assert!(!s.state.neutral);
    assert_eq!(s.state.asset_raw, "0.022217");
}

#[test]
fn focused_asset_field_survives_price_update() {
    let mut s = session();
    s.set_address(ETH_ADDR);
    s.set_price(2250.50);
    s.type_text(Field::Fiat, "100", Instant::now());
    assert_eq!(s.state.asset_raw, "0.044435");

    // User edits the asset field directly (transient, non-authoritative).
    s.press_key(Field::Asset, KeyInput::Delete, Instant::now());
    s.type_text(Field::Asset, "1.2", Instant::now());
    assert_eq!(s.state.asset_raw, "1.2");

    // A price update fires a fiat-mode pass; the barrier must hold.
    s.set_price(2300.0);
    assert_eq!(s.last_outcome(), Some(SyncOutcome::Skipped(SkipReason::TargetFocused)));
    assert_eq!(s.state.asset_raw, "1.2", "byte-for-byte unchanged");

    // Blur re-attempts the skipped write.
    s.blur();
    assert_eq!(s.last_outcome(), Some(SyncOutcome::Applied { target: Field::Asset }));
    assert_eq!(s.state.asset_raw, "0.043478");
}

#[test]
fn asset_mode_derives_fiat() {
    let mut s = session();
    s.set_address(ETH_ADDR);
    s.set_price(2000.0);
    s.set_mode(AuthorityMode::Asset);
    s.type_text(Field::Asset, "0.5", Instant::now());
    assert_eq!(s.state.asset_raw, "0.5");
    assert_eq!(s.state.fiat_raw, "1000.00");
}

#[test]
fn digit_cap_notice_is_debounced() {
    let mut s = session();
    s.set_address(ETH_ADDR);
    s.set_price(2000.0);
    s.set_mode(AuthorityMode::Asset);

    let now = Instant::now();
    // 20 digits typed; the 18th onward is rejected, the field stays at 17.
    s.type_text(Field::Asset, "12345678901234567890", now);
    assert_eq!(s.state.asset_raw, "12345678901234567");
    let notices = s.drain_notices();
    assert_eq!(notices.len(), 1, "one debounced notice for the whole burst");

    // Still inside the debounce window: silent rejection.
    s.type_text(Field::Asset, "9", now);
    assert_eq!(s.state.asset_raw, "12345678901234567");
    assert!(s.drain_notices().is_empty());
}

#[test]
fn chain_switch_rederives_from_existing_text() {
    let mut s = session();
    s.set_address(ETH_ADDR);
    s.set_price(2000.0);
    s.type_text(Field::Fiat, "100", Instant::now());
    assert_eq!(s.state.asset_raw, "0.05");

    // Same authoritative text survives the selection change; the next
    // price snapshot re-derives at the new chain's precision.
    s.select_chain(ChainFamily::Bitcoin);
    assert_eq!(s.state.fiat_raw, "100");
    assert_eq!(s.state.asset_raw, "0.05", "no value reset on selection");

    s.set_price(40000.0);
    assert_eq!(s.state.asset_raw, "0.0025");
}

#[test]
fn stale_price_response_is_dropped() {
    let mut s = session();
    s.set_address(ETH_ADDR);
    s.type_text(Field::Fiat, "100", Instant::now());

    let stale = s.issue_price_request();
    let fresh = s.issue_price_request();
    s.apply_price_result(fresh, Some(2000.0));
    let derived = s.state.asset_raw.clone();

    // The superseded response lands late and must not overwrite.
    s.apply_price_result(stale, Some(9999.0));
    assert_eq!(s.state.asset_raw, derived);
    assert_eq!(s.state.price_usd, Some(2000.0));
}

#[test]
fn reset_returns_to_entry_state() {
    let mut s = session();
    s.set_address(ETH_ADDR);
    s.set_price(2000.0);
    s.type_text(Field::Fiat, "100", Instant::now());
    s.reset();
    assert_eq!(s.state.mode, AuthorityMode::Fiat);
    assert!(s.state.fiat_raw.is_empty());
    assert!(s.state.asset_raw.is_empty());
    assert!(s.address.is_empty());
    assert_eq!(s.state.price_usd, None);
}

#[test]
fn render_marks_authority_and_neutral() {
    let mut s = session();
    s.set_price(2000.0);
    let text = s.render();
    assert!(text.contains("fiat-authoritative"));
    assert!(text.contains("[authoritative]"));
    assert!(text.contains("[neutral]"));
    assert!(text.contains(NEUTRAL_SENTINEL));
}
