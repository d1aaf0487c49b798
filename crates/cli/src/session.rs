//! Interactive send-flow session.
//!
//! Owns the `AmountState` and routes every user action through the
//! input guard, the address gating, and the mirror synchronizer, in
//! that order, the same way a GUI adapter would. No rendering here
//! beyond plain text; the engine stays presentation-agnostic.

use std::time::{Duration, Instant};

use sendforge_config::Settings;
use sendforge_core::{ChainFamily, Field};
use sendforge_engine::address::{
    gate_interaction, AddressCheck, GateDecision, InteractionIntent,
};
use sendforge_engine::display::NEUTRAL_SENTINEL;
use sendforge_engine::events::SyncOutcome;
use sendforge_engine::input::{
    self, KeyDecision, KeyInput, NoticeGate, RejectReason,
};
use sendforge_engine::state::{AmountState, AuthorityMode};
use sendforge_engine::sync;
use sendforge_feed::{FeedClient, RequestWatch};

/// One user's pass through the send flow.
pub struct SendSession {
    pub state: AmountState,
    pub address: String,
    fiat_currency: String,
    notice_gate: NoticeGate,
    watch: RequestWatch,
    notices: Vec<String>,
    last_outcome: Option<SyncOutcome>,
}

impl SendSession {
    pub fn new(settings: &Settings) -> Self {
        let mut state = AmountState::new();
        if let Some(chain) = settings.default_chain {
            state.select_asset(chain.native_symbol(), chain);
        }
        Self {
            state,
            address: String::new(),
            fiat_currency: settings.fiat_currency.clone(),
            notice_gate: NoticeGate::new(Duration::from_millis(settings.notice_debounce_ms)),
            watch: RequestWatch::new(),
            notices: Vec::new(),
            last_outcome: None,
        }
    }

    /// Current recipient validation snapshot.
    pub fn address_check(&self) -> AddressCheck {
        AddressCheck::evaluate(
            &self.address,
            self.state.chain,
            self.state.asset_symbol.as_deref(),
        )
    }

    pub fn set_address(&mut self, address: &str) {
        self.address = address.trim().to_string();
    }

    /// Chain/asset selection: both raw values survive, then a fresh
    /// synchronization pass re-derives from the authoritative text.
    pub fn select_chain(&mut self, chain: ChainFamily) {
        self.state.select_asset(chain.native_symbol(), chain);
        self.run_sync();
    }

    /// Explicit authority toggle. Value recalculation happens in the
    /// following pass, never in the toggle itself.
    pub fn toggle_mode(&mut self) {
        self.state.toggle_mode();
        self.run_sync();
    }

    pub fn set_mode(&mut self, mode: AuthorityMode) {
        self.state.set_mode(mode);
        self.run_sync();
    }

    /// Focus a field on behalf of the user or the program. Returns true
    /// if focus was granted.
    pub fn focus(&mut self, field: Field, intent: InteractionIntent) -> bool {
        match gate_interaction(&self.address_check(), intent) {
            GateDecision::Allowed => {
                self.state.focus.clear();
                self.state.focus.set_focused(field, true);
                true
            }
            GateDecision::BlockedNotify => {
                self.notices.push("Enter a valid recipient address first".to_string());
                false
            }
            GateDecision::BlockedSilent => false,
        }
    }

    /// Blur both fields and re-attempt the mirror write the barrier may
    /// have skipped while the user was editing.
    pub fn blur(&mut self) {
        self.state.focus.clear();
        self.run_sync();
    }

    /// Feed a run of keystrokes into a field, character by character,
    /// through the field's guard. Rejected characters never touch the
    /// text; the digit-cap notice is debounced by `now`.
    pub fn type_text(&mut self, field: Field, text: &str, now: Instant) {
        if !self.focus(field, InteractionIntent::Keystroke) {
            return;
        }
        for c in text.chars() {
            self.apply_key(field, KeyInput::Char(c), now);
        }
        self.finish_input(field);
    }

    /// A single keystroke against a field (REPL `key` command).
    pub fn press_key(&mut self, field: Field, key: KeyInput, now: Instant) {
        if !self.focus(field, InteractionIntent::Keystroke) {
            return;
        }
        self.apply_key(field, key, now);
        self.finish_input(field);
    }

    fn apply_key(&mut self, field: Field, key: KeyInput, now: Instant) {
        let current = self.state.raw(field);
        let decision = match field {
            Field::Fiat => input::guard_fiat_key(current, key),
            Field::Asset => input::guard_asset_key(current, key),
        };
        match decision {
            KeyDecision::Allow => {
                let mut text = current.to_string();
                match key {
                    KeyInput::Char(c) => text.push(c),
                    KeyInput::Backspace => {
                        text.pop();
                    }
                    KeyInput::Delete => text.clear(),
                    // Navigation and copy keys carry no text change here.
                    _ => return,
                }
                self.write_user_text(field, text);
            }
            KeyDecision::Reject(RejectReason::DigitCapExceeded) => {
                if self.notice_gate.should_fire(now) {
                    self.notices.push(format!(
                        "Amount is limited to {} digits",
                        input::MAX_ASSET_DIGITS
                    ));
                }
            }
            // Other rejections swallow the keystroke without feedback,
            // like the field simply not reacting.
            KeyDecision::Reject(_) => {}
        }
    }

    /// Post-insertion sanitation, then a sync pass if the edited field
    /// is the authoritative one. Transient edits to the derived field
    /// trigger nothing; the next relevant event overwrites them.
    fn finish_input(&mut self, field: Field) {
        let current = self.state.raw(field).to_string();
        let sanitized = input::sanitize(&current);
        let cleaned = match field {
            Field::Fiat => input::clamp_fiat_fraction(&sanitized.value),
            Field::Asset => sanitized.value,
        };
        if cleaned != current {
            self.write_user_text(field, cleaned);
        }
        if field == self.state.mode.authoritative_field() {
            self.run_sync();
        }
    }

    fn write_user_text(&mut self, field: Field, text: String) {
        match field {
            Field::Fiat => self.state.fiat_raw = text,
            Field::Asset => self.state.asset_raw = text,
        }
    }

    /// Manual price injection (stub/offline path). Routed through the
    /// same last-write-wins watch as real fetches.
    pub fn set_price(&mut self, price_usd: f64) {
        let generation = self.watch.issue();
        self.apply_price_result(generation, Some(price_usd));
    }

    /// Fetch a fresh price for the selected asset and apply it if the
    /// request is still current.
    pub fn refresh_price(&mut self, feed: &FeedClient) {
        let symbol = match self.state.asset_symbol.clone() {
            Some(s) => s,
            None => {
                self.notices.push("Select a chain first".to_string());
                return;
            }
        };
        let generation = self.watch.issue();
        let price = feed.fetch_asset_price_usd(&symbol);
        self.apply_price_result(generation, price);
    }

    /// Apply a price fetch result. Superseded generations are dropped;
    /// `None` stalls derivation without error.
    pub fn apply_price_result(&mut self, generation: u64, price_usd: Option<f64>) {
        if !self.watch.accept(generation) {
            return;
        }
        self.state.set_price(price_usd);
        self.run_sync();
    }

    /// Issue a generation token for an externally-managed fetch.
    pub fn issue_price_request(&mut self) -> u64 {
        self.watch.issue()
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.address.clear();
        self.notice_gate.reset();
        self.last_outcome = None;
    }

    fn run_sync(&mut self) {
        self.last_outcome = Some(sync::on_amount_relevant_event(&mut self.state));
    }

    pub fn last_outcome(&self) -> Option<SyncOutcome> {
        self.last_outcome
    }

    pub fn drain_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Plain-text status block for the REPL `show` command.
    pub fn render(&self) -> String {
        let mode = match self.state.mode {
            AuthorityMode::Fiat => "fiat-authoritative",
            AuthorityMode::Asset => "asset-authoritative",
        };
        let chain = match self.state.chain {
            Some(c) => format!("{} ({})", c, c.native_symbol()),
            None => "none".to_string(),
        };
        let price = match self.state.price_usd {
            Some(p) => format!("{:.2} {}", p, self.fiat_currency),
            None => "unavailable".to_string(),
        };
        let check = self.address_check();
        let address = if self.address.is_empty() {
            "(empty)".to_string()
        } else {
            let validity = if check.structurally_valid { "valid" } else { "invalid" };
            format!("{}  [{}]", self.address, validity)
        };
        let line = |field: Field| {
            let raw = self.state.raw(field);
            if self.state.mode.authoritative_field() == field {
                let shown = if raw.is_empty() { "(empty)" } else { raw };
                format!("{}  [authoritative]", shown)
            } else if self.state.neutral {
                // Render-time sentinel: the derived raw itself is empty.
                format!("{}  [neutral]", NEUTRAL_SENTINEL)
            } else if raw.is_empty() {
                "(empty)".to_string()
            } else {
                raw.to_string()
            }
        };
        format!(
            "mode:    {}\nchain:   {}\nprice:   {}\naddress: {}\nfiat:    {}\nasset:   {}",
            mode,
            chain,
            price,
            address,
            line(Field::Fiat),
            line(Field::Asset),
        )
    }
}
