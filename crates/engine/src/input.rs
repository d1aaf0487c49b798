//! Precision-safe text entry control for the amount fields.
//!
//! Modeled on key events rather than a DOM: the driving layer feeds
//! each keystroke through [`guard_asset_key`]/[`guard_fiat_key`] before
//! it touches the field text, then runs [`sanitize`] as a second line
//! of defense against programmatic insertion that bypassed the guard.
//!
//! The asset cap is enforced *before* mutation: a rejected insertion
//! leaves the field untouched, so the digit-count invariant holds at
//! every intermediate state, not just after cleanup.

use std::time::{Duration, Instant};

/// Hard cap on asset-field digits (separators excluded). The 18th digit
/// is where f64 stops representing integers exactly.
pub const MAX_ASSET_DIGITS: usize = 17;

/// Fiat text never carries more than two fractional digits.
pub const MAX_FIAT_FRACTION: usize = 2;

/// A keyboard event as seen by the amount fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Enter,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Tab,
    Copy,
    Paste,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
    Allow,
    Reject(RejectReason),
}

/// Why a keystroke or insertion was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Inserting would push the field past [`MAX_ASSET_DIGITS`].
    DigitCapExceeded,
    /// The field already contains a decimal point.
    SecondDecimalPoint,
    /// Letters, symbols, exponent markers, signs.
    InvalidCharacter,
    /// Enter is blocked; amount fields are single-line.
    NewlineBlocked,
    /// Paste is never accepted on amount fields (copy stays allowed).
    PasteBlocked,
}

/// Count the digits in a field value, separators excluded.
pub fn digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

/// True if inserting `incoming` into `current` would exceed the cap.
pub fn would_exceed_digit_cap(current: &str, incoming: &str) -> bool {
    digit_count(current) + digit_count(incoming) > MAX_ASSET_DIGITS
}

/// Vet one keystroke against the asset field's current text.
pub fn guard_asset_key(current: &str, key: KeyInput) -> KeyDecision {
    match key {
        KeyInput::Paste => KeyDecision::Reject(RejectReason::PasteBlocked),
        KeyInput::Enter => KeyDecision::Reject(RejectReason::NewlineBlocked),
        KeyInput::Char(c) => {
            if c.is_ascii_digit() {
                if digit_count(current) + 1 > MAX_ASSET_DIGITS {
                    KeyDecision::Reject(RejectReason::DigitCapExceeded)
                } else {
                    KeyDecision::Allow
                }
            } else if c == '.' {
                if current.contains('.') {
                    KeyDecision::Reject(RejectReason::SecondDecimalPoint)
                } else {
                    KeyDecision::Allow
                }
            } else {
                KeyDecision::Reject(RejectReason::InvalidCharacter)
            }
        }
        // Navigation, edit keys, and copy pass through.
        _ => KeyDecision::Allow,
    }
}

/// Vet one keystroke against the fiat field's current text.
///
/// Fractional-digit excess is handled by truncation after insertion
/// ([`clamp_fiat_fraction`]), not prevention; exponent and sign keys
/// are refused outright.
pub fn guard_fiat_key(current: &str, key: KeyInput) -> KeyDecision {
    match key {
        KeyInput::Paste => KeyDecision::Reject(RejectReason::PasteBlocked),
        KeyInput::Enter => KeyDecision::Reject(RejectReason::NewlineBlocked),
        KeyInput::Char(c) => match c {
            'e' | 'E' | '+' | '-' => KeyDecision::Reject(RejectReason::InvalidCharacter),
            '.' => {
                if current.contains('.') {
                    KeyDecision::Reject(RejectReason::SecondDecimalPoint)
                } else {
                    KeyDecision::Allow
                }
            }
            c if c.is_ascii_digit() => KeyDecision::Allow,
            _ => KeyDecision::Reject(RejectReason::InvalidCharacter),
        },
        _ => KeyDecision::Allow,
    }
}

/// Result of a post-insertion sanitation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub value: String,
    /// True if anything was stripped. The caller repositions the caret
    /// to the end of the field in that case.
    pub changed: bool,
}

/// Strip everything that is not a digit or the first decimal point.
///
/// Defense for programmatic insertion that bypassed the key guard; on
/// guarded input this is a no-op.
pub fn sanitize(value: &str) -> Sanitized {
    let mut out = String::with_capacity(value.len());
    let mut seen_dot = false;
    for c in value.chars() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            out.push(c);
        }
    }
    let changed = out != value;
    Sanitized { value: out, changed }
}

/// Truncate fiat text to at most [`MAX_FIAT_FRACTION`] fractional
/// digits. Acceptable for fiat (hard display ceiling); the asset field
/// never truncates silently.
pub fn clamp_fiat_fraction(value: &str) -> String {
    match value.find('.') {
        Some(dot) => {
            let max_len = dot + 1 + MAX_FIAT_FRACTION;
            if value.len() > max_len {
                value[..max_len].to_string()
            } else {
                value.to_string()
            }
        }
        None => value.to_string(),
    }
}

/// One-shot debounce for user-facing guard notices.
///
/// `should_fire` returns true at most once per window. The caller
/// supplies the clock, so tests stay deterministic.
#[derive(Debug, Clone)]
pub struct NoticeGate {
    window: Duration,
    last_fired: Option<Instant>,
}

impl NoticeGate {
    pub fn new(window: Duration) -> Self {
        Self { window, last_fired: None }
    }

    /// True if a notice may be shown now; arms the debounce window.
    pub fn should_fire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_fired {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last_fired = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}
