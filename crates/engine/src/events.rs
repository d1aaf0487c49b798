//! Synchronization outcome events.
//!
//! Every pass reports what it did to the derived field. The driving
//! layer uses these for status display; the test suites use them to pin
//! the write-barrier and neutral-state invariants.

use sendforge_core::Field;

/// Result of one mirror synchronization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A derived value was written into the target field.
    Applied { target: Field },
    /// No valid derived amount exists; the target now shows the neutral
    /// sentinel.
    Neutralized { target: Field },
    /// The pass wrote nothing.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Asset selection or price snapshot missing; derivation impossible.
    MissingData,
    /// The target field is under active edit. Designed no-op: the next
    /// triggering event re-attempts.
    TargetFocused,
    /// The target already holds exactly this derived text.
    AlreadyCurrent,
}

impl SyncOutcome {
    /// True if the pass mutated the derived field.
    pub fn wrote(&self) -> bool {
        matches!(self, SyncOutcome::Applied { .. } | SyncOutcome::Neutralized { .. })
    }
}
