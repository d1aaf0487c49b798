//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part
//! of the shell contract; scripts rely on them.
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | CLI usage error (bad args)               |
//! | 3-9   | quote     | Conversion-specific codes                |
//! | 10-19 | address   | Recipient validation codes               |

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Quote (3-9)
// =============================================================================

/// No price available (feed unreachable or returned no data) and no
/// --price override was given.
pub const EXIT_NO_PRICE: u8 = 3;

/// Amount text did not parse as a valid amount.
pub const EXIT_BAD_AMOUNT: u8 = 4;

// =============================================================================
// Address (10-19)
// =============================================================================

/// Address failed the structural check for the selected chain.
pub const EXIT_INVALID_ADDRESS: u8 = 10;
