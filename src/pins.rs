//! GPIO assignments for the demo board (ESP32-S3 DevKitC).
//!
//! Single source of truth: the demo references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Interrupt-driven buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// On-board BOOT button. Starts the PLAY+MODE chord.
pub const BUTTON_PLAY_GPIO: i32 = 0;
/// External button. Completes the PLAY+MODE chord.
pub const BUTTON_MODE_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Polled button (no interrupt line)
// ---------------------------------------------------------------------------

pub const BUTTON_AUX_GPIO: i32 = 5;

/// Main loop period.
pub const POLL_INTERVAL_MS: u32 = 5;
