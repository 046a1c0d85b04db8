//! Port traits: the boundary between the gesture core and the platform.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Button (domain)
//! ```
//!
//! The core never reads a clock, sleeps, or calls application code
//! directly; it goes through these traits. Pin reads use
//! [`embedded_hal::digital::InputPin`] so any HAL pin driver plugs in.

use crate::button::Tick;

// ───────────────────────────────────────────────────────────────
// Tick source (driven adapter: platform timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter. Expected to wrap at `Tick::MAX`.
pub trait TickSource {
    fn now_ms(&self) -> Tick;

    /// Variant safe to call from interrupt context. Most platforms can use
    /// the same counter.
    fn now_ms_from_isr(&self) -> Tick {
        self.now_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// Low power (driven adapter: domain → platform sleep)
// ───────────────────────────────────────────────────────────────

/// Entered by [`power::sleep_if_idle`](crate::power::sleep_if_idle) when
/// every queried button is idle. Called with interrupts masked; the
/// implementation must still wake on a pending edge interrupt.
pub trait LowPower {
    fn enter_low_power(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Gesture handler (driven adapter: domain → application)
// ───────────────────────────────────────────────────────────────

/// Receives classified gestures. Every method defaults to a no-op so an
/// implementation only overrides what it cares about.
///
/// Handlers run outside the critical section.
pub trait GestureHandler {
    fn on_short_push(&mut self) {}

    /// `held_ms` is the time since the press edge.
    fn on_long_push(&mut self, _held_ms: Tick) {}

    /// `count` is the number of presses in the burst (2 when repeat
    /// counting is disabled).
    fn on_repeat_push(&mut self, _count: u8) {}

    /// Called in addition to the combination callback stored on the button.
    fn on_combination_push(&mut self) {}
}

/// Use the return value of [`Button::poll`](crate::Button::poll) instead.
impl GestureHandler for () {}

/// Plain function-pointer callbacks, any of which may be absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Callbacks {
    pub short: Option<fn()>,
    pub long: Option<fn(Tick)>,
    pub repeat: Option<fn(u8)>,
}

impl GestureHandler for Callbacks {
    fn on_short_push(&mut self) {
        if let Some(cb) = self.short {
            cb();
        }
    }

    fn on_long_push(&mut self, held_ms: Tick) {
        if let Some(cb) = self.long {
            cb(held_ms);
        }
    }

    fn on_repeat_push(&mut self, count: u8) {
        if let Some(cb) = self.repeat {
            cb(count);
        }
    }
}
