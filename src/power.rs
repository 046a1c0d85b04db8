//! Low-power entry gated on button activity.
//!
//! The application decides when to ask; this module only answers "are all
//! of these buttons idle?" and, if so, enters low power without letting a
//! press edge slip in between the check and the sleep.

use crate::button::{Button, ButtonState};
use crate::ports::LowPower;

/// Whether every button in `buttons` is `Idle`. Checked atomically.
pub fn all_idle(buttons: &[&Button]) -> bool {
    critical_section::with(|cs| {
        buttons
            .iter()
            .all(|b| b.state_in(cs) == ButtonState::Idle)
    })
}

/// Enter low power if every button in `buttons` is `Idle`.
///
/// The check and `enter_low_power` share one critical section, so the
/// platform sleep must wake on a pending interrupt even while interrupts
/// are masked (WFI semantics). Returns whether low power was entered.
pub fn sleep_if_idle<L: LowPower + ?Sized>(buttons: &[&Button], power: &mut L) -> bool {
    critical_section::with(|cs| {
        let idle = buttons
            .iter()
            .all(|b| b.state_in(cs) == ButtonState::Idle);
        if idle {
            power.enter_low_power();
        }
        idle
    })
}
