//! Two-button chords.
//!
//! Button B is chained after button A with [`Button::set_combination`].
//! When B confirms a release while A is still held, B reports
//! [`Gesture::Combination`](super::Gesture::Combination) instead of a
//! short/repeat gesture and A is moved to `CombinationWaitForEnd`, so its
//! own release produces nothing. Order matters: A must already be down
//! when B's release is confirmed.

use core::fmt;

use critical_section::CriticalSection;

use super::{Button, ButtonState};

/// Non-owning link from a button to the button that starts its chord.
#[derive(Clone, Copy)]
pub struct CombinationLink {
    pub previous: &'static Button,
    pub callback: fn(),
}

impl CombinationLink {
    /// Called by the next button once its release is confirmed. Arms the
    /// previous button if it is still held and reports whether the chord
    /// is complete.
    pub(crate) fn completes_chord(&self, cs: CriticalSection<'_>) -> bool {
        let cell = self.previous.status.borrow(cs);
        let mut prev = cell.get();
        match prev.state {
            ButtonState::WaitForEnd => {
                prev.state = ButtonState::CombinationWaitForEnd;
                cell.set(prev);
                true
            }
            ButtonState::CombinationWaitForEnd => true,
            _ => false,
        }
    }
}

impl fmt::Debug for CombinationLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinationLink")
            .field("previous", &self.previous.name())
            .finish_non_exhaustive()
    }
}
