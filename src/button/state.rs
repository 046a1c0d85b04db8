//! Button state identity and the per-button data the state machine owns.

use super::Tick;
use super::combination::CombinationLink;
use crate::config::{Capabilities, TimingOverrides};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Every state of the gesture automaton.
///
/// `Idle` is both the initial state and the end of every gesture cycle.
/// The `Combination*` and `Hold*` states only exist on buttons whose
/// [`Capabilities`] enable them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ButtonState {
    Idle = 0,
    PushDelay = 1,
    WaitForEnd = 2,
    WaitForRepeat = 3,
    SinglePush = 4,
    RepeatPush = 5,
    ReleaseDelay = 6,
    CoolDown = 7,
    CombinationPush = 8,
    CombinationWaitForEnd = 9,
    CombinationRelease = 10,
    HoldPush = 11,
    HoldRelease = 12,
}

impl ButtonState {
    /// Total number of states.
    pub const COUNT: usize = 13;

    /// Convert an index back to `ButtonState`. Out-of-range indices map to
    /// `None`.
    pub fn from_index(idx: usize) -> Option<Self> {
        Some(match idx {
            0 => Self::Idle,
            1 => Self::PushDelay,
            2 => Self::WaitForEnd,
            3 => Self::WaitForRepeat,
            4 => Self::SinglePush,
            5 => Self::RepeatPush,
            6 => Self::ReleaseDelay,
            7 => Self::CoolDown,
            8 => Self::CombinationPush,
            9 => Self::CombinationWaitForEnd,
            10 => Self::CombinationRelease,
            11 => Self::HoldPush,
            12 => Self::HoldRelease,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::PushDelay => "PushDelay",
            Self::WaitForEnd => "WaitForEnd",
            Self::WaitForRepeat => "WaitForRepeat",
            Self::SinglePush => "SinglePush",
            Self::RepeatPush => "RepeatPush",
            Self::ReleaseDelay => "ReleaseDelay",
            Self::CoolDown => "CoolDown",
            Self::CombinationPush => "CombinationPush",
            Self::CombinationWaitForEnd => "CombinationWaitForEnd",
            Self::CombinationRelease => "CombinationRelease",
            Self::HoldPush => "HoldPush",
            Self::HoldRelease => "HoldRelease",
        }
    }

    /// Whether a button with `caps` may be in this state.
    pub const fn enabled_in(self, caps: &Capabilities) -> bool {
        match self {
            Self::CombinationPush | Self::CombinationWaitForEnd | Self::CombinationRelease => {
                caps.combination
            }
            Self::HoldPush | Self::HoldRelease => caps.hold,
            _ => true,
        }
    }

    /// States in which a press edge starts a new press cycle.
    pub const fn accepts_press(self) -> bool {
        matches!(self, Self::Idle | Self::WaitForRepeat)
    }
}

// ---------------------------------------------------------------------------
// Private status (shared between interrupt and polling context)
// ---------------------------------------------------------------------------

/// Mutable automaton data. Lives behind the button's critical-section
/// mutex; `state` and `timestamp_interrupt` are also written from
/// interrupt context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivateStatus {
    /// Last tick recorded by the polling side (release, repeat window,
    /// cool-down and hold interval measurements).
    pub timestamp_loop: Tick,
    /// Tick of the press edge that started the current cycle.
    pub timestamp_interrupt: Tick,
    pub state: ButtonState,
    /// Confirmed releases since the first `WaitForRepeat`. Saturates.
    pub push_count: u8,
}

impl PrivateStatus {
    pub const INIT: Self = Self {
        timestamp_loop: 0,
        timestamp_interrupt: 0,
        state: ButtonState::Idle,
        push_count: 0,
    };
}

// ---------------------------------------------------------------------------
// Public config (owned by the application)
// ---------------------------------------------------------------------------

/// Settings the application may change between gestures.
#[derive(Debug, Clone, Copy)]
pub struct PublicConfig {
    pub overrides: TimingOverrides,
    pub combination: Option<CombinationLink>,
}

impl PublicConfig {
    pub const EMPTY: Self = Self {
        overrides: TimingOverrides::NONE,
        combination: None,
    };
}
