//! Button configuration parameters
//!
//! A button is built from one [`ButtonConfig`]: capability flags plus the
//! base [`Timing`]. Per-button [`TimingOverrides`] can be applied later via
//! [`Button::set_timing`](crate::Button::set_timing) when
//! `adjustable_timing` is enabled.

use serde::{Deserialize, Serialize};

use crate::button::Tick;
use crate::error::ConfigError;

// --- Compiled-in defaults (milliseconds) ---

/// Settling time after the press edge before the level is trusted.
pub const DEFAULT_PUSH_DELAY_MS: Tick = 30;
/// Settling time after the release edge before the level is trusted.
pub const DEFAULT_RELEASE_DELAY_MS: Tick = 30;
/// Minimum press duration classified as a long push.
pub const DEFAULT_LONG_PUSH_MIN_MS: Tick = 1000;
/// Window after a release in which another press counts as a repeat.
pub const DEFAULT_REPEAT_WINDOW_MS: Tick = 300;
/// Dead time after a gesture before the next press is accepted.
pub const DEFAULT_COOL_DOWN_MS: Tick = 0;
/// Press duration after which hold mode starts.
pub const DEFAULT_HOLD_PUSH_MIN_MS: Tick = DEFAULT_LONG_PUSH_MIN_MS;
/// Period of long-push callbacks while in hold mode.
pub const DEFAULT_HOLD_INTERVAL_MS: Tick = 200;
/// A press held longer than this is considered stuck.
pub const DEFAULT_NORMAL_TIMEOUT_MS: Tick = 1000 * 120;
/// A combination predecessor held longer than this is considered stuck.
pub const DEFAULT_COMBINATION_TIMEOUT_MS: Tick = 1000 * 240;

/// Timing thresholds used by the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub push_delay_ms: Tick,
    pub release_delay_ms: Tick,
    pub long_push_min_ms: Tick,
    pub repeat_window_ms: Tick,
    pub cool_down_ms: Tick,
    pub hold_push_min_ms: Tick,
    pub hold_interval_ms: Tick,
    pub normal_timeout_ms: Tick,
    pub combination_timeout_ms: Tick,
}

impl Timing {
    pub const DEFAULT: Self = Self {
        push_delay_ms: DEFAULT_PUSH_DELAY_MS,
        release_delay_ms: DEFAULT_RELEASE_DELAY_MS,
        long_push_min_ms: DEFAULT_LONG_PUSH_MIN_MS,
        repeat_window_ms: DEFAULT_REPEAT_WINDOW_MS,
        cool_down_ms: DEFAULT_COOL_DOWN_MS,
        hold_push_min_ms: DEFAULT_HOLD_PUSH_MIN_MS,
        hold_interval_ms: DEFAULT_HOLD_INTERVAL_MS,
        normal_timeout_ms: DEFAULT_NORMAL_TIMEOUT_MS,
        combination_timeout_ms: DEFAULT_COMBINATION_TIMEOUT_MS,
    };

    /// Reject combinations that would make a gesture unreachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hold_interval_ms == 0 {
            return Err(ConfigError::Invalid("hold interval must be non-zero"));
        }
        if self.long_push_min_ms <= self.push_delay_ms {
            return Err(ConfigError::Invalid("long push minimum must exceed push delay"));
        }
        if self.normal_timeout_ms <= self.long_push_min_ms {
            return Err(ConfigError::Invalid("normal timeout must exceed long push minimum"));
        }
        if self.normal_timeout_ms <= self.hold_push_min_ms {
            return Err(ConfigError::Invalid("normal timeout must exceed hold push minimum"));
        }
        if self.combination_timeout_ms < self.normal_timeout_ms {
            return Err(ConfigError::Invalid(
                "combination timeout must not be shorter than normal timeout",
            ));
        }
        Ok(())
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-button replacements for individual [`Timing`] fields.
/// `None` keeps the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingOverrides {
    pub push_delay_ms: Option<Tick>,
    pub release_delay_ms: Option<Tick>,
    pub long_push_min_ms: Option<Tick>,
    pub repeat_window_ms: Option<Tick>,
    pub cool_down_ms: Option<Tick>,
    pub hold_push_min_ms: Option<Tick>,
    pub hold_interval_ms: Option<Tick>,
}

impl TimingOverrides {
    pub const NONE: Self = Self {
        push_delay_ms: None,
        release_delay_ms: None,
        long_push_min_ms: None,
        repeat_window_ms: None,
        cool_down_ms: None,
        hold_push_min_ms: None,
        hold_interval_ms: None,
    };

    /// Layer these overrides over `base`.
    pub fn apply(&self, base: &Timing) -> Timing {
        Timing {
            push_delay_ms: self.push_delay_ms.unwrap_or(base.push_delay_ms),
            release_delay_ms: self.release_delay_ms.unwrap_or(base.release_delay_ms),
            long_push_min_ms: self.long_push_min_ms.unwrap_or(base.long_push_min_ms),
            repeat_window_ms: self.repeat_window_ms.unwrap_or(base.repeat_window_ms),
            cool_down_ms: self.cool_down_ms.unwrap_or(base.cool_down_ms),
            hold_push_min_ms: self.hold_push_min_ms.unwrap_or(base.hold_push_min_ms),
            hold_interval_ms: self.hold_interval_ms.unwrap_or(base.hold_interval_ms),
            normal_timeout_ms: base.normal_timeout_ms,
            combination_timeout_ms: base.combination_timeout_ms,
        }
    }
}

/// Optional behaviours of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Two-button chords (`Combination*` states).
    pub combination: bool,
    /// Periodic long-push callbacks while held (`Hold*` states).
    pub hold: bool,
    /// Report the literal repeat count instead of a single/repeat split.
    pub count_repeats: bool,
    /// Honour per-button [`TimingOverrides`].
    pub adjustable_timing: bool,
    /// Panic on faults instead of resetting to `Idle`.
    pub fatal_faults: bool,
}

impl Capabilities {
    pub const DEFAULT: Self = Self {
        combination: true,
        hold: false,
        count_repeats: true,
        adjustable_timing: true,
        fatal_faults: false,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything a [`Button`](crate::Button) is constructed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonConfig {
    pub capabilities: Capabilities,
    pub timing: Timing,
}

impl ButtonConfig {
    pub const DEFAULT: Self = Self {
        capabilities: Capabilities::DEFAULT,
        timing: Timing::DEFAULT,
    };

    /// Same configuration with hold mode switched on.
    pub const fn with_hold(mut self) -> Self {
        self.capabilities.hold = true;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()
    }

    /// Timing the state machine actually runs with.
    pub fn effective_timing(&self, overrides: &TimingOverrides) -> Timing {
        if self.capabilities.adjustable_timing {
            overrides.apply(&self.timing)
        } else {
            self.timing
        }
    }
}
