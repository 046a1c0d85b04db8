//! Debounced push-button with gesture classification.
//!
//! ## Contexts
//!
//! A [`Button`] is touched from two places:
//!
//! - **Interrupt side**: [`Button::on_interrupt`] (or [`Button::trigger`])
//!   runs from the GPIO edge interrupt. It only seeds a press cycle.
//! - **Polling side**: [`Button::poll`] runs from the main loop at a fixed
//!   cadence. It samples the pin, advances the automaton and reports at
//!   most one [`Gesture`] per call.
//!
//! Both sides share [`PrivateStatus`] through a `critical_section::Mutex`,
//! so every read-modify-write is atomic with respect to the edge interrupt.
//! Gesture handlers run after the critical section has been released.
//!
//! ## Gestures
//!
//! | Gesture      | Condition                                          |
//! |--------------|----------------------------------------------------|
//! | Short        | One press, classified after the repeat window      |
//! | Long         | One press longer than `long_push_min_ms`           |
//! | Repeat       | Several presses, each inside the repeat window     |
//! | Hold         | Long reported every `hold_interval_ms` while held  |
//! | Combination  | Released while the linked button is still held     |

mod combination;
mod dynamic;
mod state;

use core::cell::Cell;
use core::fmt;

use critical_section::{CriticalSection, Mutex};
use embedded_hal::digital::{Error as _, InputPin, PinState};
use log::{debug, trace, warn};

pub use combination::CombinationLink;
pub use dynamic::DynamicButton;
pub use state::ButtonState;
pub(crate) use state::{PrivateStatus, PublicConfig};

use crate::config::{ButtonConfig, Timing, TimingOverrides};
use crate::error::{ConfigError, Error, Fault, Result};
use crate::ports::{GestureHandler, TickSource};

/// Millisecond tick. Wraps; every elapsed-time comparison uses
/// `wrapping_sub`.
pub type Tick = u32;

/// A classified button interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Short,
    /// `held_ms` is measured from the press edge.
    Long { held_ms: Tick },
    Repeat { count: u8 },
    Combination,
}

/// Result of one dispatch, computed inside the critical section and acted
/// on after it.
struct Step {
    from: ButtonState,
    to: ButtonState,
    gesture: Option<Gesture>,
    fault: Option<Fault>,
    combination: Option<fn()>,
}

pub struct Button {
    name: &'static str,
    config: ButtonConfig,
    status: Mutex<Cell<PrivateStatus>>,
    public: Mutex<Cell<PublicConfig>>,
}

impl Button {
    /// Create an idle button. The configuration is not validated here so
    /// buttons can live in `static`s; see [`Button::try_new`].
    pub const fn new(config: ButtonConfig) -> Self {
        Self {
            name: "button",
            config,
            status: Mutex::new(Cell::new(PrivateStatus::INIT)),
            public: Mutex::new(Cell::new(PublicConfig::EMPTY)),
        }
    }

    pub fn try_new(config: ButtonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Label used in log output.
    #[must_use]
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    // ── Interrupt side ─────────────────────────────────────────

    /// Press edge seen at `now`. Starts a press cycle when the button is
    /// `Idle` or inside its repeat window; otherwise ignored.
    ///
    /// Returns whether the edge was accepted.
    pub fn on_interrupt(&self, now: Tick) -> bool {
        critical_section::with(|cs| self.seed(cs, now))
    }

    /// [`on_interrupt`](Self::on_interrupt) stamped with the ISR-safe clock.
    pub fn trigger<C: TickSource + ?Sized>(&self, clock: &C) -> bool {
        self.on_interrupt(clock.now_ms_from_isr())
    }

    pub(crate) fn seed(&self, cs: CriticalSection<'_>, now: Tick) -> bool {
        let cell = self.status.borrow(cs);
        let mut st = cell.get();
        if !st.state.accepts_press() {
            return false;
        }
        st.timestamp_interrupt = now;
        st.state = ButtonState::PushDelay;
        cell.set(st);
        true
    }

    pub(crate) fn state_in(&self, cs: CriticalSection<'_>) -> ButtonState {
        self.status.borrow(cs).get().state
    }

    // ── Polling side ───────────────────────────────────────────

    /// Advance the automaton by one step.
    ///
    /// `idle` is the level the pin reads while the button is released.
    /// At most one gesture is reported per call; it is delivered to
    /// `handler` and also returned.
    pub fn poll<P, C, H>(
        &self,
        pin: &mut P,
        idle: PinState,
        clock: &C,
        handler: &mut H,
    ) -> Result<Option<Gesture>>
    where
        P: InputPin,
        C: TickSource + ?Sized,
        H: GestureHandler + ?Sized,
    {
        let pressed = read_pressed(pin, idle)?;
        let now = clock.now_ms();
        let step = critical_section::with(|cs| self.advance(cs, pressed, now));

        if step.from != step.to {
            trace!("{}: {} -> {}", self.name, step.from.name(), step.to.name());
        }
        if let Some(fault) = step.fault {
            self.report(fault);
            return Ok(None);
        }
        let Some(gesture) = step.gesture else {
            return Ok(None);
        };

        debug!("{}: {:?}", self.name, gesture);
        match gesture {
            Gesture::Short => handler.on_short_push(),
            Gesture::Long { held_ms } => handler.on_long_push(held_ms),
            Gesture::Repeat { count } => handler.on_repeat_push(count),
            Gesture::Combination => {
                if let Some(callback) = step.combination {
                    callback();
                }
                handler.on_combination_push();
            }
        }

        // Intervals following a gesture are measured from the end of its
        // callback.
        let done = clock.now_ms();
        critical_section::with(|cs| {
            let cell = self.status.borrow(cs);
            let mut st = cell.get();
            if st.state == step.to {
                st.timestamp_loop = done;
                cell.set(st);
            }
        });

        Ok(Some(gesture))
    }

    fn advance(&self, cs: CriticalSection<'_>, pressed: bool, now: Tick) -> Step {
        let cell = self.status.borrow(cs);
        let mut st = cell.get();
        let public = self.public.borrow(cs).get();
        let timing = self.config.effective_timing(&public.overrides);
        let from = st.state;

        let (gesture, fault) = match self.dispatch(cs, &mut st, &public, &timing, pressed, now) {
            Ok(gesture) => (gesture, None),
            Err(fault) => {
                st.push_count = 0;
                st.state = ButtonState::Idle;
                (None, Some(fault))
            }
        };
        cell.set(st);

        Step {
            from,
            to: st.state,
            gesture,
            fault,
            combination: public.combination.map(|link| link.callback),
        }
    }

    fn dispatch(
        &self,
        cs: CriticalSection<'_>,
        st: &mut PrivateStatus,
        public: &PublicConfig,
        t: &Timing,
        pressed: bool,
        now: Tick,
    ) -> core::result::Result<Option<Gesture>, Fault> {
        use ButtonState as S;

        let caps = &self.config.capabilities;
        if !st.state.enabled_in(caps) {
            return Err(Fault::InvalidState(st.state));
        }

        let since_press = now.wrapping_sub(st.timestamp_interrupt);
        let since_loop = now.wrapping_sub(st.timestamp_loop);
        let mut gesture = None;

        st.state = match st.state {
            S::Idle => S::Idle,

            S::PushDelay => {
                if since_press <= t.push_delay_ms {
                    S::PushDelay
                } else if pressed {
                    S::WaitForEnd
                } else if st.push_count == 0 {
                    S::Idle
                } else {
                    S::WaitForRepeat
                }
            }

            S::WaitForEnd => {
                if !pressed {
                    st.timestamp_loop = now;
                    S::ReleaseDelay
                } else if caps.hold && since_press > t.hold_push_min_ms {
                    st.timestamp_loop = now;
                    gesture = Some(Gesture::Long { held_ms: since_press });
                    S::HoldPush
                } else if since_press > t.normal_timeout_ms {
                    return Err(Fault::NormalTimeout);
                } else {
                    S::WaitForEnd
                }
            }

            S::WaitForRepeat => {
                if since_loop <= t.repeat_window_ms {
                    S::WaitForRepeat
                } else if !caps.count_repeats || st.push_count == 1 {
                    S::SinglePush
                } else {
                    S::RepeatPush
                }
            }

            S::SinglePush => {
                gesture = Some(if since_press > t.long_push_min_ms {
                    Gesture::Long { held_ms: since_press }
                } else {
                    Gesture::Short
                });
                st.push_count = 0;
                st.timestamp_loop = now;
                S::CoolDown
            }

            S::RepeatPush => {
                gesture = Some(Gesture::Repeat { count: st.push_count });
                st.push_count = 0;
                st.timestamp_loop = now;
                S::CoolDown
            }

            S::ReleaseDelay => {
                if since_loop <= t.release_delay_ms {
                    S::ReleaseDelay
                } else if pressed {
                    S::WaitForEnd
                } else {
                    st.push_count = st.push_count.saturating_add(1);
                    st.timestamp_loop = now;
                    let next = if caps.count_repeats {
                        if st.push_count < u8::MAX { S::WaitForRepeat } else { S::RepeatPush }
                    } else if st.push_count == 1 {
                        S::WaitForRepeat
                    } else {
                        S::RepeatPush
                    };
                    match public.combination.filter(|_| caps.combination) {
                        Some(link) if link.completes_chord(cs) => S::CombinationPush,
                        _ => next,
                    }
                }
            }

            S::CoolDown => {
                if since_loop > t.cool_down_ms {
                    st.push_count = 0;
                    S::Idle
                } else {
                    S::CoolDown
                }
            }

            S::CombinationPush => {
                gesture = Some(Gesture::Combination);
                st.push_count = 0;
                st.timestamp_loop = now;
                S::CoolDown
            }

            S::CombinationWaitForEnd => {
                if !pressed {
                    st.timestamp_loop = now;
                    S::CombinationRelease
                } else if since_press > t.combination_timeout_ms {
                    return Err(Fault::CombinationTimeout);
                } else {
                    S::CombinationWaitForEnd
                }
            }

            S::CombinationRelease => {
                if since_loop <= t.release_delay_ms {
                    S::CombinationRelease
                } else if pressed {
                    S::CombinationWaitForEnd
                } else {
                    st.push_count = 0;
                    st.timestamp_loop = now;
                    S::CoolDown
                }
            }

            S::HoldPush => {
                if !pressed {
                    st.timestamp_loop = now;
                    S::HoldRelease
                } else if since_loop > t.hold_interval_ms {
                    gesture = Some(Gesture::Long { held_ms: since_press });
                    st.timestamp_loop = now;
                    S::HoldPush
                } else {
                    S::HoldPush
                }
            }

            S::HoldRelease => {
                if since_loop <= t.release_delay_ms {
                    S::HoldRelease
                } else if pressed {
                    S::HoldPush
                } else {
                    st.push_count = 0;
                    st.timestamp_loop = now;
                    S::CoolDown
                }
            }
        };

        if !st.state.enabled_in(caps) {
            return Err(Fault::InvalidState(st.state));
        }
        Ok(gesture)
    }

    /// The state machine already fell back to `Idle`; escalate if asked to.
    fn report(&self, fault: Fault) {
        if self.config.capabilities.fatal_faults {
            panic!("{}: {fault}", self.name);
        }
        warn!("{}: {fault}, reset to Idle", self.name);
    }

    // ── Status & configuration ─────────────────────────────────

    pub fn state(&self) -> ButtonState {
        critical_section::with(|cs| self.state_in(cs))
    }

    pub fn push_count(&self) -> u8 {
        critical_section::with(|cs| self.status.borrow(cs).get().push_count)
    }

    pub fn is_idle(&self) -> bool {
        self.state() == ButtonState::Idle
    }

    /// Abandon any gesture in progress.
    pub fn reset(&self) {
        critical_section::with(|cs| self.status.borrow(cs).set(PrivateStatus::INIT));
    }

    /// Timing the automaton currently runs with.
    pub fn timing(&self) -> Timing {
        self.config.effective_timing(&self.timing_overrides())
    }

    pub fn timing_overrides(&self) -> TimingOverrides {
        critical_section::with(|cs| self.public.borrow(cs).get().overrides)
    }

    /// Replace the per-button timing overrides. They only take effect when
    /// the button has the `adjustable_timing` capability.
    pub fn set_timing(&self, overrides: TimingOverrides) -> Result<()> {
        overrides.apply(&self.config.timing).validate()?;
        critical_section::with(|cs| {
            let cell = self.public.borrow(cs);
            let mut public = cell.get();
            public.overrides = overrides;
            cell.set(public);
        });
        Ok(())
    }

    /// Make this button the second half of a chord started on `previous`.
    /// `callback` runs when this button is released while `previous` is
    /// still held.
    pub fn set_combination(&self, previous: &'static Button, callback: fn()) -> Result<()> {
        if core::ptr::eq(self, previous) {
            return Err(ConfigError::SelfLink.into());
        }
        if !self.config.capabilities.combination || !previous.config.capabilities.combination {
            return Err(ConfigError::CombinationDisabled.into());
        }
        self.set_link(Some(CombinationLink { previous, callback }));
        debug!("{}: chained after {}", self.name, previous.name);
        Ok(())
    }

    pub fn clear_combination(&self) {
        self.set_link(None);
    }

    pub fn combination(&self) -> Option<CombinationLink> {
        critical_section::with(|cs| self.public.borrow(cs).get().combination)
    }

    fn set_link(&self, link: Option<CombinationLink>) {
        critical_section::with(|cs| {
            let cell = self.public.borrow(cs);
            let mut public = cell.get();
            public.combination = link;
            cell.set(public);
        });
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Whether the pin is away from its idle level.
pub(crate) fn read_pressed<P: InputPin>(pin: &mut P, idle: PinState) -> Result<bool> {
    let high = pin.is_high().map_err(|e| Error::Pin(e.kind()))?;
    Ok(high != (idle == PinState::High))
}
