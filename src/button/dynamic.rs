//! Polled button for pins without an edge interrupt.
//!
//! [`DynamicButton`] owns its pin and seeds the press cycle itself: every
//! poll samples the pin and, when the button is ready for a press and the
//! level is away from idle, performs the interrupt-side seed inline before
//! advancing the automaton.

use embedded_hal::digital::{InputPin, PinState};

use super::{Button, Gesture, read_pressed};
use crate::config::ButtonConfig;
use crate::error::Result;
use crate::ports::{GestureHandler, TickSource};

pub struct DynamicButton<P> {
    pin: P,
    idle: PinState,
    button: Button,
}

impl<P: InputPin> DynamicButton<P> {
    pub const fn new(pin: P, idle: PinState, config: ButtonConfig) -> Self {
        Self {
            pin,
            idle,
            button: Button::new(config),
        }
    }

    #[must_use]
    pub fn named(self, name: &'static str) -> Self {
        Self {
            button: self.button.named(name),
            ..self
        }
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    pub fn poll<C, H>(&mut self, clock: &C, handler: &mut H) -> Result<Option<Gesture>>
    where
        C: TickSource + ?Sized,
        H: GestureHandler + ?Sized,
    {
        let pressed = read_pressed(&mut self.pin, self.idle)?;
        if pressed {
            let now = clock.now_ms();
            // Only takes effect in Idle or WaitForRepeat.
            critical_section::with(|cs| self.button.seed(cs, now));
        }
        self.button.poll(&mut self.pin, self.idle, clock, handler)
    }
}
