//! Fuzz target: `Button::poll` / `Button::on_interrupt`
//!
//! The first byte selects capabilities; every following byte is one step:
//! bit 0 is the pin level, bit 1 fires an edge interrupt, bits 2..8 are
//! the milliseconds to advance. Asserts that the machine never panics and
//! never leaves the states its capabilities enable.
//!
//! cargo fuzz run fuzz_gesture_fsm

#![no_main]

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, PinState};
use gesture_button::{Button, ButtonConfig, Tick, TickSource};
use libfuzzer_sys::fuzz_target;

struct Level(bool);

impl ErrorType for Level {
    type Error = Infallible;
}

impl InputPin for Level {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.0)
    }
}

struct Clock(Cell<Tick>);

impl TickSource for Clock {
    fn now_ms(&self) -> Tick {
        self.0.get()
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&flags, steps)) = data.split_first() else {
        return;
    };

    let mut config = ButtonConfig::DEFAULT;
    config.capabilities.hold = flags & 0b01 != 0;
    config.capabilities.count_repeats = flags & 0b10 != 0;
    let caps = config.capabilities;

    let button = Button::new(config);
    let clock = Clock(Cell::new(Tick::from(flags).wrapping_mul(0x0101_0101)));
    let mut pin = Level(false);

    for &step in steps {
        pin.0 = step & 0b01 != 0;
        if step & 0b10 != 0 {
            button.on_interrupt(clock.now_ms());
        }
        for _ in 0..=(step >> 2) {
            clock.0.set(clock.0.get().wrapping_add(1));
            let _ = button.poll(&mut pin, PinState::High, &clock, &mut ());
            assert!(button.state().enabled_in(&caps));
        }
    }
});
