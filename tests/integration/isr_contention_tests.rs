//! Edge interrupts racing the polling loop.
//!
//! A second thread stands in for the GPIO ISR and hammers
//! `on_interrupt` while the main thread polls. Both go through the
//! host `critical-section` implementation, so every interleaving must
//! leave the button in a state its capabilities allow and the button
//! must settle once the edges stop.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embedded_hal::digital::PinState;
use gesture_button::{Button, ButtonConfig, ButtonState, Tick, TickSource};

use crate::mock_hw::MockPin;

struct SharedClock(AtomicU32);

impl TickSource for SharedClock {
    fn now_ms(&self) -> Tick {
        self.0.load(Ordering::Acquire)
    }
}

#[test]
fn concurrent_edges_never_corrupt_state() {
    let button = Button::new(ButtonConfig::DEFAULT.with_hold());
    let clock = SharedClock(AtomicU32::new(0));
    let stop = AtomicBool::new(false);
    let mut pin = MockPin::default();
    let caps = button.config().capabilities;

    std::thread::scope(|s| {
        s.spawn(|| {
            while !stop.load(Ordering::Acquire) {
                button.trigger(&clock);
                std::thread::yield_now();
            }
        });

        for t in 0..5000u32 {
            pin.set_pressed((t / 97) % 2 == 0);
            clock.0.store(t, Ordering::Release);
            button
                .poll(&mut pin, PinState::High, &clock, &mut ())
                .unwrap();
            assert!(button.state().enabled_in(&caps));
        }
        stop.store(true, Ordering::Release);
    });

    pin.set_pressed(false);
    for t in 5000..7000u32 {
        clock.0.store(t, Ordering::Release);
        button
            .poll(&mut pin, PinState::High, &clock, &mut ())
            .unwrap();
    }
    assert_eq!(button.state(), ButtonState::Idle);
}
