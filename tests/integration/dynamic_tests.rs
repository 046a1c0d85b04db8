//! Polled buttons with no interrupt line.

use embedded_hal::digital::PinState;
use gesture_button::{ButtonConfig, ButtonState, DynamicButton, Tick};

use crate::mock_hw::{Call, MockClock, MockPin, Recorder};

struct Polled {
    clock: MockClock,
    pin: MockPin,
    button: DynamicButton<MockPin>,
    recorder: Recorder,
}

impl Polled {
    fn new(config: ButtonConfig) -> Self {
        let pin = MockPin::default();
        Self {
            clock: MockClock::at(0),
            button: DynamicButton::new(pin.clone(), PinState::High, config).named("aux"),
            pin,
            recorder: Recorder::default(),
        }
    }

    fn run(&mut self, ms: Tick) {
        for _ in 0..ms {
            self.clock.advance(1);
            self.button.poll(&self.clock, &mut self.recorder).unwrap();
        }
    }

    fn tap(&mut self, down: Tick, up: Tick) {
        self.pin.set_pressed(true);
        self.run(down);
        self.pin.set_pressed(false);
        self.run(up);
    }
}

#[test]
fn sampled_press_is_classified_like_an_interrupt() {
    let mut p = Polled::new(ButtonConfig::DEFAULT);
    p.tap(500, 1000);
    assert_eq!(p.recorder.calls, [Call::Short]);
    assert_eq!(p.button.button().name(), "aux");
}

#[test]
fn sampled_repeat_counts_presses() {
    let mut p = Polled::new(ButtonConfig::DEFAULT);
    p.tap(80, 80);
    p.tap(80, 80);
    p.tap(80, 1000);
    assert_eq!(p.recorder.calls, [Call::Repeat(3)]);
}

#[test]
fn sampled_hold_repeats_long_push() {
    let mut p = Polled::new(ButtonConfig::DEFAULT.with_hold());
    p.tap(1650, 1000);
    let longs = p
        .recorder
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Long(_)))
        .count();
    assert_eq!(longs, 4);
    assert_eq!(p.button.button().state(), ButtonState::Idle);
}

#[test]
fn released_pin_never_starts_a_cycle() {
    let mut p = Polled::new(ButtonConfig::DEFAULT);
    p.run(5000);
    assert!(p.recorder.calls.is_empty());
    assert_eq!(p.button.button().state(), ButtonState::Idle);
}
