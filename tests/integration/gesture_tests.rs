//! Single-button gestures: short, long, repeat, hold, cool-down.

use std::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::digital::{ErrorKind, PinState};
use gesture_button::{
    Button, ButtonConfig, ButtonState, Callbacks, Error, Gesture, TimingOverrides,
};

use crate::mock_hw::{Board, Call, MockClock, MockPin};

// ── Classification ────────────────────────────────────────────

#[test]
fn press_of_500ms_is_one_short_push() {
    let mut board = Board::new();
    let b = board.add(ButtonConfig::DEFAULT);

    board.tap(b, 500, 1000);

    assert_eq!(board.calls(b), [Call::Short]);
    assert_eq!(board.button(b).state(), ButtonState::Idle);
}

#[test]
fn press_of_1500ms_is_one_long_push() {
    let mut board = Board::new();
    let b = board.add(ButtonConfig::DEFAULT);

    board.tap(b, 1500, 1000);

    // Classified once the repeat window closes: 1500 held + release
    // confirmation + repeat window.
    assert_eq!(board.calls(b), [Call::Long(1834)]);
}

#[test]
fn three_presses_inside_the_window_are_one_repeat() {
    let mut board = Board::new();
    let b = board.add(ButtonConfig::DEFAULT);

    for _ in 0..3 {
        board.tap(b, 100, 100);
    }
    board.run(1000);

    assert_eq!(board.calls(b), [Call::Repeat(3)]);
}

#[test]
fn presses_outside_the_window_are_separate() {
    let mut board = Board::new();
    let b = board.add(ButtonConfig::DEFAULT);

    board.tap(b, 100, 400);
    board.tap(b, 100, 1000);

    assert_eq!(board.calls(b), [Call::Short, Call::Short]);
}

#[test]
fn glitch_shorter_than_push_delay_is_rejected() {
    let mut board = Board::new();
    let b = board.add(ButtonConfig::DEFAULT);

    board.tap(b, 20, 1000);

    assert!(board.calls(b).is_empty());
    assert_eq!(board.button(b).state(), ButtonState::Idle);
}

#[test]
fn release_bounce_does_not_end_the_press() {
    let mut board = Board::new();
    let b = board.add(ButtonConfig::DEFAULT);

    board.press(b);
    board.run(200);
    // Contact opens briefly, then closes again inside the release delay.
    board.release(b);
    board.run(10);
    board.slots[b].pin.set_pressed(true);
    board.run(1300);
    board.release(b);
    board.run(1000);

    assert!(matches!(board.calls(b), [Call::Long(_)]));
}

// ── Hold ──────────────────────────────────────────────────────

#[test]
fn hold_reports_long_push_every_interval() {
    let mut board = Board::new();
    let b = board.add(ButtonConfig::DEFAULT.with_hold());

    board.press(b);
    board.run(1900);

    assert_eq!(
        board.calls(b),
        [
            Call::Long(1001),
            Call::Long(1202),
            Call::Long(1403),
            Call::Long(1604),
            Call::Long(1805),
        ]
    );

    board.release(b);
    board.run(1000);
    assert_eq!(board.calls(b).len(), 5);
    assert_eq!(board.button(b).state(), ButtonState::Idle);
}

#[test]
fn hold_does_not_change_short_presses() {
    let mut board = Board::new();
    let b = board.add(ButtonConfig::DEFAULT.with_hold());

    board.tap(b, 500, 1000);

    assert_eq!(board.calls(b), [Call::Short]);
}

// ── Cool-down & timing ────────────────────────────────────────

#[test]
fn presses_during_cool_down_are_ignored() {
    let mut board = Board::new();
    let b = board.add(ButtonConfig::DEFAULT);
    board
        .button(b)
        .set_timing(TimingOverrides {
            cool_down_ms: Some(500),
            ..TimingOverrides::NONE
        })
        .unwrap();

    board.tap(b, 500, 400);
    assert_eq!(board.calls(b), [Call::Short]);
    assert_eq!(board.button(b).state(), ButtonState::CoolDown);

    board.tap(b, 100, 1000);
    assert_eq!(board.calls(b), [Call::Short]);
    assert_eq!(board.button(b).state(), ButtonState::Idle);
}

#[test]
fn overrides_ignored_without_adjustable_timing() {
    let mut config = ButtonConfig::DEFAULT;
    config.capabilities.adjustable_timing = false;
    let mut board = Board::new();
    let fixed = board.add(config);
    let tuned = board.add(ButtonConfig::DEFAULT);

    let overrides = TimingOverrides {
        long_push_min_ms: Some(400),
        ..TimingOverrides::NONE
    };
    board.button(fixed).set_timing(overrides).unwrap();
    board.button(tuned).set_timing(overrides).unwrap();

    board.tap(fixed, 300, 0);
    board.tap(tuned, 300, 1000);

    assert_eq!(board.calls(fixed), [Call::Short]);
    assert!(matches!(board.calls(tuned), [Call::Long(_)]));
}

#[test]
fn tick_wraparound_is_transparent() {
    let mut board = Board::starting_at(u32::MAX - 300);
    let b = board.add(ButtonConfig::DEFAULT);

    board.tap(b, 500, 1000);

    assert_eq!(board.calls(b), [Call::Short]);
}

// ── Pin errors & callbacks ────────────────────────────────────

#[test]
fn pin_error_is_returned_and_state_kept() {
    let button = Button::new(ButtonConfig::DEFAULT);
    let clock = MockClock::at(0);
    let mut pin = MockPin::default();

    pin.set_pressed(true);
    button.on_interrupt(0);
    pin.set_broken(true);
    clock.advance(50);

    let res = button.poll(&mut pin, PinState::High, &clock, &mut ());
    assert_eq!(res, Err(Error::Pin(ErrorKind::Other)));
    assert_eq!(button.state(), ButtonState::PushDelay);

    pin.set_broken(false);
    assert_eq!(button.poll(&mut pin, PinState::High, &clock, &mut ()), Ok(None));
    assert_eq!(button.state(), ButtonState::WaitForEnd);
}

static SHORTS: AtomicU32 = AtomicU32::new(0);

fn count_short() {
    SHORTS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn function_pointer_callbacks_and_return_value_agree() {
    let button = Button::new(ButtonConfig::DEFAULT);
    let clock = MockClock::at(0);
    let mut pin = MockPin::default();
    let mut callbacks = Callbacks {
        short: Some(count_short),
        ..Callbacks::default()
    };

    pin.set_pressed(true);
    button.on_interrupt(0);
    let mut returned = Vec::new();
    for t in 1..=1500 {
        clock.advance(1);
        if t == 200 {
            pin.set_pressed(false);
        }
        returned.extend(
            button
                .poll(&mut pin, PinState::High, &clock, &mut callbacks)
                .unwrap(),
        );
    }

    assert_eq!(returned, [Gesture::Short]);
    assert_eq!(SHORTS.load(Ordering::SeqCst), 1);
}
