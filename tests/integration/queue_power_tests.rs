//! Event queue delivery and idle-gated low power across several buttons.

use embedded_hal::digital::PinState;
use gesture_button::adapters::sleep::LightSleep;
use gesture_button::events::{ButtonId, EventQueue, GestureEvent, QueueSink};
use gesture_button::{Button, ButtonConfig, Gesture, power};

use crate::mock_hw::{MockClock, MockPin};

#[test]
fn gestures_from_two_buttons_arrive_in_order() {
    let queue: EventQueue<8> = EventQueue::new();
    let clock = MockClock::at(0);
    let buttons = [
        Button::new(ButtonConfig::DEFAULT).named("left"),
        Button::new(ButtonConfig::DEFAULT).named("right"),
    ];
    let mut pins = [MockPin::default(), MockPin::default()];
    let mut sinks = [
        QueueSink::new(&queue, ButtonId(0)),
        QueueSink::new(&queue, ButtonId(1)),
    ];

    // left: short press at 0..200, right: long press at 100..1400.
    for t in 0..3000u32 {
        match t {
            0 => {
                pins[0].set_pressed(true);
                buttons[0].on_interrupt(t);
            }
            100 => {
                pins[1].set_pressed(true);
                buttons[1].on_interrupt(t);
            }
            200 => pins[0].set_pressed(false),
            1400 => pins[1].set_pressed(false),
            _ => {}
        }
        clock.advance(1);
        for i in 0..2 {
            buttons[i]
                .poll(&mut pins[i], PinState::High, &clock, &mut sinks[i])
                .unwrap();
        }
    }

    let mut events = Vec::new();
    queue.drain(|e| events.push(e));
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        GestureEvent {
            button: ButtonId(0),
            gesture: Gesture::Short,
        }
    );
    assert_eq!(events[1].button, ButtonId(1));
    assert!(matches!(events[1].gesture, Gesture::Long { .. }));
    assert_eq!(sinks[0].dropped() + sinks[1].dropped(), 0);
}

#[test]
fn sleep_only_between_gestures() {
    let clock = MockClock::at(0);
    let button = Button::new(ButtonConfig::DEFAULT);
    let mut pin = MockPin::default();
    let mut sleep = LightSleep::new();

    assert!(power::sleep_if_idle(&[&button], &mut sleep));

    pin.set_pressed(true);
    button.on_interrupt(0);
    let mut slept_mid_gesture = false;
    for t in 1..=1000 {
        clock.advance(1);
        if t == 300 {
            pin.set_pressed(false);
        }
        button.poll(&mut pin, PinState::High, &clock, &mut ()).unwrap();
        if t < 600 {
            slept_mid_gesture |= power::sleep_if_idle(&[&button], &mut sleep);
        }
    }

    assert!(!slept_mid_gesture);
    assert!(power::all_idle(&[&button]));
    assert!(power::sleep_if_idle(&[&button], &mut sleep));
    assert_eq!(sleep.sleeps(), 2);
}
