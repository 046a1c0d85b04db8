//! Gesture button demo firmware (ESP32-S3).
//!
//! ```text
//! ┌──────────────┐  NEGEDGE ISR   ┌─────────┐
//! │ GPIO0 (PLAY) │───────────────▶│ Button  │──┐
//! └──────────────┘                └─────────┘  │ combination
//! ┌──────────────┐  NEGEDGE ISR   ┌─────────┐  │ (PLAY held,
//! │ GPIO4 (MODE) │───────────────▶│ Button  │◀─┘  MODE tapped)
//! └──────────────┘                └─────────┘
//! ┌──────────────┐  sampled       ┌───────────────┐
//! │ GPIO5 (AUX)  │───────────────▶│ DynamicButton │  hold enabled
//! └──────────────┘                └───────────────┘
//!
//!   poll ──▶ QueueSink ──▶ EventQueue ──▶ drain (main loop)
//!   all idle ──▶ light sleep (GPIO level wakeup)
//! ```

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use embedded_hal::digital::PinState;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use gesture_button::adapters::gpio;
use gesture_button::adapters::log_sink::LogGestureSink;
use gesture_button::adapters::sleep::LightSleep;
use gesture_button::adapters::time::SystemClock;
use gesture_button::events::{ButtonId, EventQueue, GestureEvent, QueueSink};
use gesture_button::{
    Button, ButtonConfig, Capabilities, DynamicButton, Gesture, LowPower, pins, power,
};

// ── Static buttons ────────────────────────────────────────────
//
// Interrupt-driven buttons must be 'static: the GPIO ISR holds a
// reference to them.

const CONFIG: ButtonConfig = ButtonConfig {
    capabilities: Capabilities {
        fatal_faults: cfg!(debug_assertions),
        ..Capabilities::DEFAULT
    },
    ..ButtonConfig::DEFAULT
};

static PLAY: Button = Button::new(CONFIG).named("play");
static MODE: Button = Button::new(CONFIG).named("mode");

static EVENTS: EventQueue<16> = EventQueue::new();

const PLAY_ID: ButtonId = ButtonId(0);
const MODE_ID: ButtonId = ButtonId(1);

fn on_chord() {
    info!("chord: PLAY+MODE");
}

fn handle(event: GestureEvent) {
    let name = match event.button {
        PLAY_ID => "play",
        MODE_ID => "mode",
        _ => "?",
    };
    match event.gesture {
        Gesture::Short => info!("{}: short", name),
        Gesture::Long { held_ms } => info!("{}: long ({} ms)", name, held_ms),
        Gesture::Repeat { count } => info!("{}: repeat x{}", name, count),
        Gesture::Combination => info!("{}: combination", name),
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Gesture Button demo v{}          ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    CONFIG.validate().map_err(gesture_button::Error::from)?;

    // ── 2. Pins ───────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let mut play_pin = PinDriver::input(peripherals.pins.gpio0)?;
    play_pin.set_pull(Pull::Up)?;
    let mut mode_pin = PinDriver::input(peripherals.pins.gpio4)?;
    mode_pin.set_pull(Pull::Up)?;
    let mut aux_pin = PinDriver::input(peripherals.pins.gpio5)?;
    aux_pin.set_pull(Pull::Up)?;

    // ── 3. Interrupts + combination ───────────────────────────
    gpio::install_isr_service()?;
    gpio::attach_button(pins::BUTTON_PLAY_GPIO, &PLAY)?;
    gpio::attach_button(pins::BUTTON_MODE_GPIO, &MODE)?;
    MODE.set_combination(&PLAY, on_chord)?;

    let mut aux = DynamicButton::new(aux_pin, PinState::High, CONFIG.with_hold()).named("aux");

    // ── 4. Adapters ───────────────────────────────────────────
    let clock = SystemClock::new();
    let mut sleep = LightSleep::new();
    sleep.wake_on_low(&[
        pins::BUTTON_PLAY_GPIO,
        pins::BUTTON_MODE_GPIO,
        pins::BUTTON_AUX_GPIO,
    ]);
    let mut play_sink = QueueSink::new(&EVENTS, PLAY_ID);
    let mut mode_sink = QueueSink::new(&EVENTS, MODE_ID);
    let mut aux_sink = LogGestureSink::new("aux");

    info!("Entering main loop ({} ms poll)", pins::POLL_INTERVAL_MS);

    // ── 5. Main loop ──────────────────────────────────────────
    loop {
        if let Err(e) = PLAY.poll(&mut play_pin, PinState::High, &clock, &mut play_sink) {
            warn!("play: {}", e);
        }
        if let Err(e) = MODE.poll(&mut mode_pin, PinState::High, &clock, &mut mode_sink) {
            warn!("mode: {}", e);
        }
        if let Err(e) = aux.poll(&clock, &mut aux_sink) {
            warn!("aux: {}", e);
        }

        EVENTS.drain(handle);

        // Light sleep runs outside the critical section; the level-triggered
        // wakeup covers a press landing after the idle check.
        if EVENTS.is_empty() && power::all_idle(&[&PLAY, &MODE, aux.button()]) {
            sleep.enter_low_power();
            // Edges that arrive while asleep only wake the chip.
            if play_pin.is_low() {
                PLAY.trigger(&clock);
            }
            if mode_pin.is_low() {
                MODE.trigger(&clock);
            }
        }

        FreeRtos::delay_ms(pins::POLL_INTERVAL_MS);
    }
}
