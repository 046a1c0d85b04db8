//! Debounced push-button gesture classification.
//!
//! One [`Button`] per physical switch. An edge interrupt seeds a press
//! cycle ([`Button::on_interrupt`]) and the main loop advances it
//! ([`Button::poll`]), reporting short, long, repeated, held and
//! two-button combination pushes. Pins without an interrupt line use
//! [`DynamicButton`], which samples the pin instead.
//!
//! The core depends only on `embedded-hal` pins, a `critical-section`
//! implementation and the [`ports`] traits. ESP-IDF glue lives in
//! [`adapters`] behind the `espidf` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod button;
pub mod config;
pub mod error;
pub mod events;
pub mod pins;
pub mod ports;
pub mod power;

pub use button::{Button, ButtonState, CombinationLink, DynamicButton, Gesture, Tick};
pub use config::{ButtonConfig, Capabilities, Timing, TimingOverrides};
pub use error::{ConfigError, Error, Fault, Result};
pub use ports::{Callbacks, GestureHandler, LowPower, TickSource};
