//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter    | Implements      | Connects to                     |
//! |------------|-----------------|---------------------------------|
//! | `gpio`     | (ISR wiring)    | ESP-IDF GPIO ISR service        |
//! | `log_sink` | GestureHandler  | Serial log output               |
//! | `sleep`    | LowPower        | ESP-IDF light sleep / counter   |
//! | `time`     | TickSource      | ESP32 system timer / `Instant`  |

#[cfg(feature = "espidf")]
pub mod gpio;
pub mod log_sink;
pub mod sleep;
pub mod time;
