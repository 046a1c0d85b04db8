//! Log-based gesture sink adapter.
//!
//! Implements [`GestureHandler`] by writing every gesture to the logger
//! (UART / USB-CDC in production). Handy while wiring up new buttons.

use log::info;

use crate::button::Tick;
use crate::ports::GestureHandler;

/// Adapter that logs every gesture of one button.
pub struct LogGestureSink {
    name: &'static str,
}

impl LogGestureSink {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl GestureHandler for LogGestureSink {
    fn on_short_push(&mut self) {
        info!("BUTTON | {} | short", self.name);
    }

    fn on_long_push(&mut self, held_ms: Tick) {
        info!("BUTTON | {} | long held={}ms", self.name, held_ms);
    }

    fn on_repeat_push(&mut self, count: u8) {
        info!("BUTTON | {} | repeat x{}", self.name, count);
    }

    fn on_combination_push(&mut self) {
        info!("BUTTON | {} | combination", self.name);
    }
}
