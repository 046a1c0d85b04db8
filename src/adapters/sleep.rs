//! Light-sleep adapter.
//!
//! On ESP-IDF the buttons' GPIOs are armed as level-triggered wakeup
//! sources, so a press that lands between the idle check and
//! `esp_light_sleep_start()` wakes the chip straight back up. On the host
//! entering low power only counts.

use log::debug;

use crate::ports::LowPower;

#[derive(Debug, Default)]
pub struct LightSleep {
    entries: u32,
}

impl LightSleep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `gpios` (active-low) as wakeup sources.
    #[cfg(feature = "espidf")]
    pub fn wake_on_low(&mut self, gpios: &[i32]) {
        use esp_idf_svc::sys::*;
        // SAFETY: configuration calls on input pins set up by the GPIO
        // adapter; main task only.
        unsafe {
            for &gpio in gpios {
                gpio_wakeup_enable(gpio, gpio_int_type_t_GPIO_INTR_LOW_LEVEL);
            }
            esp_sleep_enable_gpio_wakeup();
        }
    }

    /// Number of times low power was entered.
    pub fn sleeps(&self) -> u32 {
        self.entries
    }
}

impl LowPower for LightSleep {
    fn enter_low_power(&mut self) {
        self.entries = self.entries.wrapping_add(1);
        debug!("light sleep #{}", self.entries);
        light_sleep();
    }
}

#[cfg(feature = "espidf")]
fn light_sleep() {
    // SAFETY: returns once any armed wakeup source fires.
    unsafe {
        esp_idf_svc::sys::esp_light_sleep_start();
    }
}

#[cfg(not(feature = "espidf"))]
fn light_sleep() {}
