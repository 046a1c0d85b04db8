//! GPIO edge-interrupt wiring for [`Button`]s (ESP-IDF only).
//!
//! Pins are configured as inputs with the internal pull-up and a
//! falling-edge interrupt. The per-pin ISR receives the `&'static Button`
//! as its argument and calls [`Button::trigger`] with the ISR-safe clock.

use esp_idf_svc::sys::*;
use log::info;

use super::time::SystemClock;
use crate::button::Button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    ConfigFailed { gpio: i32, rc: i32 },
    IsrInstallFailed(i32),
    HandlerAddFailed { gpio: i32, rc: i32 },
}

impl core::fmt::Display for GpioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ConfigFailed { gpio, rc } => write!(f, "GPIO{} config failed (rc={})", gpio, rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::HandlerAddFailed { gpio, rc } => {
                write!(f, "GPIO{} ISR handler add failed (rc={})", gpio, rc)
            }
        }
    }
}

impl std::error::Error for GpioError {}

/// Install the per-pin GPIO ISR service. Already installed is fine.
pub fn install_isr_service() -> Result<(), GpioError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed.
    let ret = unsafe { gpio_install_isr_service(0) };
    if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
        return Err(GpioError::IsrInstallFailed(ret));
    }
    Ok(())
}

/// Configure `gpio` as an active-low button input and route its falling
/// edge to `button`.
pub fn attach_button(gpio: i32, button: &'static Button) -> Result<(), GpioError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << gpio,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
    };
    // SAFETY: plain register configuration of a pin nothing else owns;
    // called from the main task before the loop starts.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(GpioError::ConfigFailed { gpio, rc: ret });
    }

    let arg = core::ptr::from_ref(button).cast_mut().cast::<core::ffi::c_void>();
    // SAFETY: `button` is 'static, so the pointer handed to the ISR never
    // dangles; the ISR only creates a shared reference from it.
    let ret = unsafe { gpio_isr_handler_add(gpio, Some(button_gpio_isr), arg) };
    if ret != ESP_OK as i32 {
        return Err(GpioError::HandlerAddFailed { gpio, rc: ret });
    }
    // SAFETY: handler registered above.
    unsafe { gpio_intr_enable(gpio) };

    info!("gpio: GPIO{} -> {}", gpio, button.name());
    Ok(())
}

unsafe extern "C" fn button_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` was produced from a `&'static Button` in `attach_button`.
    let button = unsafe { &*arg.cast::<Button>() };
    button.trigger(&SystemClock::new());
}
