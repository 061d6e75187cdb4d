//! Raw GPIO output pins.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: configures the LED pins as push-pull outputs with raw
//! sys calls and drives them with `gpio_set_level`.
//! On host/test: each pin tracks its level in memory only.
//!
//! Either way the pin is exposed through `embedded_hal::digital::OutputPin`
//! so the LED driver is written once.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

/// Errors during one-shot output configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioInitError {
    ConfigFailed { pin: i32, rc: i32 },
}

impl core::fmt::Display for GpioInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ConfigFailed { pin, rc } => {
                write!(f, "GPIO{} config failed (rc={})", pin, rc)
            }
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_led_outputs() -> Result<(), GpioInitError> {
    for pin in [pins::LED_BLUE_GPIO, pins::LED_RED_GPIO, pins::LED_GREEN_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: called once from main() before the dispatcher starts.
        let rc = unsafe { gpio_config(&cfg) };
        if rc != ESP_OK as i32 {
            return Err(GpioInitError::ConfigFailed { pin, rc });
        }
        unsafe { gpio_set_level(pin, 0) };
    }
    info!("gpio: LED outputs configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_led_outputs() -> Result<(), GpioInitError> {
    log::info!("gpio(sim): LED outputs simulated");
    Ok(())
}

/// One push-pull output pin.
#[derive(Debug)]
pub struct GpioPin {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    pin: i32,
    high: bool,
}

impl GpioPin {
    /// Wrap an already configured output; starts low.
    pub fn new(pin: i32) -> Self {
        Self { pin, high: false }
    }

    fn write(&mut self, high: bool) {
        // SAFETY: the pin was configured as an output by init_led_outputs().
        #[cfg(target_os = "espidf")]
        unsafe {
            gpio_set_level(self.pin, u32::from(high));
        }
        self.high = high;
    }
}

impl ErrorType for GpioPin {
    type Error = Infallible;
}

impl OutputPin for GpioPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}

impl StatefulOutputPin for GpioPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}
