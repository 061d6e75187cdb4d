//! Subsystem indicator LEDs.
//!
//! | LED   | Subsystem   |
//! |-------|-------------|
//! | blue  | cooling     |
//! | red   | heating     |
//! | green | ventilation |
//!
//! Generic over `embedded_hal` output pins.  The bank drives every pin
//! low when built; after that, switching an LED to the level it already
//! has is a no-op, so repeated start/stop calls are harmless.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::Subsystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    Blue,
    Red,
    Green,
}

impl Led {
    pub fn for_subsystem(subsystem: Subsystem) -> Self {
        match subsystem {
            Subsystem::Cooling => Self::Blue,
            Subsystem::Heating => Self::Red,
            Subsystem::Ventilation => Self::Green,
        }
    }
}

pub struct LedBank<P> {
    blue: P,
    red: P,
    green: P,
    /// Last level written, indexed blue/red/green.
    lit: [bool; 3],
}

impl<P: OutputPin> LedBank<P> {
    pub fn new(blue: P, red: P, green: P) -> Self {
        let mut bank = Self {
            blue,
            red,
            green,
            lit: [true; 3],
        };
        for led in [Led::Blue, Led::Red, Led::Green] {
            bank.set(led, false);
        }
        bank
    }

    pub fn set(&mut self, led: Led, on: bool) {
        let idx = led as usize;
        if self.lit[idx] == on {
            return;
        }
        let pin = match led {
            Led::Blue => &mut self.blue,
            Led::Red => &mut self.red,
            Led::Green => &mut self.green,
        };
        let result = if on { pin.set_high() } else { pin.set_low() };
        match result {
            Ok(()) => self.lit[idx] = on,
            Err(e) => warn!("LED {:?} write failed: {:?}", led, e),
        }
    }

    pub fn is_on(&self, led: Led) -> bool {
        self.lit[led as usize]
    }
}
