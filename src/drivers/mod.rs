//! Actuator drivers and GPIO helpers.

pub mod gpio;
pub mod leds;
