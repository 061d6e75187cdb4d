//! GPIO pin assignments for the thermostat board.
//!
//! Single source of truth; drivers reference this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Subsystem indicator LEDs (active HIGH, 330 Ω series resistors)
// ---------------------------------------------------------------------------

/// Cooling indicator.
pub const LED_BLUE_GPIO: i32 = 13;
/// Heating indicator.
pub const LED_RED_GPIO: i32 = 11;
/// Ventilation indicator.
pub const LED_GREEN_GPIO: i32 = 12;

