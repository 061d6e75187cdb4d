//! Hardware adapter: bridges the board to the domain port traits.
//!
//! Owns the indicator [`LedBank`] and exposes it through
//! [`ActuatorPort`].  The prototype board has no temperature probe, so
//! [`SensorPort`] reads back the simulated room temperature.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{ActuatorPort, SensorPort, Subsystem};
use crate::drivers::leds::{Led, LedBank};
use crate::environment::Environment;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P> {
    leds: LedBank<P>,
}

impl<P: OutputPin> HardwareAdapter<P> {
    pub fn new(leds: LedBank<P>) -> Self {
        Self { leds }
    }

    pub fn leds(&self) -> &LedBank<P> {
        &self.leds
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P> SensorPort for HardwareAdapter<P> {
    fn read_temperature(&mut self, env: &Environment) -> i32 {
        env.temperature()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin> ActuatorPort for HardwareAdapter<P> {
    fn start_cooling(&mut self) {
        self.start(Subsystem::Cooling);
    }

    fn stop_cooling(&mut self) {
        self.stop(Subsystem::Cooling);
    }

    fn start_heating(&mut self) {
        self.start(Subsystem::Heating);
    }

    fn stop_heating(&mut self) {
        self.stop(Subsystem::Heating);
    }

    fn start_ventilation(&mut self) {
        self.start(Subsystem::Ventilation);
    }

    fn stop_ventilation(&mut self) {
        self.stop(Subsystem::Ventilation);
    }

    fn start(&mut self, subsystem: Subsystem) {
        self.leds.set(Led::for_subsystem(subsystem), true);
    }

    fn stop(&mut self, subsystem: Subsystem) {
        self.leds.set(Led::for_subsystem(subsystem), false);
    }
}
