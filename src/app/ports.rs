//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ThermostatService (domain)
//! ```
//!
//! Driven adapters (sensor, actuators, event sinks, resource framework)
//! implement these traits.  The [`ThermostatService`](super::service::ThermostatService)
//! consumes them via generics, so the domain core never touches hardware
//! or sockets directly.

use core::fmt;

use crate::environment::Environment;

use super::events::AppEvent;
use super::resources::{Resource, Response};

// ───────────────────────────────────────────────────────────────
// Subsystem identity
// ───────────────────────────────────────────────────────────────

/// The three actuated subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Cooling,
    Heating,
    Ventilation,
}

impl Subsystem {
    pub const ALL: [Subsystem; 3] = [Self::Cooling, Self::Heating, Self::Ventilation];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cooling => "cooling",
            Self::Heating => "heating",
            Self::Ventilation => "ventilation",
        }
    }

    /// Log tag used by the subsystem's control task.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Cooling => "[COOLING]",
            Self::Heating => "[HEATING]",
            Self::Ventilation => "[VENTILATION]",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the sensing task calls this once per period.
pub trait SensorPort {
    /// Sample the room temperature (Celsius).
    ///
    /// `env` is the simulated room; adapters without a physical probe
    /// read the value from it, real probes ignore it.
    fn read_temperature(&mut self, env: &Environment) -> i32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: synchronous, non-blocking, infallible.
///
/// Implementations must tolerate repeated calls: starting an already
/// running subsystem must not corrupt actuator state.
pub trait ActuatorPort {
    fn start_cooling(&mut self);
    fn stop_cooling(&mut self);
    fn start_heating(&mut self);
    fn stop_heating(&mut self);
    fn start_ventilation(&mut self);
    fn stop_ventilation(&mut self);

    /// Start any subsystem.
    fn start(&mut self, subsystem: Subsystem) {
        match subsystem {
            Subsystem::Cooling => self.start_cooling(),
            Subsystem::Heating => self.start_heating(),
            Subsystem::Ventilation => self.start_ventilation(),
        }
    }

    /// Stop any subsystem.
    fn stop(&mut self, subsystem: Subsystem) {
        match subsystem {
            Subsystem::Cooling => self.stop_cooling(),
            Subsystem::Heating => self.stop_heating(),
            Subsystem::Ventilation => self.stop_ventilation(),
        }
    }
}

/// Anything that is both sensor and actuator, one `&mut` for both
/// directions avoids a double mutable borrow at the call site.
pub trait Hardware: SensorPort + ActuatorPort {}

impl<T: SensorPort + ActuatorPort> Hardware for T {}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Resource host port (driven adapter: domain ↔ network framework)
// ───────────────────────────────────────────────────────────────

/// The request/response and publish/subscribe framework, reduced to the
/// three operations the core needs.  Observer bookkeeping belongs to the
/// implementation.
pub trait ResourceHost {
    /// Make a resource reachable by clients.
    fn register(&mut self, resource: Resource);

    /// Deliver the answer to an earlier request.
    fn respond(&mut self, response: Response);

    /// Push `body` to everyone observing `resource`.
    fn notify(&mut self, resource: Resource, body: &str);
}
