//! Outbound application events.
//!
//! Tasks emit these through the [`EventSink`](super::ports::EventSink)
//! port.  Adapters on the other side decide what to do with them: log to
//! serial, record in a test, forward to telemetry.

use crate::environment::SystemStatus;

use super::ports::Subsystem;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Boot finished; carries the initial temperature.
    Booted { temperature: i32 },

    /// The sensing task took a sample.
    TemperatureSampled(i32),

    /// The simulation applied one settle-period step.
    TemperatureStepped { from: i32, to: i32 },

    /// The active thermal subsystem changed; settle timer restarted.
    SimulationRestarted(SystemStatus),

    /// A subsystem was switched on.
    SubsystemStarted(Subsystem),

    /// A subsystem was switched off.
    SubsystemStopped(Subsystem),

    /// An activation was refused.
    Conflict {
        requested: Subsystem,
        active: Subsystem,
    },
}
