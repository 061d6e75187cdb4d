//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART on the board, stderr on the host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Booted { temperature } => {
                info!("BOOT  | temperature={}", temperature);
            }
            AppEvent::TemperatureSampled(t) => {
                info!("TEMP  | sampled={}", t);
            }
            AppEvent::TemperatureStepped { from, to } => {
                info!("SIM   | {} -> {}", from, to);
            }
            AppEvent::SimulationRestarted(status) => {
                info!("SIM   | restarted status={:?}", status);
            }
            AppEvent::SubsystemStarted(s) => {
                info!("SYS   | {} on", s);
            }
            AppEvent::SubsystemStopped(s) => {
                info!("SYS   | {} off", s);
            }
            AppEvent::Conflict { requested, active } => {
                warn!("SYS   | {} refused, {} active", requested, active);
            }
        }
    }
}
