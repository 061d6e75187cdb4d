//! Ventilation control.  Independent of the thermal status; every toggle
//! succeeds.  The simulation is not signalled: a ventilation change only
//! alters the size of the next settle step.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, EventSink, Subsystem};
use crate::environment::SystemsGrant;
use crate::events::{Event, TaskId, ToggleOutcome};

use super::Context;

pub struct VentilationTask {
    grant: SystemsGrant,
}

impl Default for VentilationTask {
    fn default() -> Self {
        Self::new()
    }
}

impl VentilationTask {
    pub fn new() -> Self {
        Self {
            grant: SystemsGrant::new(),
        }
    }

    pub fn handle<H: ActuatorPort, N, S: EventSink>(
        &mut self,
        event: Event,
        cx: &mut Context<'_, H, N, S>,
    ) -> Option<ToggleOutcome> {
        match event {
            Event::Start => info!("[VENTILATION] ready"),
            Event::Toggle(request) => {
                let outcome = if cx.env.ventilation() {
                    cx.env.set_ventilation(&self.grant, false);
                    cx.hw.stop_ventilation();
                    info!("[VENTILATION] stopped");
                    cx.sink.emit(&AppEvent::SubsystemStopped(Subsystem::Ventilation));
                    ToggleOutcome::Stopped
                } else {
                    cx.env.set_ventilation(&self.grant, true);
                    cx.hw.start_ventilation();
                    info!("[VENTILATION] started");
                    cx.sink.emit(&AppEvent::SubsystemStarted(Subsystem::Ventilation));
                    ToggleOutcome::Started
                };

                if let Some(request) = request {
                    let reply = Event::Reply {
                        request,
                        subsystem: Subsystem::Ventilation,
                        outcome,
                    };
                    if !cx.post(TaskId::Resources, reply) {
                        warn!("[VENTILATION] lost reply to request {}", request);
                    }
                }
                return Some(outcome);
            }
            other => debug!("[VENTILATION] ignoring {:?}", other),
        }
        None
    }
}
