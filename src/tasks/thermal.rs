//! Cooling and heating control.
//!
//! One task per thermal subsystem, both built from [`ThermalTask`].  The
//! task is Active exactly when the shared status names its subsystem,
//! which makes "cooling and heating both on" unrepresentable: a toggle
//! can only activate when the rival subsystem is off, and otherwise
//! reports a conflict without touching any state.
//!
//! ```text
//!            Toggle (rival off)
//!   Inactive ──────────────────▶ Active
//!      ▲  │ Toggle (rival on)      │
//!      │  └──▶ Conflict            │
//!      └───────── Toggle ──────────┘
//! ```
//!
//! Every transition signals the simulation with `SystemsChanged`.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, EventSink, Subsystem};
use crate::app::resources::RequestId;
use crate::environment::{SystemStatus, SystemsGrant};
use crate::events::{Event, TaskId, ToggleOutcome};

use super::Context;

pub struct ThermalTask {
    grant: SystemsGrant,
    subsystem: Subsystem,
    /// Status written while this task is Active.
    active_status: SystemStatus,
}

impl ThermalTask {
    pub fn cooling() -> Self {
        Self {
            grant: SystemsGrant::new(),
            subsystem: Subsystem::Cooling,
            active_status: SystemStatus::Cooling,
        }
    }

    pub fn heating() -> Self {
        Self {
            grant: SystemsGrant::new(),
            subsystem: Subsystem::Heating,
            active_status: SystemStatus::Heating,
        }
    }

    fn id(&self) -> TaskId {
        TaskId::for_subsystem(self.subsystem)
    }

    /// Returns the outcome when `event` was a toggle.
    pub fn handle<H: ActuatorPort, N, S: EventSink>(
        &mut self,
        event: Event,
        cx: &mut Context<'_, H, N, S>,
    ) -> Option<ToggleOutcome> {
        let tag = self.subsystem.tag();
        match event {
            Event::Start => info!("{} ready", tag),
            Event::Toggle(request) => {
                let outcome = self.toggle(cx);
                self.reply(request, outcome, cx);
                return Some(outcome);
            }
            other => debug!("{} ignoring {:?}", tag, other),
        }
        None
    }

    fn toggle<H: ActuatorPort, N, S: EventSink>(
        &mut self,
        cx: &mut Context<'_, H, N, S>,
    ) -> ToggleOutcome {
        let tag = self.subsystem.tag();

        if cx.env.status() == self.active_status {
            cx.hw.stop(self.subsystem);
            cx.env.set_status(&self.grant, SystemStatus::Inactive);
            info!("{} stopped", tag);
            cx.sink.emit(&AppEvent::SubsystemStopped(self.subsystem));
            cx.post(TaskId::Simulation, Event::SystemsChanged);
            return ToggleOutcome::Stopped;
        }

        if let Some(active) = cx.env.status().subsystem() {
            warn!("{} cannot start while {} is active", tag, active);
            cx.sink.emit(&AppEvent::Conflict {
                requested: self.subsystem,
                active,
            });
            return ToggleOutcome::Conflict { active };
        }

        cx.env.set_status(&self.grant, self.active_status);
        cx.hw.start(self.subsystem);
        info!("{} started", tag);
        cx.sink.emit(&AppEvent::SubsystemStarted(self.subsystem));
        cx.post(TaskId::Simulation, Event::SystemsChanged);
        ToggleOutcome::Started
    }

    fn reply<H, N, S>(
        &self,
        request: Option<RequestId>,
        outcome: ToggleOutcome,
        cx: &mut Context<'_, H, N, S>,
    ) {
        let Some(request) = request else {
            return;
        };
        let delivered = cx.post(
            TaskId::Resources,
            Event::Reply {
                request,
                subsystem: self.subsystem,
                outcome,
            },
        );
        if !delivered {
            warn!("{:?} lost reply to request {}", self.id(), request);
        }
    }
}
