//! Room temperature simulation.
//!
//! Once per settle period the temperature moves one degree toward the
//! active thermal subsystem's direction, two with ventilation on.  When
//! the active subsystem changes, the settle period starts over so the
//! first step after a switch always reflects a full period of the new
//! subsystem.
//!
//! Ventilation toggles do not send `SystemsChanged`; a ventilation change
//! takes effect at the next step without restarting the period.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::environment::{SystemStatus, TemperatureGrant};
use crate::events::{Event, TaskId};

use super::Context;

/// Temperature change applied by one settle step.
pub fn drift(status: SystemStatus, ventilation: bool) -> i32 {
    let step = if ventilation { 2 } else { 1 };
    match status {
        SystemStatus::Inactive => 0,
        SystemStatus::Cooling => -step,
        SystemStatus::Heating => step,
    }
}

pub struct SimulationTask {
    grant: TemperatureGrant,
    period_ms: u64,
    previous_status: SystemStatus,
    restarts: u32,
    steps: u64,
}

impl SimulationTask {
    pub fn new(period_ms: u64) -> Self {
        Self {
            grant: TemperatureGrant::new(),
            period_ms,
            previous_status: SystemStatus::Inactive,
            restarts: 0,
            steps: 0,
        }
    }

    /// Settle-timer restarts caused by a real status change.
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Settle periods completed.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn handle<H, N, S: EventSink>(&mut self, event: Event, cx: &mut Context<'_, H, N, S>) {
        match event {
            Event::Start => {
                self.previous_status = cx.env.status();
                cx.timers.set(TaskId::Simulation, self.period_ms, cx.now_ms);
                info!("[SIMULATION] started, settle period {}ms", self.period_ms);
            }
            Event::Timer(expired) => {
                let from = cx.env.temperature();
                let delta = drift(cx.env.status(), cx.env.ventilation());
                cx.env.adjust_temperature(&self.grant, delta);
                self.steps += 1;

                let to = cx.env.temperature();
                if to != from {
                    info!("[SIMULATION] Temperature updated to {}", to);
                    cx.sink.emit(&AppEvent::TemperatureStepped { from, to });
                }

                expired.restart(cx.timers, cx.now_ms);
            }
            Event::SystemsChanged => {
                let status = cx.env.status();
                if status == self.previous_status {
                    debug!("[SIMULATION] status unchanged ({:?}), timer kept", status);
                    return;
                }
                self.previous_status = status;
                cx.timers.restart(TaskId::Simulation, cx.now_ms);
                self.restarts += 1;
                info!("[SIMULATION] {:?} now active, settle timer restarted", status);
                cx.sink.emit(&AppEvent::SimulationRestarted(status));
            }
            other => debug!("[SIMULATION] ignoring {:?}", other),
        }
    }
}
