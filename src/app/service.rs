//! Thermostat service: the cooperative dispatcher.
//!
//! [`ThermostatService`] owns the environment, the timer table, the event
//! queue and every task.  It exposes a clean, hardware-agnostic API; all
//! I/O flows through port traits injected at call sites, so the whole
//! control core runs under test with mock adapters and a virtual clock.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                  │    ThermostatService      │
//! ActuatorPort ◀── │ timers · queue · tasks    │ ◀─▶ ResourceHost
//!                  └──────────────────────────┘
//! ```
//!
//! Exactly one event is handled at a time.  A task's handler is its only
//! suspend point, so the environment is never observed half-written.

use core::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::config::SystemConfig;
use crate::environment::{Environment, SystemStatus};
use crate::error::{Error, Result};
use crate::events::{Envelope, Event, EventQueue, TaskId, ToggleOutcome};
use crate::tasks::Context;
use crate::tasks::resources::ResourceTask;
use crate::tasks::sensing::SensingTask;
use crate::tasks::simulation::SimulationTask;
use crate::tasks::thermal::ThermalTask;
use crate::tasks::ventilation::VentilationTask;
use crate::timer::Timers;

use super::events::AppEvent;
use super::ports::{EventSink, Hardware, ResourceHost, Subsystem};
use super::resources::{Method, Request, RequestId, Resource};

// ───────────────────────────────────────────────────────────────
// ThermostatService
// ───────────────────────────────────────────────────────────────

pub struct ThermostatService {
    config: SystemConfig,
    now_ms: u64,
    env: Environment,
    timers: Timers,
    queue: EventQueue,
    next_request: RequestId,

    sensing: SensingTask,
    resources: Option<ResourceTask>,
    simulation: Option<SimulationTask>,
    cooling: Option<ThermalTask>,
    heating: Option<ThermalTask>,
    ventilation: Option<VentilationTask>,
}

impl ThermostatService {
    /// Validate `config`, seed the environment and start every enabled
    /// task in boot order.  No subsystem is switched on.
    pub fn boot<H, N, S>(
        config: SystemConfig,
        rng: &mut impl Rng,
        hw: &mut H,
        net: &mut N,
        sink: &mut S,
    ) -> Result<Self>
    where
        H: Hardware,
        N: ResourceHost,
        S: EventSink,
    {
        config.validate()?;
        info!("[BOOT] Starting...");

        let temperature = if config.simulation_enabled {
            let t = rng.gen_range(config.temp_random_min..=config.temp_random_max);
            info!("[BOOT] Initial temperature randomly set to {}", t);
            t
        } else {
            0
        };

        let mut service = Self {
            sensing: SensingTask::new(config.sensing_period_ms()),
            resources: config
                .rest_server_enabled
                .then(|| ResourceTask::new(&config)),
            simulation: config
                .simulation_enabled
                .then(|| SimulationTask::new(config.simulation_period_ms())),
            cooling: config.cooling_enabled.then(ThermalTask::cooling),
            heating: config.heating_enabled.then(ThermalTask::heating),
            ventilation: config.ventilation_enabled.then(VentilationTask::new),
            config,
            now_ms: 0,
            env: Environment::new(temperature),
            timers: Timers::new(),
            queue: EventQueue::new(),
            next_request: 1,
        };

        for task in TaskId::ALL {
            if service.is_enabled(task) {
                service.post(task, Event::Start)?;
            }
        }
        service.run_until_idle(hw, net, sink);

        sink.emit(&AppEvent::Booted { temperature });
        info!("[BOOT] Completed");
        Ok(service)
    }

    // ── Inbound API ───────────────────────────────────────────

    /// Queue a request for the resource task.  The answer arrives through
    /// [`ResourceHost::respond`] once the queue is drained.
    pub fn submit(&mut self, method: Method, resource: Resource) -> Result<RequestId> {
        if self.resources.is_none() {
            return Err(Error::Disabled("rest server"));
        }
        let id = self.next_request;
        self.next_request = self.next_request.wrapping_add(1);
        self.post(
            TaskId::Resources,
            Event::Request(Request {
                id,
                method,
                resource,
            }),
        )?;
        Ok(id)
    }

    /// [`submit`](Self::submit) and drain the queue, so the response has
    /// been written when this returns.
    pub fn request<H, N, S>(
        &mut self,
        method: Method,
        resource: Resource,
        hw: &mut H,
        net: &mut N,
        sink: &mut S,
    ) -> Result<RequestId>
    where
        H: Hardware,
        N: ResourceHost,
        S: EventSink,
    {
        let id = self.submit(method, resource)?;
        self.run_until_idle(hw, net, sink);
        Ok(id)
    }

    /// Toggle a subsystem directly, bypassing the resource interface.
    ///
    /// Returns the outcome, or [`Error::Conflict`] when the rival thermal
    /// subsystem is running; state is untouched in that case.
    pub fn toggle<H, N, S>(
        &mut self,
        subsystem: Subsystem,
        hw: &mut H,
        net: &mut N,
        sink: &mut S,
    ) -> Result<ToggleOutcome>
    where
        H: Hardware,
        N: ResourceHost,
        S: EventSink,
    {
        // Settle pending work so the toggle sees a quiescent environment.
        self.run_until_idle(hw, net, sink);
        let outcome = self.dispatch(
            Envelope {
                target: TaskId::for_subsystem(subsystem),
                event: Event::Toggle(None),
            },
            hw,
            net,
            sink,
        );
        self.run_until_idle(hw, net, sink);

        match outcome {
            Some(ToggleOutcome::Conflict { active }) => Err(Error::Conflict {
                requested: subsystem,
                active,
            }),
            Some(outcome) => Ok(outcome),
            None => Err(Error::Disabled(subsystem.name())),
        }
    }

    // ── Dispatch ──────────────────────────────────────────────

    /// Deliver queued events until the queue is empty.
    /// Returns the number of events handled.
    pub fn run_until_idle<H, N, S>(&mut self, hw: &mut H, net: &mut N, sink: &mut S) -> usize
    where
        H: Hardware,
        N: ResourceHost,
        S: EventSink,
    {
        let mut handled = 0;
        while let Some(envelope) = self.queue.pop() {
            self.dispatch(envelope, hw, net, sink);
            handled += 1;
        }
        handled
    }

    /// Move the clock forward by `elapsed`, firing every timer that falls
    /// due in deadline order and draining the queue after each one.
    pub fn advance<H, N, S>(&mut self, elapsed: Duration, hw: &mut H, net: &mut N, sink: &mut S)
    where
        H: Hardware,
        N: ResourceHost,
        S: EventSink,
    {
        let step = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let target = self.now_ms.saturating_add(step);

        self.run_until_idle(hw, net, sink);
        while let Some(expired) = self.timers.expire_due(target) {
            self.now_ms = self.now_ms.max(expired.deadline_ms());
            let owner = expired.owner();
            self.dispatch(
                Envelope {
                    target: owner,
                    event: Event::Timer(expired),
                },
                hw,
                net,
                sink,
            );
            self.run_until_idle(hw, net, sink);
        }
        self.now_ms = target;
    }

    /// Hand one event to its task.  Returns the outcome when a subsystem
    /// task handled a toggle, `None` otherwise.
    fn dispatch<H, N, S>(
        &mut self,
        envelope: Envelope,
        hw: &mut H,
        net: &mut N,
        sink: &mut S,
    ) -> Option<ToggleOutcome>
    where
        H: Hardware,
        N: ResourceHost,
        S: EventSink,
    {
        let Envelope { target, event } = envelope;
        let mut cx = Context {
            now_ms: self.now_ms,
            env: &mut self.env,
            timers: &mut self.timers,
            queue: &mut self.queue,
            hw,
            net,
            sink,
        };

        match target {
            TaskId::Sensing => {
                self.sensing.handle(event, &mut cx);
                None
            }
            TaskId::Resources => {
                match self.resources.as_mut() {
                    Some(task) => task.handle(event, &mut cx),
                    None => debug!("resource server disabled, dropping {:?}", event),
                }
                None
            }
            TaskId::Simulation => {
                match self.simulation.as_mut() {
                    Some(task) => task.handle(event, &mut cx),
                    None => debug!("simulation disabled, dropping {:?}", event),
                }
                None
            }
            TaskId::Cooling => match self.cooling.as_mut() {
                Some(task) => task.handle(event, &mut cx),
                None => {
                    debug!("cooling disabled, dropping {:?}", event);
                    None
                }
            },
            TaskId::Heating => match self.heating.as_mut() {
                Some(task) => task.handle(event, &mut cx),
                None => {
                    debug!("heating disabled, dropping {:?}", event);
                    None
                }
            },
            TaskId::Ventilation => match self.ventilation.as_mut() {
                Some(task) => task.handle(event, &mut cx),
                None => {
                    debug!("ventilation disabled, dropping {:?}", event);
                    None
                }
            },
        }
    }

    fn post(&mut self, target: TaskId, event: Event) -> Result<()> {
        if self.queue.post(target, event) {
            Ok(())
        } else {
            Err(Error::QueueFull)
        }
    }

    fn is_enabled(&self, task: TaskId) -> bool {
        match task {
            TaskId::Sensing => true,
            TaskId::Resources => self.resources.is_some(),
            TaskId::Simulation => self.simulation.is_some(),
            TaskId::Cooling => self.cooling.is_some(),
            TaskId::Heating => self.heating.is_some(),
            TaskId::Ventilation => self.ventilation.is_some(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn status(&self) -> SystemStatus {
        self.env.status()
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Virtual clock, milliseconds since boot.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Earliest armed timer deadline, for hosts that sleep between
    /// expiries.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn events_dropped(&self) -> u32 {
        self.queue.dropped()
    }

    pub fn samples_taken(&self) -> u64 {
        self.sensing.samples()
    }

    /// Settle-timer restarts caused by a status change (0 when the
    /// simulation is disabled).
    pub fn simulation_restarts(&self) -> u32 {
        self.simulation.as_ref().map_or(0, SimulationTask::restarts)
    }

    pub fn simulation_steps(&self) -> u64 {
        self.simulation.as_ref().map_or(0, SimulationTask::steps)
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
