//! Recording adapters for integration tests.
//!
//! Every actuator call, response, notification and domain event is kept
//! so tests can assert on the full history without real GPIOs or sockets.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use thermostat::ThermostatService;
use thermostat::app::events::AppEvent;
use thermostat::app::ports::{ActuatorPort, EventSink, ResourceHost, SensorPort};
use thermostat::app::resources::{Resource, Response};
use thermostat::config::SystemConfig;
use thermostat::environment::Environment;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    StartCooling,
    StopCooling,
    StartHeating,
    StopHeating,
    StartVentilation,
    StopVentilation,
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    /// Fixed probe reading; `None` reads back the simulated room.
    pub probe: Option<i32>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, call: ActuatorCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    fn lit(&self, on: ActuatorCall, off: ActuatorCall) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| {
                if *c == on {
                    Some(true)
                } else if *c == off {
                    Some(false)
                } else {
                    None
                }
            })
            .unwrap_or(false)
    }

    pub fn cooling_on(&self) -> bool {
        self.lit(ActuatorCall::StartCooling, ActuatorCall::StopCooling)
    }

    pub fn heating_on(&self) -> bool {
        self.lit(ActuatorCall::StartHeating, ActuatorCall::StopHeating)
    }

    pub fn ventilation_on(&self) -> bool {
        self.lit(ActuatorCall::StartVentilation, ActuatorCall::StopVentilation)
    }
}

impl SensorPort for MockHardware {
    fn read_temperature(&mut self, env: &Environment) -> i32 {
        self.probe.unwrap_or_else(|| env.temperature())
    }
}

impl ActuatorPort for MockHardware {
    fn start_cooling(&mut self) {
        self.calls.push(ActuatorCall::StartCooling);
    }
    fn stop_cooling(&mut self) {
        self.calls.push(ActuatorCall::StopCooling);
    }
    fn start_heating(&mut self) {
        self.calls.push(ActuatorCall::StartHeating);
    }
    fn stop_heating(&mut self) {
        self.calls.push(ActuatorCall::StopHeating);
    }
    fn start_ventilation(&mut self) {
        self.calls.push(ActuatorCall::StartVentilation);
    }
    fn stop_ventilation(&mut self) {
        self.calls.push(ActuatorCall::StopVentilation);
    }
}

// ── MockHost ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockHost {
    pub registered: Vec<Resource>,
    pub responses: Vec<Response>,
    pub notifications: Vec<(Resource, String)>,
}

#[allow(dead_code)]
impl MockHost {
    pub fn last_response(&self) -> &Response {
        self.responses.last().expect("no response written")
    }
}

impl ResourceHost for MockHost {
    fn register(&mut self, resource: Resource) {
        self.registered.push(resource);
    }
    fn respond(&mut self, response: Response) {
        self.responses.push(response);
    }
    fn notify(&mut self, resource: Resource, body: &str) {
        self.notifications.push((resource, body.to_owned()));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// A booted service plus its recording adapters.
pub struct Rig {
    pub svc: ThermostatService,
    pub hw: MockHardware,
    pub host: MockHost,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    /// Boot with the default config and a fixed initial temperature.
    pub fn at(temperature: i32) -> Self {
        Self::with_config(SystemConfig {
            temp_random_min: temperature,
            temp_random_max: temperature,
            ..SystemConfig::default()
        })
    }

    pub fn with_config(config: SystemConfig) -> Self {
        Self::with_hardware(config, MockHardware::new())
    }

    pub fn with_hardware(config: SystemConfig, mut hw: MockHardware) -> Self {
        let mut host = MockHost::default();
        let mut sink = RecordingSink::default();
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let svc = ThermostatService::boot(config, &mut rng, &mut hw, &mut host, &mut sink)
            .expect("boot");
        Self {
            svc,
            hw,
            host,
            sink,
        }
    }

    pub fn get(&mut self, resource: Resource) -> &Response {
        self.svc
            .request(
                thermostat::app::resources::Method::Get,
                resource,
                &mut self.hw,
                &mut self.host,
                &mut self.sink,
            )
            .expect("request");
        self.host.last_response()
    }

    pub fn post(&mut self, resource: Resource) -> &Response {
        self.svc
            .request(
                thermostat::app::resources::Method::Post,
                resource,
                &mut self.hw,
                &mut self.host,
                &mut self.sink,
            )
            .expect("request");
        self.host.last_response()
    }

    pub fn advance_secs(&mut self, secs: u64) {
        self.svc.advance(
            core::time::Duration::from_secs(secs),
            &mut self.hw,
            &mut self.host,
            &mut self.sink,
        );
    }

    pub fn temperature(&self) -> i32 {
        self.svc.environment().temperature()
    }
}
