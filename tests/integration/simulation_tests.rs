//! Settle-timer behaviour: debounce, re-arming and the ventilation rule.

use crate::mock_hw::Rig;

use thermostat::app::events::AppEvent;
use thermostat::app::ports::Subsystem;
use thermostat::app::resources::Resource;
use thermostat::config::SystemConfig;
use thermostat::environment::SystemStatus;
use thermostat::error::Error;
use thermostat::events::{TaskId, ToggleOutcome};

#[test]
fn periodic_tasks_keep_running() {
    let mut rig = Rig::at(20);
    rig.advance_secs(100);
    assert_eq!(rig.svc.samples_taken(), 20);
    assert_eq!(rig.svc.simulation_steps(), 5);
    assert!(rig.svc.timers().is_armed(TaskId::Sensing));
    assert!(rig.svc.timers().is_armed(TaskId::Simulation));
    assert_eq!(rig.svc.now_ms(), 100_000);
}

#[test]
fn status_change_restarts_settle_period() {
    let mut rig = Rig::at(20);
    rig.advance_secs(15);
    rig.post(Resource::Heating);
    assert_eq!(rig.svc.simulation_restarts(), 1);
    assert_eq!(rig.svc.timers().deadline(TaskId::Simulation), Some(35_000));

    rig.advance_secs(10);
    assert_eq!(rig.temperature(), 20, "old deadline was cancelled");
    rig.advance_secs(10);
    assert_eq!(rig.temperature(), 21);
}

#[test]
fn conflict_does_not_restart_settle_period() {
    let mut rig = Rig::at(20);
    rig.post(Resource::Cooling);
    rig.advance_secs(7);
    rig.post(Resource::Heating);
    rig.post(Resource::Heating);

    assert_eq!(rig.svc.simulation_restarts(), 1);
    assert_eq!(rig.svc.timers().deadline(TaskId::Simulation), Some(20_000));
}

#[test]
fn ventilation_toggle_keeps_settle_timer_but_doubles_step() {
    let mut rig = Rig::at(20);
    rig.advance_secs(15);
    rig.post(Resource::Cooling);
    rig.advance_secs(5);

    rig.post(Resource::Ventilation);
    assert!(rig.svc.environment().ventilation());
    assert_eq!(rig.svc.simulation_restarts(), 1);
    assert_eq!(rig.svc.timers().deadline(TaskId::Simulation), Some(35_000));

    rig.advance_secs(15);
    assert_eq!(rig.temperature(), 18);
}

#[test]
fn direct_toggle_mirrors_resource_semantics() {
    let mut rig = Rig::at(20);
    let outcome = rig
        .svc
        .toggle(Subsystem::Cooling, &mut rig.hw, &mut rig.host, &mut rig.sink);
    assert_eq!(outcome, Ok(ToggleOutcome::Started));

    let refused = rig
        .svc
        .toggle(Subsystem::Heating, &mut rig.hw, &mut rig.host, &mut rig.sink);
    assert_eq!(
        refused,
        Err(Error::Conflict {
            requested: Subsystem::Heating,
            active: Subsystem::Cooling,
        })
    );
    assert!(rig.sink.events.contains(&AppEvent::Conflict {
        requested: Subsystem::Heating,
        active: Subsystem::Cooling,
    }));

    let stopped = rig
        .svc
        .toggle(Subsystem::Cooling, &mut rig.hw, &mut rig.host, &mut rig.sink);
    assert_eq!(stopped, Ok(ToggleOutcome::Stopped));
    assert_eq!(rig.svc.status(), SystemStatus::Inactive);
    assert!(rig.host.responses.is_empty(), "direct toggles are not answered");
}

#[test]
fn simulation_disabled_keeps_temperature_at_probe_value() {
    let mut rig = Rig::with_config(SystemConfig {
        simulation_enabled: false,
        ..SystemConfig::default()
    });
    assert_eq!(rig.temperature(), 0);
    assert_eq!(rig.svc.timers().deadline(TaskId::Simulation), None);

    rig.post(Resource::Heating);
    rig.advance_secs(60);
    assert_eq!(rig.temperature(), 0);
    assert_eq!(rig.svc.simulation_restarts(), 0);
}

#[test]
fn boot_emits_booted_and_no_subsystem_starts() {
    let rig = Rig::at(25);
    assert_eq!(
        rig.sink.events.last(),
        Some(&AppEvent::Booted { temperature: 25 })
    );
    assert!(rig.hw.calls.is_empty());
}
