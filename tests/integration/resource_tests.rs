//! Resource registration, reads, error codes and the temperature feed.

use crate::mock_hw::{MockHardware, Rig};

use thermostat::app::resources::{Method, Resource, ResponseCode};
use thermostat::config::SystemConfig;
use thermostat::error::Error;

#[test]
fn boot_registers_every_enabled_resource() {
    let rig = Rig::at(20);
    assert_eq!(rig.host.registered, Resource::ALL);
}

#[test]
fn disabled_subsystem_is_not_exposed() {
    let mut rig = Rig::with_config(SystemConfig {
        ventilation_enabled: false,
        ..SystemConfig::default()
    });
    assert!(!rig.host.registered.contains(&Resource::Ventilation));

    let resp = rig.post(Resource::Ventilation).clone();
    assert_eq!(resp.code, ResponseCode::NotFound);
    assert!(!rig.svc.environment().ventilation());
}

#[test]
fn wrong_method_is_refused() {
    let mut rig = Rig::at(20);
    assert_eq!(
        rig.get(Resource::Cooling).code,
        ResponseCode::MethodNotAllowed
    );
    assert_eq!(
        rig.post(Resource::Systems).code,
        ResponseCode::MethodNotAllowed
    );
    assert!(rig.hw.calls.is_empty());
}

#[test]
fn temperature_read_returns_current_value() {
    let mut rig = Rig::at(17);
    let resp = rig.get(Resource::Temperature).clone();
    assert_eq!(resp.code, ResponseCode::Content);
    assert_eq!(resp.body, r#"{"temperature":17}"#);
}

#[test]
fn every_sample_is_pushed_to_observers() {
    let hw = MockHardware {
        probe: Some(30),
        ..MockHardware::default()
    };
    let mut rig = Rig::with_hardware(SystemConfig::default(), hw);

    rig.advance_secs(15);
    assert_eq!(rig.svc.samples_taken(), 3);
    assert_eq!(rig.host.notifications.len(), 3);
    for (resource, body) in &rig.host.notifications {
        assert_eq!(*resource, Resource::Temperature);
        assert_eq!(body, r#"{"temperature":30}"#);
    }
    assert_eq!(rig.temperature(), 30, "sensing copies the probe reading");
}

#[test]
fn responses_carry_their_request_id() {
    let mut rig = Rig::at(20);
    let first = rig
        .svc
        .submit(Method::Get, Resource::Temperature)
        .unwrap();
    let second = rig.svc.submit(Method::Post, Resource::Heating).unwrap();
    rig.svc
        .run_until_idle(&mut rig.hw, &mut rig.host, &mut rig.sink);

    let ids: Vec<_> = rig.host.responses.iter().map(|r| r.id).collect();
    assert_eq!(ids, [first, second]);
}

#[test]
fn rest_server_disabled_refuses_submissions() {
    let mut rig = Rig::with_config(SystemConfig {
        rest_server_enabled: false,
        ..SystemConfig::default()
    });
    assert!(rig.host.registered.is_empty());
    assert_eq!(
        rig.svc.submit(Method::Get, Resource::Systems),
        Err(Error::Disabled("rest server"))
    );
    rig.advance_secs(10);
    assert!(rig.host.notifications.is_empty());
}
