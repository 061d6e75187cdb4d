//! End-to-end request scenarios through the resource interface.

use crate::mock_hw::{ActuatorCall, Rig};

use thermostat::app::resources::{Resource, ResponseCode};
use thermostat::environment::SystemStatus;

#[test]
fn cooling_request_accepted_and_room_cools_after_one_period() {
    let mut rig = Rig::at(22);
    assert_eq!(rig.svc.status(), SystemStatus::Inactive);

    let resp = rig.post(Resource::Cooling).clone();
    assert_eq!(resp.code, ResponseCode::Changed);
    assert_eq!(
        resp.body,
        r#"{"heating":false,"cooling":true,"ventilation":false}"#
    );
    assert_eq!(rig.svc.status(), SystemStatus::Cooling);
    assert_eq!(rig.hw.calls, [ActuatorCall::StartCooling]);

    rig.advance_secs(19);
    assert_eq!(rig.temperature(), 22, "no step before the settle period");
    rig.advance_secs(1);
    assert_eq!(rig.temperature(), 21);
}

#[test]
fn heating_refused_while_cooling() {
    let mut rig = Rig::at(22);
    rig.post(Resource::Cooling);

    let resp = rig.post(Resource::Heating).clone();
    assert_eq!(resp.code, ResponseCode::Conflict);
    assert!(resp.body.is_empty());
    assert_eq!(rig.svc.status(), SystemStatus::Cooling);
    assert!(rig.hw.cooling_on());
    assert!(!rig.hw.heating_on());
    assert_eq!(rig.hw.count(ActuatorCall::StartHeating), 0);
}

#[test]
fn cooling_toggled_off_freezes_temperature() {
    let mut rig = Rig::at(22);
    rig.post(Resource::Cooling);

    let resp = rig.post(Resource::Cooling).clone();
    assert_eq!(resp.code, ResponseCode::Changed);
    assert_eq!(rig.svc.status(), SystemStatus::Inactive);
    assert_eq!(
        rig.hw.calls,
        [ActuatorCall::StartCooling, ActuatorCall::StopCooling]
    );

    rig.advance_secs(120);
    assert_eq!(rig.temperature(), 22);
}

#[test]
fn systems_summary_reports_cooling_and_ventilation() {
    let mut rig = Rig::at(22);
    rig.post(Resource::Cooling);
    rig.post(Resource::Ventilation);

    let resp = rig.get(Resource::Systems).clone();
    assert_eq!(resp.code, ResponseCode::Content);
    assert_eq!(
        resp.body,
        r#"{"heating":false,"cooling":true,"ventilation":true}"#
    );
}

#[test]
fn heating_after_cooling_released_is_accepted() {
    let mut rig = Rig::at(22);
    rig.post(Resource::Cooling);
    rig.post(Resource::Cooling);

    let resp = rig.post(Resource::Heating).clone();
    assert_eq!(resp.code, ResponseCode::Changed);
    assert_eq!(rig.svc.status(), SystemStatus::Heating);

    rig.advance_secs(20);
    assert_eq!(rig.temperature(), 23);
}
