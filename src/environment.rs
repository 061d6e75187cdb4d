//! Shared environment state.
//!
//! One instance lives inside the dispatcher for the whole process
//! lifetime.  Every task may read it; writes are gated by zero-sized
//! grants handed out at construction time:
//!
//! | Grant                | Holders                      | May write                |
//! |----------------------|------------------------------|--------------------------|
//! | [`TemperatureGrant`] | sensing task, simulation task | `temperature`           |
//! | [`SystemsGrant`]     | thermal and ventilation tasks | `status`, `ventilation` |
//!
//! The grants cannot be constructed outside this crate, so the resource
//! adapter (or any other reader) has no way to mutate the state.

use serde::Serialize;

use crate::app::ports::Subsystem;

/// Which thermal subsystem, if any, is running.
///
/// A three-way tag instead of two booleans: "cooling and heating both
/// active" is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SystemStatus {
    #[default]
    Inactive,
    Cooling,
    Heating,
}

impl SystemStatus {
    /// The thermal subsystem behind this status.
    pub fn subsystem(self) -> Option<Subsystem> {
        match self {
            Self::Inactive => None,
            Self::Cooling => Some(Subsystem::Cooling),
            Self::Heating => Some(Subsystem::Heating),
        }
    }
}

/// Write permission for `temperature`.
#[derive(Debug)]
pub struct TemperatureGrant(());

impl TemperatureGrant {
    pub(crate) const fn new() -> Self {
        Self(())
    }
}

/// Write permission for `status` and `ventilation`.
#[derive(Debug)]
pub struct SystemsGrant(());

impl SystemsGrant {
    pub(crate) const fn new() -> Self {
        Self(())
    }
}

/// Body of the `systems` resource.  Field order is the wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemsSummary {
    pub heating: bool,
    pub cooling: bool,
    pub ventilation: bool,
}

/// The room as the controller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    temperature: i32,
    status: SystemStatus,
    ventilation: bool,
}

impl Environment {
    /// Boot-time state: given temperature, nothing running.
    pub fn new(temperature: i32) -> Self {
        Self {
            temperature,
            status: SystemStatus::Inactive,
            ventilation: false,
        }
    }

    // ── Reads (anyone) ────────────────────────────────────────

    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn status(&self) -> SystemStatus {
        self.status
    }

    pub fn ventilation(&self) -> bool {
        self.ventilation
    }

    pub fn is_cooling(&self) -> bool {
        self.status == SystemStatus::Cooling
    }

    pub fn is_heating(&self) -> bool {
        self.status == SystemStatus::Heating
    }

    pub fn summary(&self) -> SystemsSummary {
        SystemsSummary {
            heating: self.is_heating(),
            cooling: self.is_cooling(),
            ventilation: self.ventilation,
        }
    }

    // ── Writes (grant holders only) ───────────────────────────

    pub fn set_temperature(&mut self, _grant: &TemperatureGrant, celsius: i32) {
        self.temperature = celsius;
    }

    /// Apply a drift step.  Saturates instead of wrapping.
    pub fn adjust_temperature(&mut self, _grant: &TemperatureGrant, delta: i32) {
        self.temperature = self.temperature.saturating_add(delta);
    }

    pub fn set_status(&mut self, _grant: &SystemsGrant, status: SystemStatus) {
        self.status = status;
    }

    pub fn set_ventilation(&mut self, _grant: &SystemsGrant, on: bool) {
        self.ventilation = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boots_idle() {
        let env = Environment::new(22);
        assert_eq!(env.temperature(), 22);
        assert_eq!(env.status(), SystemStatus::Inactive);
        assert!(!env.ventilation());
        assert_eq!(
            env.summary(),
            SystemsSummary {
                heating: false,
                cooling: false,
                ventilation: false
            }
        );
    }

    #[test]
    fn status_is_exclusive() {
        let grant = SystemsGrant::new();
        let mut env = Environment::new(20);
        env.set_status(&grant, SystemStatus::Cooling);
        assert!(env.is_cooling() && !env.is_heating());
        env.set_status(&grant, SystemStatus::Heating);
        assert!(env.is_heating() && !env.is_cooling());
    }

    #[test]
    fn ventilation_independent_of_status() {
        let grant = SystemsGrant::new();
        let mut env = Environment::new(20);
        env.set_status(&grant, SystemStatus::Heating);
        env.set_ventilation(&grant, true);
        assert_eq!(env.status(), SystemStatus::Heating);
        assert!(env.summary().ventilation);
    }

    #[test]
    fn adjust_saturates() {
        let grant = TemperatureGrant::new();
        let mut env = Environment::new(i32::MIN + 1);
        env.adjust_temperature(&grant, -2);
        assert_eq!(env.temperature(), i32::MIN);
    }

    #[test]
    fn summary_serialises_in_wire_order() {
        let grant = SystemsGrant::new();
        let mut env = Environment::new(20);
        env.set_status(&grant, SystemStatus::Cooling);
        env.set_ventilation(&grant, true);
        let json = serde_json::to_string(&env.summary()).unwrap();
        assert_eq!(json, r#"{"heating":false,"cooling":true,"ventilation":true}"#);
    }
}
