//! System configuration parameters
//!
//! All tunable parameters for the thermostat.  The defaults are the
//! firmware build constants; a partial JSON document can override any of
//! them (see [`SystemConfig::from_json`]).  These values only decide which
//! components are wired and how often timers fire, never the control
//! algorithms themselves.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Components ---
    /// Run the temperature simulation task.
    pub simulation_enabled: bool,
    /// Wire the cooling subsystem.
    pub cooling_enabled: bool,
    /// Wire the heating subsystem.
    pub heating_enabled: bool,
    /// Wire the ventilation subsystem.
    pub ventilation_enabled: bool,
    /// Register the network resources.
    pub rest_server_enabled: bool,

    // --- Timing ---
    /// Temperature sampling and notification period (seconds)
    pub sensing_interval_secs: u32,
    /// Settle period between simulated temperature steps (seconds)
    pub simulation_interval_secs: u32,

    // --- Initial temperature ---
    /// Lower bound of the random boot temperature (Celsius, inclusive)
    pub temp_random_min: i32,
    /// Upper bound of the random boot temperature (Celsius, inclusive)
    pub temp_random_max: i32,

    // --- Network ---
    /// UDP port of the host resource server
    pub udp_port: u16,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            simulation_enabled: true,
            cooling_enabled: true,
            heating_enabled: true,
            ventilation_enabled: true,
            rest_server_enabled: true,

            sensing_interval_secs: 5,
            simulation_interval_secs: 20,

            temp_random_min: 10,
            temp_random_max: 30,

            udp_port: 5683,
        }
    }
}

impl SystemConfig {
    /// Reject values that would stall a periodic task or panic the
    /// initial temperature draw.
    pub fn validate(&self) -> Result<()> {
        if self.sensing_interval_secs == 0 {
            return Err(Error::Config("sensing_interval_secs must be > 0"));
        }
        if self.simulation_interval_secs == 0 {
            return Err(Error::Config("simulation_interval_secs must be > 0"));
        }
        if self.temp_random_min > self.temp_random_max {
            return Err(Error::Config("temp_random_min exceeds temp_random_max"));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override and validate it.
    /// Missing fields keep their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Sensing period in milliseconds.
    pub fn sensing_period_ms(&self) -> u64 {
        u64::from(self.sensing_interval_secs) * 1000
    }

    /// Settle period in milliseconds.
    pub fn simulation_period_ms(&self) -> u64 {
        u64::from(self.simulation_interval_secs) * 1000
    }
}
