//! Smart thermostat firmware library.
//!
//! Exposes the cooperative control core and its adapters for the binary
//! and for integration testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod environment;
pub mod error;
pub mod events;
pub mod net;
pub mod pins;
pub mod tasks;
pub mod timer;

pub use app::service::ThermostatService;
pub use error::{Error, Result};
