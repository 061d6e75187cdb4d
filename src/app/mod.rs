//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the thermostat: the
//! cooperative dispatcher, the resource message types, and the outbound
//! domain events.  All interaction with hardware and the network happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod resources;
pub mod service;
