//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises the control core
//! against recording adapters and a virtual clock.  All tests run on the
//! host with no real hardware or sockets.

mod mock_hw;
mod resource_tests;
mod scenario_tests;
mod simulation_tests;
