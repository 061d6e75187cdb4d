//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements         | Connects to               |
//! |-----------------|--------------------|---------------------------|
//! | `hardware`      | SensorPort         | simulated room            |
//! |                 | ActuatorPort       | indicator LEDs (GPIO)     |
//! | `log_sink`      | EventSink          | Serial / stderr log       |
//! | `resource_host` | ResourceHost       | UDP I/O task channels     |
//! | `time`          | -                  | monotonic system timer    |
//! | `logger`        | -                  | stderr via tracing (host) |

pub mod hardware;
pub mod log_sink;
pub mod resource_host;
pub mod time;

#[cfg(not(target_os = "espidf"))]
pub mod logger;
