//! Host console logging.
//!
//! On ESP-IDF the firmware logs through `esp_idf_logger`.  Everywhere
//! else `log` records are forwarded into a `tracing-subscriber` formatter
//! on stderr, filtered by `THERMOSTAT_LOG` (`info` when unset).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding the log filter, e.g. `debug` or
/// `thermostat::net=trace`.
pub const LOG_ENV: &str = "THERMOSTAT_LOG";

/// Install the global subscriber.  Fails if one is already installed.
pub fn init() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
}
