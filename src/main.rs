//! Smart thermostat firmware, main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter      LogEventSink     ChannelResourceHost     │
//! │  (Sensor+Actuator)    (EventSink)      (ResourceHost)          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │         ThermostatService (cooperative dispatcher)     │    │
//! │  │  sensing · simulation · cooling · heating · ventilation│    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  UDP I/O thread (edge-executor) ◀── static channels ──▶ loop   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

#[cfg(target_os = "espidf")]
mod esp_link_shims;

use core::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use thermostat::ThermostatService;
use thermostat::adapters::hardware::HardwareAdapter;
use thermostat::adapters::log_sink::LogEventSink;
use thermostat::adapters::resource_host::ChannelResourceHost;
use thermostat::adapters::time::MonotonicClock;
use thermostat::app::resources::ResponseCode;
use thermostat::config::SystemConfig;
use thermostat::drivers::gpio::{self, GpioPin};
use thermostat::drivers::leds::LedBank;
use thermostat::net::{channels, io_task};
use thermostat::pins;

/// Environment variable naming a JSON config override file.
const CONFIG_ENV: &str = "THERMOSTAT_CONFIG";

/// Longest the loop sleeps, so inbound requests are picked up promptly.
const MAX_IDLE: Duration = Duration::from_millis(20);

fn init_logging() -> Result<()> {
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    thermostat::adapters::logger::init()?;
    Ok(())
}

fn load_config() -> Result<SystemConfig> {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return Ok(SystemConfig::default());
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = SystemConfig::from_json(&json).with_context(|| format!("parsing {path}"))?;
    info!("Config loaded from {}", path);
    Ok(config)
}

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    init_logging()?;
    info!("Thermostat v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    gpio::init_led_outputs().map_err(|e| anyhow::anyhow!("LED init failed: {e}"))?;

    // ── 2. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(LedBank::new(
        GpioPin::new(pins::LED_BLUE_GPIO),
        GpioPin::new(pins::LED_RED_GPIO),
        GpioPin::new(pins::LED_GREEN_GPIO),
    ));
    let mut net = ChannelResourceHost::new();
    let mut sink = LogEventSink::new();
    let mut rng = SmallRng::from_entropy();
    let clock = MonotonicClock::new();

    // ── 3. Boot the control core ──────────────────────────────
    let mut service = ThermostatService::boot(config, &mut rng, &mut hw, &mut net, &mut sink)?;

    let _io = if service.config().rest_server_enabled {
        Some(io_task::spawn(service.config().udp_port)?)
    } else {
        None
    };

    // ── 4. Control loop ───────────────────────────────────────
    let mut last_ms = clock.uptime_ms();
    loop {
        while let Some(msg) = channels::try_recv_inbound() {
            match service.submit(msg.method, msg.resource) {
                Ok(id) => {
                    if let Err(e) = net.track(id, msg.peer) {
                        warn!("request {} from {} untracked: {}", id, msg.peer, e);
                    }
                }
                Err(e) => {
                    warn!("request from {} refused: {}", msg.peer, e);
                    net.reject(msg.peer, ResponseCode::ServiceUnavailable);
                }
            }
        }
        service.run_until_idle(&mut hw, &mut net, &mut sink);

        let now_ms = clock.uptime_ms();
        service.advance(
            Duration::from_millis(now_ms.saturating_sub(last_ms)),
            &mut hw,
            &mut net,
            &mut sink,
        );
        last_ms = now_ms;

        let until_deadline = service
            .next_deadline_ms()
            .map_or(MAX_IDLE, |d| {
                Duration::from_millis(d.saturating_sub(service.now_ms()))
            });
        std::thread::sleep(until_deadline.min(MAX_IDLE));
    }
}
