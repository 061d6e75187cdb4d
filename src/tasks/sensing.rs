//! Temperature sensing task.
//!
//! Single state, "waiting for timer": on every sensing period the task
//! copies `read_temperature()` into the environment, hands the sample to
//! the resource task for observers, and re-arms its timer.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, SensorPort};
use crate::environment::TemperatureGrant;
use crate::events::{Event, TaskId};

use super::Context;

pub struct SensingTask {
    grant: TemperatureGrant,
    period_ms: u64,
    samples: u64,
}

impl SensingTask {
    pub fn new(period_ms: u64) -> Self {
        Self {
            grant: TemperatureGrant::new(),
            period_ms,
            samples: 0,
        }
    }

    /// Samples taken since boot.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn handle<H: SensorPort, N, S: EventSink>(
        &mut self,
        event: Event,
        cx: &mut Context<'_, H, N, S>,
    ) {
        match event {
            Event::Start => {
                cx.timers.set(TaskId::Sensing, self.period_ms, cx.now_ms);
                info!("[SENSING] started, period {}ms", self.period_ms);
            }
            Event::Timer(expired) => {
                let reading = cx.hw.read_temperature(cx.env);
                cx.env.set_temperature(&self.grant, reading);
                self.samples += 1;
                info!("[SENSING] Temperature: {}", reading);

                cx.sink.emit(&AppEvent::TemperatureSampled(reading));
                cx.post(TaskId::Resources, Event::Publish(reading));

                expired.restart(cx.timers, cx.now_ms);
            }
            other => debug!("[SENSING] ignoring {:?}", other),
        }
    }
}
