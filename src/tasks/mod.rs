//! Cooperative tasks.
//!
//! Every task is a plain struct with a `handle(event, cx)` method.  The
//! dispatcher in [`ThermostatService`](crate::app::service::ThermostatService)
//! delivers one [`Event`](crate::events::Event) at a time and the task
//! runs until `handle` returns, which is its only suspend point.  Tasks
//! never call each other; they talk through the queue in [`Context`].
//!
//! | Task         | Timer          | Writes                   |
//! |--------------|----------------|--------------------------|
//! | sensing      | sensing period | `temperature`            |
//! | simulation   | settle period  | `temperature`            |
//! | thermal (×2) | -              | `status`                 |
//! | ventilation  | -              | `ventilation`            |
//! | resources    | -              | nothing                  |

pub mod resources;
pub mod sensing;
pub mod simulation;
pub mod thermal;
pub mod ventilation;

use crate::environment::Environment;
use crate::events::{Event, EventQueue, TaskId};
use crate::timer::Timers;

/// Everything a task may touch while handling one event.
pub struct Context<'a, H, N, S> {
    /// Dispatcher clock at delivery time.
    pub now_ms: u64,
    pub env: &'a mut Environment,
    pub timers: &'a mut Timers,
    pub queue: &'a mut EventQueue,
    pub hw: &'a mut H,
    pub net: &'a mut N,
    pub sink: &'a mut S,
}

impl<H, N, S> Context<'_, H, N, S> {
    /// Fire-and-forget post; returns `false` if the event was dropped.
    pub fn post(&mut self, target: TaskId, event: Event) -> bool {
        self.queue.post(target, event)
    }
}
