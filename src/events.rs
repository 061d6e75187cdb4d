//! Cooperative event queue.
//!
//! Events are produced by:
//! - Timer expiry (sensing period, simulation settle period)
//! - The resource adapter (inbound requests)
//! - Other tasks (toggle forwarding, "systems changed", replies, publish)
//!
//! and consumed by the dispatcher, which hands them to their target task
//! one at a time in FIFO order.  A task runs to completion before the next
//! event is delivered, so no task ever observes a half-applied mutation.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Timers      │────▶│              │     │              │
//! │ Resources   │────▶│  EventQueue  │────▶│  Dispatcher  │──▶ Task
//! │ Tasks       │────▶│  (FIFO)      │     │  (one event) │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use heapless::Deque;
use log::warn;

use crate::app::ports::Subsystem;
use crate::app::resources::{Request, RequestId};
use crate::timer::Expired;

/// Maximum number of pending events.
pub const EVENT_QUEUE_CAP: usize = 32;

/// Identity of every cooperative task, in boot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TaskId {
    Sensing = 0,
    Resources = 1,
    Simulation = 2,
    Cooling = 3,
    Heating = 4,
    Ventilation = 5,
}

impl TaskId {
    /// Total number of tasks: sizes per-task tables.
    pub const COUNT: usize = 6;

    /// Boot order.
    pub const ALL: [TaskId; Self::COUNT] = [
        Self::Sensing,
        Self::Resources,
        Self::Simulation,
        Self::Cooling,
        Self::Heating,
        Self::Ventilation,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Task owning a subsystem's lifecycle.
    pub fn for_subsystem(subsystem: Subsystem) -> Self {
        match subsystem {
            Subsystem::Cooling => Self::Cooling,
            Subsystem::Heating => Self::Heating,
            Subsystem::Ventilation => Self::Ventilation,
        }
    }
}

/// Result of a toggle, reported back to the resource task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Stopped,
    /// Refused: the other thermal subsystem is running.
    Conflict { active: Subsystem },
}

/// Everything a task can be woken up with.
#[derive(Debug)]
pub enum Event {
    /// Delivered once to every task at boot.
    Start,
    /// The task's own timer expired.  Must be re-armed to keep running.
    Timer(Expired),
    /// Thermal subsystem state may have changed (fire-and-forget).
    SystemsChanged,
    /// Flip the subsystem.  Carries the request to answer, if any.
    Toggle(Option<RequestId>),
    /// Subsystem task's answer to a forwarded toggle.
    Reply {
        request: RequestId,
        subsystem: Subsystem,
        outcome: ToggleOutcome,
    },
    /// Inbound network request.
    Request(Request),
    /// Fresh temperature sample to push to observers.
    Publish(i32),
}

/// An event addressed to a task.
#[derive(Debug)]
pub struct Envelope {
    pub target: TaskId,
    pub event: Event,
}

/// Bounded FIFO of pending envelopes.
pub struct EventQueue {
    pending: Deque<Envelope, EVENT_QUEUE_CAP>,
    dropped: u32,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            pending: Deque::new(),
            dropped: 0,
        }
    }

    /// Post an event; never blocks.
    /// Returns `false` if the queue is full (event dropped).
    pub fn post(&mut self, target: TaskId, event: Event) -> bool {
        match self.pending.push_back(Envelope { target, event }) {
            Ok(()) => true,
            Err(envelope) => {
                self.dropped = self.dropped.saturating_add(1);
                warn!(
                    "event queue full, dropping {:?} for {:?}",
                    envelope.event, envelope.target
                );
                false
            }
        }
    }

    /// Next envelope in FIFO order.
    pub fn pop(&mut self) -> Option<Envelope> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Events lost to a full queue since boot.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
