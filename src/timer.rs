//! One-shot task timers.
//!
//! Each periodic task owns exactly one timer slot, indexed by [`TaskId`].
//! A timer is armed with a fixed period, fires **once**, and stays
//! disarmed until the owner re-arms it.  There is no implicit
//! repetition.
//!
//! Expiry is delivered to the owner as an [`Expired`] token inside
//! [`Event::Timer`](crate::events::Event::Timer).  The token is the only
//! handle that re-arms an expired timer, and dropping it un-rearmed logs
//! a warning: a periodic task that forgets to re-arm stops for good, and
//! that must never happen silently.
//!
//! ```text
//!   set()──▶ Armed ──(deadline reached)──▶ Expired token ──restart()──▶ Armed
//!              ▲                                 │
//!              └──────── restart() (reset) ──────┘ drop ──▶ warn!, disarmed
//! ```

use log::warn;

use crate::events::TaskId;

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    /// Zero until the owner first calls `set`.
    period_ms: u64,
    deadline_ms: Option<u64>,
}

/// Timer table for all tasks.
#[derive(Debug, Default)]
pub struct Timers {
    slots: [Slot; TaskId::COUNT],
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `owner`'s timer to fire `period_ms` from `now_ms`.
    pub fn set(&mut self, owner: TaskId, period_ms: u64, now_ms: u64) {
        let slot = &mut self.slots[owner.index()];
        slot.period_ms = period_ms;
        slot.deadline_ms = Some(now_ms.saturating_add(period_ms));
    }

    /// Cancel and re-arm with the full period counted from `now_ms`.
    /// Returns `false` if the timer was never set.
    pub fn restart(&mut self, owner: TaskId, now_ms: u64) -> bool {
        let slot = &mut self.slots[owner.index()];
        if slot.period_ms == 0 {
            return false;
        }
        slot.deadline_ms = Some(now_ms.saturating_add(slot.period_ms));
        true
    }

    pub fn is_armed(&self, owner: TaskId) -> bool {
        self.slots[owner.index()].deadline_ms.is_some()
    }

    pub fn deadline(&self, owner: TaskId) -> Option<u64> {
        self.slots[owner.index()].deadline_ms
    }

    pub fn period(&self, owner: TaskId) -> u64 {
        self.slots[owner.index()].period_ms
    }

    /// Earliest armed deadline across all tasks.
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots.iter().filter_map(|s| s.deadline_ms).min()
    }

    /// Disarm and return the earliest timer due at `now_ms`.
    /// Equal deadlines fire in task order.
    pub fn expire_due(&mut self, now_ms: u64) -> Option<Expired> {
        let (idx, deadline) = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.deadline_ms.map(|d| (i, d)))
            .filter(|&(_, d)| d <= now_ms)
            .min_by_key(|&(i, d)| (d, i))?;

        self.slots[idx].deadline_ms = None;
        Some(Expired {
            owner: TaskId::ALL[idx],
            deadline_ms: deadline,
            rearmed: false,
        })
    }
}

/// Proof that a task's timer fired.  Consume it with [`Expired::restart`].
#[derive(Debug)]
pub struct Expired {
    owner: TaskId,
    deadline_ms: u64,
    rearmed: bool,
}

impl Expired {
    pub fn owner(&self) -> TaskId {
        self.owner
    }

    /// The deadline that was reached.
    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    /// Re-arm the owner's timer for another full period from `now_ms`.
    pub fn restart(mut self, timers: &mut Timers, now_ms: u64) {
        self.rearmed = timers.restart(self.owner, now_ms);
    }
}

impl Drop for Expired {
    fn drop(&mut self) {
        if !self.rearmed {
            warn!(
                "timer of {:?} expired at {}ms and was not re-armed; its periodic work has stopped",
                self.owner, self.deadline_ms
            );
        }
    }
}
