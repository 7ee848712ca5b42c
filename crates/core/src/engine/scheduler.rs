//! Explicit stand-ins for "run this on the next frame" and "run this
//! later": a single-entry [`FrameSlot`] and a cancelable [`TimerQueue`].
//!
//! Both are plain data driven by the session with the current time, so a
//! host can use whatever clock it has and tests can use a logical one.

use std::time::Duration;

/// Handle for a scheduled task. Ids are never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TaskId,
    due: Duration,
    payload: T,
}

/// Delayed tasks keyed by due time.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Schedule `payload` to come due at `now + delay`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due: now.saturating_add(delay),
            payload,
        });
        id
    }

    /// Cancel a pending task. Returns `false` if it already fired or was
    /// already canceled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.id != id);
        self.pending.len() != before
    }

    /// Cancel everything. Returns how many tasks were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Remove and return every task due at or before `now`, earliest first.
    /// Tasks due at the same instant come out in scheduling order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<(TaskId, T)> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|task| task.due <= now);
        self.pending = rest;
        due.sort_by_key(|task| (task.due, task.id));
        due.into_iter().map(|task| (task.id, task.payload)).collect()
    }

    /// When the earliest pending task comes due.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|task| task.due).min()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Work waiting for the next frame. Posting again before the frame runs
/// replaces the earlier value, so only the latest post is ever processed.
#[derive(Debug, Clone)]
pub struct FrameSlot<T> {
    pending: Option<T>,
    overwritten: u64,
}

impl<T> FrameSlot<T> {
    pub fn new() -> Self {
        Self {
            pending: None,
            overwritten: 0,
        }
    }

    /// Post a value for the next frame. Returns `true` if it replaced one
    /// that had not been processed yet.
    pub fn post(&mut self, value: T) -> bool {
        let replaced = self.pending.replace(value).is_some();
        if replaced {
            self.overwritten += 1;
        }
        replaced
    }

    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop the pending value without processing it.
    pub fn clear(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Posts that were superseded before their frame ran.
    pub fn overwritten(&self) -> u64 {
        self.overwritten
    }
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
