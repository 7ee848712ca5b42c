use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DockConfig;
use crate::engine::scheduler::{TaskId, TimerQueue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivationError {
    #[error("item {index} is out of range for a dock of {len} items")]
    OutOfRange { index: usize, len: usize },
}

/// What the renderer needs to know about clicks.
///
/// `active` and `jumping` are independent: a click sets both, the settle
/// clears only `jumping`, and `active` stays until the next click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationState {
    pub active: Option<usize>,
    pub jumping: Option<usize>,
    pub tooltips_visible: bool,
}

impl Default for ActivationState {
    fn default() -> Self {
        Self {
            active: None,
            jumping: None,
            tooltips_visible: true,
        }
    }
}

/// Where a jumping item is in its animation. Derived from the click time;
/// the state machine itself only knows "jumping until settled".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JumpPhase {
    /// Bounce animation playing; `progress` runs from 0 to 1.
    Bouncing { progress: f64 },
    /// Bounce finished, tooltips still suppressed.
    Settling,
}

#[derive(Debug, Clone, Copy)]
struct Settle {
    item: usize,
}

/// Click handling and the single settle delay that follows each click.
#[derive(Debug, Clone)]
pub struct Activation {
    state: ActivationState,
    len: usize,
    jump_visual: Duration,
    settle_delay: Duration,
    timers: TimerQueue<Settle>,
    settle: Option<TaskId>,
    jump_started: Option<Duration>,
}

impl Activation {
    pub fn new(len: usize, config: &DockConfig) -> Self {
        Self {
            state: ActivationState::default(),
            len,
            jump_visual: config.jump_visual_duration(),
            settle_delay: config.settle_delay(),
            timers: TimerQueue::new(),
            settle: None,
            jump_started: None,
        }
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    /// Activate item `index` at time `now`.
    ///
    /// Any settle still pending from an earlier click is canceled before
    /// the new one is scheduled, so exactly one settle is ever in flight.
    /// An out-of-range index leaves everything untouched.
    pub fn click(&mut self, index: usize, now: Duration) -> Result<(), ActivationError> {
        if index >= self.len {
            tracing::debug!(index, len = self.len, "rejected click");
            return Err(ActivationError::OutOfRange {
                index,
                len: self.len,
            });
        }

        if let Some(previous) = self.settle.take()
            && self.timers.cancel(previous)
        {
            tracing::debug!(
                superseded = ?self.state.jumping,
                index,
                "canceled pending settle"
            );
        }

        self.state = ActivationState {
            active: Some(index),
            jumping: Some(index),
            tooltips_visible: false,
        };
        self.jump_started = Some(now);
        self.settle = Some(
            self.timers
                .schedule(now, self.settle_delay, Settle { item: index }),
        );
        tracing::debug!(index, ?now, "item activated");
        Ok(())
    }

    /// Fire the settle if it is due. Returns `true` if the state changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        let mut changed = false;
        for (id, settle) in self.timers.drain_due(now) {
            if self.settle != Some(id) || self.state.jumping != Some(settle.item) {
                tracing::debug!(item = settle.item, "dropped stale settle");
                continue;
            }
            self.settle = None;
            self.jump_started = None;
            self.state.jumping = None;
            self.state.tooltips_visible = true;
            changed = true;
            tracing::debug!(item = settle.item, "item settled");
        }
        changed
    }

    /// Animation phase of the jumping item at `now`, if one is jumping.
    pub fn jump_phase(&self, now: Duration) -> Option<JumpPhase> {
        self.state.jumping?;
        let started = self.jump_started?;
        let elapsed = now.saturating_sub(started);
        if elapsed >= self.jump_visual || self.jump_visual.is_zero() {
            return Some(JumpPhase::Settling);
        }
        Some(JumpPhase::Bouncing {
            progress: elapsed.as_secs_f64() / self.jump_visual.as_secs_f64(),
        })
    }

    /// When the pending settle is due, if there is one.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    /// Drop every pending timer. State is left as-is.
    pub fn cancel_pending(&mut self) -> usize {
        self.settle = None;
        self.timers.cancel_all()
    }
}
