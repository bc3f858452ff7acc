//! Virtual-clock timer queue.
//!
//! The engine never reads a wall clock. Callers advance time explicitly with
//! elapsed durations, and the queue hands back timers whose deadline has
//! passed, earliest first. At most one timer of each [`TimerKind`] is
//! pending; scheduling the same kind again replaces it.

use crate::model::LaneId;
use std::time::Duration;

/// What a pending timer is for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Touch long-press confirmation.
    LongPress,
    /// Next auto-scroll tick of a lane.
    AutoScroll(LaneId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Timer {
    kind: TimerKind,
    due: Duration,
}

/// Pending timers against a virtual clock that starts at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerQueue {
    now: Duration,
    timers: Vec<Timer>,
}

impl TimerQueue {
    /// Empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `kind` to fire `delay` from now, replacing any pending timer
    /// of the same kind.
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.cancel(&kind);
        self.timers.push(Timer {
            kind,
            due: self.now + delay,
        });
    }

    /// Cancel a pending timer. Returns whether one was pending.
    pub fn cancel(&mut self, kind: &TimerKind) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| &t.kind != kind);
        self.timers.len() != before
    }

    /// Whether a timer of `kind` is pending.
    pub fn is_scheduled(&self, kind: &TimerKind) -> bool {
        self.timers.iter().any(|t| &t.kind == kind)
    }

    /// Remove and return the earliest timer due at or before `until`,
    /// moving the clock to its deadline.
    ///
    /// Ties fire in scheduling order. Returns `None` when nothing is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerKind> {
        let (index, due) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(i, t)| (t.due, *i))
            .map(|(i, t)| (i, t.due))?;
        self.now = self.now.max(due);
        Some(self.timers.remove(index).kind)
    }

    /// Move the clock forward to `until` without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Cancel every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
