//! Edge-triggered auto-scroll decisions.
//!
//! Pure functions deciding whether a lane should scroll while the dragged
//! item is pinned near one of its edges. The self-rescheduling tick lives on
//! the board, driven by [`TimerQueue`](super::timers::TimerQueue).

use super::drag_state::ActiveDrag;
use super::lane::{Direction, Lane};
use crate::layout::LaneMetrics;

/// Auto-scroll direction of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAmount {
    /// Scroll towards the start (up or left).
    Backward,
    /// Not scrolling.
    #[default]
    Idle,
    /// Scroll towards the end (down or right).
    Forward,
}

impl ScrollAmount {
    /// `-1.0`, `0.0` or `+1.0`.
    pub fn signum(self) -> f32 {
        match self {
            Self::Backward => -1.0,
            Self::Idle => 0.0,
            Self::Forward => 1.0,
        }
    }

    /// Whether the lane is not scrolling.
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    /// Sort direction matching the scroll, or `fallback` when idle.
    pub fn direction_or(self, fallback: Direction) -> Direction {
        match self {
            Self::Backward => Direction::Backward,
            Self::Idle => fallback,
            Self::Forward => Direction::Forward,
        }
    }
}

/// Decide the auto-scroll amount for `lane`.
///
/// Only the origin lane, or the lane holding the claim with a matching
/// group, scrolls, and only while the dragged item is over it on the cross
/// axis. The item's center must be within half its extent of an edge, and
/// the lane must still have room to scroll that way.
pub fn evaluate(lane: &Lane, drag: &ActiveDrag, metrics: &LaneMetrics) -> ScrollAmount {
    let eligible = lane.id() == &drag.from
        || (drag.is_claimed_by(lane.id()) && lane.group() == &drag.group);
    if !eligible || metrics.is_degenerate() {
        return ScrollAmount::Idle;
    }

    let o = metrics.orientation;
    if !metrics.bounds.spans_across(o, drag.center_across(o)) {
        return ScrollAmount::Idle;
    }

    let extent = drag.extent_along(o);
    if !(extent.is_finite() && extent > 0.0) {
        return ScrollAmount::Idle;
    }

    let half = extent / 2.0;
    let center = drag.center_along(o);
    let amount = if center < metrics.bounds.start(o) + half {
        ScrollAmount::Backward
    } else if center > metrics.bounds.end(o) - half {
        ScrollAmount::Forward
    } else {
        ScrollAmount::Idle
    };

    clamp_to_bounds(
        amount,
        metrics.scroll_offset,
        metrics.max_scroll(lane.reserved_padding()),
    )
}

/// Drop `amount` to idle when the lane cannot scroll further that way.
pub fn clamp_to_bounds(amount: ScrollAmount, offset: f32, max_offset: f32) -> ScrollAmount {
    match amount {
        ScrollAmount::Backward if offset <= 0.0 => ScrollAmount::Idle,
        ScrollAmount::Forward if offset >= max_offset => ScrollAmount::Idle,
        other => other,
    }
}

/// Scroll offset after one tick of `step` pixels, clamped to the bounds.
pub fn next_offset(offset: f32, amount: ScrollAmount, step: f32, max_offset: f32) -> f32 {
    (offset + amount.signum() * step).clamp(0.0, max_offset.max(0.0))
}

#[cfg(test)]
#[path = "autoscroll_tests.rs"]
mod tests;
