//! Press tracking: pending presses, the drag threshold, and long presses.
//!
//! The controller only decides *when* a press becomes a drag. Building the
//! [`DragState`](super::drag_state::DragState) and fanning it out to lanes is
//! the board's job.

use crate::model::{GroupName, ItemId, LaneId, Orientation, Point, Size};
use std::mem;
use std::time::Duration;
use tracing::debug;

/// Pointer displacement, in pixels, a press must exceed to become a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 6.0;
/// Hold time before a touch press becomes a drag.
pub const DEFAULT_LONG_PRESS: Duration = Duration::from_millis(500);
/// Interval between auto-scroll ticks.
pub const DEFAULT_AUTOSCROLL_TICK: Duration = Duration::from_millis(7);
/// Pixels scrolled per auto-scroll tick.
pub const DEFAULT_AUTOSCROLL_STEP: f32 = 4.0;

/// Tunable constants of the drag interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTuning {
    /// See [`DEFAULT_DRAG_THRESHOLD`].
    pub drag_threshold: f32,
    /// See [`DEFAULT_LONG_PRESS`].
    pub long_press: Duration,
    /// See [`DEFAULT_AUTOSCROLL_TICK`].
    pub autoscroll_tick: Duration,
    /// See [`DEFAULT_AUTOSCROLL_STEP`].
    pub autoscroll_step: f32,
    /// Emit a haptic pulse when a long press starts a drag.
    pub haptics: bool,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            long_press: DEFAULT_LONG_PRESS,
            autoscroll_tick: DEFAULT_AUTOSCROLL_TICK,
            autoscroll_step: DEFAULT_AUTOSCROLL_STEP,
            haptics: true,
        }
    }
}

impl DragTuning {
    /// Auto-scroll tick interval, never shorter than one millisecond so the
    /// virtual clock always makes progress.
    pub fn tick_interval(&self) -> Duration {
        self.autoscroll_tick.max(Duration::from_millis(1))
    }
}

/// Input device that started a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    /// Mouse or pen: confirmed by moving past the threshold.
    Pointer,
    /// Touch: confirmed by holding still for the long-press delay.
    Touch,
}

/// A press that has not become a drag yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPress {
    /// Pressed item.
    pub item: ItemId,
    /// Lane the item was pressed in.
    pub lane: LaneId,
    /// Group of that lane.
    pub group: GroupName,
    /// Item top-left at press time.
    pub item_origin: Point,
    /// Pointer position at press time.
    pub origin: Point,
    /// Latest pointer position.
    pub pointer: Point,
    /// `origin - item_origin`.
    pub grab_offset: Point,
    /// Measured item size.
    pub item_size: Size,
    /// Sorting axis of the lane.
    pub orientation: Orientation,
    /// Index of the item in its lane.
    pub origin_index: usize,
    /// Device that pressed.
    pub kind: PressKind,
}

impl PendingPress {
    /// Item top-left implied by the latest pointer position.
    pub fn item_position(&self) -> Point {
        self.pointer.offset_from(self.grab_offset)
    }

    /// Distance the pointer has travelled from the press point.
    pub fn displacement(&self) -> f32 {
        self.origin.distance_to(self.pointer)
    }
}

/// Window-level move/up listeners a front-end attaches for the duration of
/// a press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalListeners {
    attached: bool,
}

impl GlobalListeners {
    fn attach(&mut self) {
        if !self.attached {
            debug!("global listeners attached");
        }
        self.attached = true;
    }

    fn detach(&mut self) {
        if self.attached {
            debug!("global listeners detached");
        }
        self.attached = false;
    }

    /// Whether the listeners are attached.
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    Pending(PendingPress),
    Dragging,
}

/// What a pointer move meant to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Nothing pressed.
    Ignored,
    /// Still under the threshold.
    Pending,
    /// The press just became a drag.
    Confirmed(PendingPress),
    /// A touch moved too far before the long press fired; it is a scroll.
    Abandoned,
    /// Already dragging.
    Dragging,
}

/// What a release meant to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Nothing pressed.
    Ignored,
    /// Released before confirmation.
    Click,
    /// Released while dragging; the board finishes the drop.
    Drop,
}

/// Press state machine: idle, pending, or dragging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragController {
    phase: Phase,
    listeners: GlobalListeners,
    threshold: f32,
}

impl DragController {
    /// Idle controller using `threshold` pixels.
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: Phase::Idle,
            listeners: GlobalListeners::default(),
            threshold,
        }
    }

    /// Record a press. Rejected (returns `false`) unless idle.
    pub fn press(&mut self, press: PendingPress) -> bool {
        if self.phase != Phase::Idle {
            debug!(item = %press.item, "press ignored, drag already in progress");
            return false;
        }
        debug!(item = %press.item, lane = %press.lane, kind = ?press.kind, "press pending");
        self.listeners.attach();
        self.phase = Phase::Pending(press);
        true
    }

    /// Feed a pointer position.
    ///
    /// # Behavior
    /// - Idle: ignored.
    /// - Pending: the latest position is recorded. Displacement at or below
    ///   the threshold keeps the press pending. Beyond it, a pointer press
    ///   is confirmed and a touch press is abandoned.
    /// - Dragging: reported so the board can move the drag.
    pub fn pointer_moved(&mut self, pointer: Point) -> MoveOutcome {
        if self.phase == Phase::Dragging {
            return MoveOutcome::Dragging;
        }
        let Phase::Pending(press) = &mut self.phase else {
            return MoveOutcome::Ignored;
        };
        press.pointer = pointer;
        if press.displacement() <= self.threshold {
            return MoveOutcome::Pending;
        }
        let kind = press.kind;
        match kind {
            PressKind::Pointer => match self.take_pending(Phase::Dragging) {
                Some(press) => MoveOutcome::Confirmed(press),
                None => MoveOutcome::Ignored,
            },
            PressKind::Touch => {
                debug!("touch moved before long press, abandoning");
                self.reset();
                MoveOutcome::Abandoned
            }
        }
    }

    /// Feed a release.
    pub fn released(&mut self) -> ReleaseOutcome {
        match self.phase {
            Phase::Idle => ReleaseOutcome::Ignored,
            Phase::Pending(_) => {
                self.reset();
                ReleaseOutcome::Click
            }
            Phase::Dragging => ReleaseOutcome::Drop,
        }
    }

    /// The long-press timer fired: a pending touch press becomes a drag.
    pub fn long_press_fired(&mut self) -> Option<PendingPress> {
        let touch_pending =
            matches!(&self.phase, Phase::Pending(press) if press.kind == PressKind::Touch);
        if !touch_pending {
            return None;
        }
        self.take_pending(Phase::Dragging)
    }

    /// Back to idle with listeners detached.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.listeners.detach();
    }

    /// Whether nothing is pressed.
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Whether a drag has been confirmed.
    pub fn is_dragging(&self) -> bool {
        self.phase == Phase::Dragging
    }

    /// The pending press, if any.
    pub fn pending(&self) -> Option<&PendingPress> {
        match &self.phase {
            Phase::Pending(press) => Some(press),
            _ => None,
        }
    }

    /// Global listener state.
    pub fn listeners(&self) -> GlobalListeners {
        self.listeners
    }

    fn take_pending(&mut self, next: Phase) -> Option<PendingPress> {
        match mem::replace(&mut self.phase, next) {
            Phase::Pending(press) => Some(press),
            other => {
                self.phase = other;
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
