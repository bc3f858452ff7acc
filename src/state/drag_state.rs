//! The single in-flight drag record.
//!
//! [`DragState`] is an immutable snapshot. Every transition consumes the
//! current snapshot and returns the next one, so a lane can never observe a
//! half-updated drag.

use crate::model::{GroupName, ItemId, LaneId, Orientation, Point, Size};

/// Everything known about the drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    /// The dragged item.
    pub item: ItemId,
    /// Top-left of the dragged item in screen coordinates.
    pub position: Point,
    /// `position` of the previous snapshot, for direction of motion.
    pub previous_position: Point,
    /// Pointer offset from the item's top-left at grab time.
    pub grab_offset: Point,
    /// Lane the drag started in. Never changes.
    pub from: LaneId,
    /// Index of the item in `from` at grab time.
    pub origin_index: usize,
    /// Lane currently claiming the drop, if any.
    pub to: Option<LaneId>,
    /// Compatibility tag copied from the origin lane.
    pub group: GroupName,
    /// Measured size of the item at grab time.
    pub item_size: Size,
    /// Sorting axis of the origin lane.
    pub orientation: Orientation,
    /// Length of the item along `orientation`.
    pub item_extent: f32,
}

impl ActiveDrag {
    /// Extent of the dragged item along a lane's sorting axis.
    pub fn extent_along(&self, orientation: Orientation) -> f32 {
        if orientation == self.orientation {
            self.item_extent
        } else {
            self.item_size.along(orientation)
        }
    }

    /// Visual center of the dragged item on the cross axis of `orientation`.
    pub fn center_across(&self, orientation: Orientation) -> f32 {
        self.position.across(orientation) + self.item_size.across(orientation) / 2.0
    }

    /// Visual center of the dragged item on the sorting axis of `orientation`.
    pub fn center_along(&self, orientation: Orientation) -> f32 {
        self.position.along(orientation) + self.extent_along(orientation) / 2.0
    }

    /// Latest movement along the sorting axis of `orientation`.
    pub fn delta_along(&self, orientation: Orientation) -> f32 {
        self.position.along(orientation) - self.previous_position.along(orientation)
    }

    /// Whether `lane` currently holds the claim.
    pub fn is_claimed_by(&self, lane: &LaneId) -> bool {
        self.to.as_ref() == Some(lane)
    }
}

/// Either no drag, or exactly one active drag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragState(Option<ActiveDrag>);

impl DragState {
    /// No drag in progress.
    pub fn idle() -> Self {
        Self(None)
    }

    /// Snapshot holding `drag`.
    pub fn started(drag: ActiveDrag) -> Self {
        Self(Some(drag))
    }

    /// The active drag, if any.
    pub fn active(&self) -> Option<&ActiveDrag> {
        self.0.as_ref()
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    /// Next snapshot with the item moved to `position` (clamped to
    /// non-negative coordinates). Idle stays idle.
    pub fn with_position(self, position: Point) -> Self {
        Self(self.0.map(|drag| ActiveDrag {
            previous_position: drag.position,
            position: position.clamp_non_negative(),
            ..drag
        }))
    }

    /// Next snapshot with the claim set to `to`. Idle stays idle.
    pub fn with_target(self, to: Option<LaneId>) -> Self {
        Self(self.0.map(|drag| ActiveDrag { to, ..drag }))
    }
}
