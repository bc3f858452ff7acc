//! Per-lane sorting state.
//!
//! A [`Lane`] is a snapshot: the reorder engine and the board consume a lane
//! and return the next one. Outside a drag, `order` mirrors `items`.

use super::autoscroll::ScrollAmount;
use super::position_cache::PositionCache;
use crate::model::{GroupName, ItemId, LaneId};

/// Static configuration of a lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneConfig {
    /// Lane identity.
    pub id: LaneId,
    /// Drag group; only same-group lanes exchange items.
    pub group: GroupName,
    /// When set, no drag can start from this lane.
    pub disabled: bool,
}

impl LaneConfig {
    /// Enabled lane in `group`.
    pub fn new(id: LaneId, group: GroupName) -> Self {
        Self {
            id,
            group,
            disabled: false,
        }
    }
}

/// Direction of the most recent motion along a lane's axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Towards larger offsets (down or right).
    #[default]
    Forward,
    /// Towards smaller offsets (up or left).
    Backward,
}

impl Direction {
    /// `+1.0` or `-1.0`.
    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    /// Direction of `delta`, or `fallback` when there was no movement.
    pub fn from_delta(delta: f32, fallback: Direction) -> Direction {
        if delta > 0.0 {
            Self::Forward
        } else if delta < 0.0 {
            Self::Backward
        } else {
            fallback
        }
    }
}

/// How one of the lane's own items should be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStyle {
    /// The item.
    pub id: ItemId,
    /// Offset along the lane axis from the item's in-flow position.
    pub translate: f32,
    /// The dragged item stays in flow but is invisible; the ghost stands in.
    pub hidden: bool,
}

/// Snapshot of one sortable lane.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub(crate) config: LaneConfig,
    pub(crate) items: Vec<ItemId>,
    pub(crate) order: Vec<ItemId>,
    pub(crate) positions: Option<PositionCache>,
    pub(crate) home: Option<PositionCache>,
    pub(crate) translations: Vec<f32>,
    pub(crate) hidden: Option<ItemId>,
    pub(crate) reserved_padding: f32,
    pub(crate) direction: Direction,
    pub(crate) autoscroll: ScrollAmount,
}

impl Lane {
    /// Lane at rest holding `items`.
    pub fn new(config: LaneConfig, items: Vec<ItemId>) -> Self {
        Self {
            config,
            order: items.clone(),
            translations: vec![0.0; items.len()],
            items,
            positions: None,
            home: None,
            hidden: None,
            reserved_padding: 0.0,
            direction: Direction::Forward,
            autoscroll: ScrollAmount::Idle,
        }
    }

    /// Lane id.
    pub fn id(&self) -> &LaneId {
        &self.config.id
    }

    /// Drag group.
    pub fn group(&self) -> &GroupName {
        &self.config.group
    }

    /// Full configuration.
    pub fn config(&self) -> &LaneConfig {
        &self.config
    }

    /// Whether drags may not start here.
    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// Externally supplied items in rendered order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Working order; differs from `items` only while a drag touches the lane.
    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    /// Cached start offsets parallel to `order`, if currently valid.
    pub fn positions(&self) -> Option<&PositionCache> {
        self.positions.as_ref()
    }

    /// Trailing space reserved for a foreign dragged item.
    pub fn reserved_padding(&self) -> f32 {
        self.reserved_padding
    }

    /// Direction used by the last sort pass.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current auto-scroll amount.
    pub fn autoscroll(&self) -> ScrollAmount {
        self.autoscroll
    }

    /// Index of `item` in the working order.
    pub fn index_of(&self, item: &ItemId) -> Option<usize> {
        self.order.iter().position(|i| i == item)
    }

    /// Render styles for the lane's own items, in `items` order.
    pub fn item_styles(&self) -> Vec<ItemStyle> {
        self.items
            .iter()
            .zip(&self.translations)
            .map(|(id, translate)| ItemStyle {
                id: id.clone(),
                translate: *translate,
                hidden: self.hidden.as_ref() == Some(id),
            })
            .collect()
    }

    /// Next snapshot with a new external item list; working state restarts
    /// from it.
    pub fn with_items(self, items: Vec<ItemId>) -> Self {
        Self {
            autoscroll: self.autoscroll,
            direction: self.direction,
            ..Self::new(self.config, items)
        }
    }

    /// Next snapshot with a new external item list while `dragged` is in
    /// flight.
    ///
    /// The working order keeps its arrangement: removed items drop out, the
    /// dragged item stays in its slot, and new items are appended. Caches
    /// are invalidated so the next pass recomputes positions and
    /// translations.
    pub fn with_items_during_drag(self, items: Vec<ItemId>, dragged: &ItemId) -> Self {
        let mut order: Vec<ItemId> = self
            .order
            .into_iter()
            .filter(|id| id == dragged || items.contains(id))
            .collect();
        let added: Vec<ItemId> = items
            .iter()
            .filter(|id| !order.contains(id))
            .cloned()
            .collect();
        order.extend(added);

        let foreign = order.contains(dragged) && !items.contains(dragged);
        Self {
            reserved_padding: if foreign { self.reserved_padding } else { 0.0 },
            hidden: items.contains(dragged).then(|| dragged.clone()),
            translations: vec![0.0; items.len()],
            positions: None,
            home: None,
            order,
            items,
            ..self
        }
    }

    /// Next snapshot with the auto-scroll amount replaced.
    pub fn with_autoscroll(self, autoscroll: ScrollAmount) -> Self {
        Self { autoscroll, ..self }
    }

    /// Back to rest: order mirrors items, nothing reserved, nothing moving.
    pub fn reset(self) -> Self {
        Self::new(self.config, self.items)
    }
}
