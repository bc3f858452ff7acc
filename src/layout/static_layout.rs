//! In-memory layout: lanes are fixed rectangles, items stack inside them.
//!
//! Item bounds are derived from the lane's item list (the rendered, external
//! order), its gap, padding and scroll offset, the same way a block layout
//! would place untransformed children.

use super::{LaneMetrics, LayoutProbe, ScrollHost};
use crate::model::{ItemId, LaneId, Orientation, Point, Rect, Size};

#[derive(Debug, Clone)]
struct ItemBox {
    id: ItemId,
    extent: f32,
    breadth: Option<f32>,
}

#[derive(Debug, Clone)]
struct LaneBox {
    id: LaneId,
    bounds: Rect,
    orientation: Orientation,
    gap: f32,
    padding: f32,
    scroll_offset: f32,
    items: Vec<ItemBox>,
}

impl LaneBox {
    fn content_length(&self) -> f32 {
        let extents: f32 = self.items.iter().map(|item| item.extent).sum();
        let gaps = self.gap * self.items.len().saturating_sub(1) as f32;
        self.padding * 2.0 + extents + gaps
    }

    fn item_rect(&self, index: usize) -> Rect {
        let o = self.orientation;
        let mut start = self.bounds.start(o) + self.padding - self.scroll_offset;
        for item in &self.items[..index] {
            start += item.extent + self.gap;
        }
        let item = &self.items[index];
        let cross_start = self.bounds.cross_start(o) + self.padding;
        let breadth = item
            .breadth
            .unwrap_or(self.bounds.size().across(o) - 2.0 * self.padding);
        let (origin, size) = match o {
            Orientation::Vertical => (
                Point::new(cross_start, start),
                Size::new(breadth, item.extent),
            ),
            Orientation::Horizontal => (
                Point::new(start, cross_start),
                Size::new(item.extent, breadth),
            ),
        };
        Rect::new(origin.x, origin.y, size.width, size.height)
    }
}

/// Lanes and items with fixed geometry, scrollable in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    lanes: Vec<LaneBox>,
}

impl StaticLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a lane with no items.
    pub fn insert_lane(
        &mut self,
        id: LaneId,
        bounds: Rect,
        orientation: Orientation,
        gap: f32,
        padding: f32,
    ) {
        self.lanes.retain(|lane| lane.id != id);
        self.lanes.push(LaneBox {
            id,
            bounds,
            orientation,
            gap,
            padding,
            scroll_offset: 0.0,
            items: Vec::new(),
        });
    }

    /// Append an item to `lane`. `breadth` defaults to the lane's inner
    /// cross size. Returns `false` if the lane does not exist.
    pub fn push_item(
        &mut self,
        lane: &LaneId,
        item: ItemId,
        extent: f32,
        breadth: Option<f32>,
    ) -> bool {
        let Some(lane) = self.lane_mut(lane) else {
            return false;
        };
        lane.items.push(ItemBox {
            id: item,
            extent,
            breadth,
        });
        true
    }

    /// Move `item` from whichever lane holds it into `to` at `index`
    /// (clamped to the lane's length).
    pub fn move_item(&mut self, item: &ItemId, to: &LaneId, index: usize) -> bool {
        if self.lane_mut(to).is_none() {
            return false;
        }
        let Some(boxed) = self.take_item(item) else {
            return false;
        };
        match self.lane_mut(to) {
            Some(lane) => {
                let index = index.min(lane.items.len());
                lane.items.insert(index, boxed);
                true
            }
            None => false,
        }
    }

    /// Remove an item from the layout.
    pub fn remove_item(&mut self, item: &ItemId) -> bool {
        self.take_item(item).is_some()
    }

    /// Remove a lane and all of its items.
    pub fn remove_lane(&mut self, lane: &LaneId) -> bool {
        let before = self.lanes.len();
        self.lanes.retain(|l| &l.id != lane);
        self.lanes.len() != before
    }

    /// Item ids of `lane` in rendered order.
    pub fn item_ids(&self, lane: &LaneId) -> Vec<ItemId> {
        self.lanes
            .iter()
            .find(|l| &l.id == lane)
            .map(|l| l.items.iter().map(|item| item.id.clone()).collect())
            .unwrap_or_default()
    }

    fn lane_mut(&mut self, lane: &LaneId) -> Option<&mut LaneBox> {
        self.lanes.iter_mut().find(|l| &l.id == lane)
    }

    fn take_item(&mut self, item: &ItemId) -> Option<ItemBox> {
        self.lanes.iter_mut().find_map(|lane| {
            let index = lane.items.iter().position(|i| &i.id == item)?;
            Some(lane.items.remove(index))
        })
    }
}

impl LayoutProbe for StaticLayout {
    fn lane_metrics(&self, lane: &LaneId) -> Option<LaneMetrics> {
        let lane = self.lanes.iter().find(|l| &l.id == lane)?;
        Some(LaneMetrics {
            bounds: lane.bounds,
            orientation: lane.orientation,
            gap: lane.gap,
            padding: lane.padding,
            scroll_offset: lane.scroll_offset,
            content_length: lane.content_length(),
        })
    }

    fn item_bounds(&self, item: &ItemId) -> Option<Rect> {
        self.lanes.iter().find_map(|lane| {
            let index = lane.items.iter().position(|i| &i.id == item)?;
            Some(lane.item_rect(index))
        })
    }
}

impl ScrollHost for StaticLayout {
    fn set_scroll_offset(&mut self, lane: &LaneId, offset: f32) -> bool {
        match self.lane_mut(lane) {
            Some(lane) => {
                lane.scroll_offset = offset;
                true
            }
            None => false,
        }
    }
}
