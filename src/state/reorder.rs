//! Local reorder engine.
//!
//! Pure functions run for every lane on every drag update:
//!
//! 1. [`resolve_claim`] decides which lane (if any) holds `to`.
//! 2. [`update_lane`] applies membership entry/exit, refreshes the position
//!    cache, and runs one bubble pass of the dragged item against its
//!    neighbours.
//!
//! Each call recomputes from the snapshot it is given, so the order in
//! which pointer moves and auto-scroll ticks arrive does not matter.

use super::drag_state::{ActiveDrag, DragState};
use super::lane::{Direction, Lane};
use super::position_cache::PositionCache;
use crate::layout::{LaneMetrics, LayoutProbe};
use crate::model::ItemId;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Whether `lane` may hold the claim for `drag` right now.
///
/// The lane's group must match and the dragged item's visual center on the
/// lane's cross axis must lie over the lane's viewport.
pub fn qualifies(lane: &Lane, drag: &ActiveDrag, probe: &impl LayoutProbe) -> bool {
    if lane.group() != &drag.group {
        return false;
    }
    let Some(metrics) = probe.lane_metrics(lane.id()) else {
        return false;
    };
    if metrics.is_degenerate() {
        return false;
    }
    let o = metrics.orientation;
    metrics.bounds.spans_across(o, drag.center_across(o))
}

/// Settle the claim for this update.
///
/// The current holder keeps `to` while it still qualifies. Otherwise the
/// first qualifying lane in board order claims it, or `to` becomes empty.
pub fn resolve_claim(lanes: &[Lane], state: DragState, probe: &impl LayoutProbe) -> DragState {
    let Some(drag) = state.active() else {
        return state;
    };

    let holder_keeps = drag
        .to
        .as_ref()
        .and_then(|to| lanes.iter().find(|lane| lane.id() == to))
        .is_some_and(|lane| qualifies(lane, drag, probe));
    if holder_keeps {
        return state;
    }

    let claimant = lanes
        .iter()
        .find(|lane| qualifies(lane, drag, probe))
        .map(|lane| lane.id().clone());
    if claimant == drag.to {
        return state;
    }

    debug!(
        item = %drag.item,
        released = ?drag.to.as_ref().map(|l| l.as_str()),
        claimed = ?claimant.as_ref().map(|l| l.as_str()),
        "claim moved"
    );
    state.with_target(claimant)
}

/// Run the per-update pass for one lane, deriving the direction of motion
/// from the drag's latest position delta.
///
/// Lanes that are not mounted (or report degenerate metrics) are returned
/// unchanged and retried on the next update.
pub fn update_lane(lane: Lane, drag: &ActiveDrag, probe: &impl LayoutProbe) -> Lane {
    let Some(metrics) = probe.lane_metrics(lane.id()) else {
        trace!(lane = %lane.id(), "lane not mounted, skipping pass");
        return lane;
    };
    if metrics.is_degenerate() {
        trace!(lane = %lane.id(), "degenerate lane metrics, skipping pass");
        return lane;
    }
    let direction =
        Direction::from_delta(drag.delta_along(metrics.orientation), lane.direction());
    sort_lane(lane, drag, &metrics, probe, direction)
}

/// Membership, caching and one bubble pass in an explicit direction.
///
/// Auto-scroll ticks call this directly with the scroll direction after
/// moving the viewport.
pub fn sort_lane(
    lane: Lane,
    drag: &ActiveDrag,
    metrics: &LaneMetrics,
    probe: &impl LayoutProbe,
    direction: Direction,
) -> Lane {
    let (lane, membership_changed) = sync_membership(lane, drag, metrics);
    let mut lane = Lane { direction, ..lane };

    let involved = membership_changed
        || lane.order.contains(&drag.item)
        || lane.items.contains(&drag.item);
    if !involved {
        return lane;
    }

    let o = metrics.orientation;
    let extent_of = |id: &ItemId| -> Option<f32> {
        if id == &drag.item {
            Some(drag.extent_along(o))
        } else {
            probe.item_bounds(id).map(|rect| rect.size().along(o))
        }
    };

    let rebuilt = lane.positions.is_none() || lane.home.is_none();
    if lane.positions.is_none() {
        lane.positions =
            PositionCache::compute(&lane.order, metrics.content_start(), metrics.gap, extent_of);
    }
    if lane.home.is_none() {
        lane.home =
            PositionCache::compute(&lane.items, metrics.content_start(), metrics.gap, extent_of);
    }
    let (Some(mut positions), Some(home)) = (lane.positions.take(), lane.home.clone()) else {
        trace!(lane = %lane.id(), "degenerate item extent, skipping pass");
        return lane;
    };

    let mut swapped = false;
    if lane.order.contains(&drag.item) {
        let target = drag.position.along(o)
            + metrics.scroll_offset
            + drag.extent_along(o) / 2.0 * direction.sign();
        swapped = bubble_pass(
            &mut lane.order,
            &mut positions,
            &drag.item,
            target,
            direction,
            extent_of,
        );
        if swapped {
            debug!(
                lane = %lane.id(),
                item = %drag.item,
                index = ?lane.index_of(&drag.item),
                "dragged item moved"
            );
        }
    }

    if swapped || membership_changed || rebuilt || lane.hidden.is_none() {
        lane.translations = translations(&lane.items, &lane.order, &positions, &home);
        lane.hidden = lane
            .items
            .contains(&drag.item)
            .then(|| drag.item.clone());
    }
    lane.positions = Some(positions);
    lane
}

/// Apply membership entry or exit for the current claim.
///
/// Returns the next lane and whether its membership changed.
fn sync_membership(mut lane: Lane, drag: &ActiveDrag, metrics: &LaneMetrics) -> (Lane, bool) {
    let holds = lane.order.contains(&drag.item);
    let is_target = drag.is_claimed_by(lane.id());

    match (is_target, holds) {
        (true, false) => {
            lane.order.push(drag.item.clone());
            if !lane.items.contains(&drag.item) {
                lane.reserved_padding = drag.extent_along(metrics.orientation) + metrics.gap;
            }
            lane.positions = None;
            debug!(
                lane = %lane.id(),
                item = %drag.item,
                reserved = lane.reserved_padding,
                "dragged item entered lane"
            );
            (lane, true)
        }
        (false, true) => {
            lane.order.retain(|id| id != &drag.item);
            lane.reserved_padding = 0.0;
            lane.positions = None;
            debug!(lane = %lane.id(), item = %drag.item, "dragged item left lane");
            (lane, true)
        }
        _ => (lane, false),
    }
}

/// One adjacent-swap pass of `order` in the direction of motion.
///
/// The dragged item is compared using `target`; everyone else uses its
/// cached position. Positions are patched after every swap. Returns whether
/// anything moved.
pub fn bubble_pass(
    order: &mut [ItemId],
    positions: &mut PositionCache,
    dragged: &ItemId,
    target: f32,
    direction: Direction,
    extent_of: impl Fn(&ItemId) -> Option<f32>,
) -> bool {
    let n = order.len();
    if n < 2 {
        return false;
    }

    let lefts: Vec<usize> = match direction {
        Direction::Forward => (0..n - 1).collect(),
        Direction::Backward => (0..n - 1).rev().collect(),
    };

    let mut swapped = false;
    for i in lefts {
        let value_at = |order: &[ItemId], index: usize| -> Option<f32> {
            if &order[index] == dragged {
                Some(target)
            } else {
                positions.get(index)
            }
        };
        let (Some(earlier), Some(later)) = (value_at(order, i), value_at(order, i + 1)) else {
            break;
        };
        if later < earlier {
            order.swap(i, i + 1);
            if !positions.patch_from(i, order, &extent_of) {
                order.swap(i, i + 1);
                break;
            }
            swapped = true;
        }
    }
    swapped
}

/// Offset of each of `items` from its in-flow slot to its slot in `order`.
fn translations(
    items: &[ItemId],
    order: &[ItemId],
    positions: &PositionCache,
    home: &PositionCache,
) -> Vec<f32> {
    let slots: HashMap<&ItemId, usize> = order.iter().enumerate().map(|(i, id)| (id, i)).collect();
    items
        .iter()
        .enumerate()
        .map(|(k, id)| {
            match (
                slots.get(id).and_then(|&j| positions.get(j)),
                home.get(k),
            ) {
                (Some(now), Some(rest)) => now - rest,
                _ => 0.0,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "reorder_tests.rs"]
mod tests;
