//! The board: every lane plus the single in-flight drag.
//!
//! Input handlers, timer ticks and lane mutations all run to completion
//! against `&mut Board`. Each handler replaces the [`DragState`] snapshot
//! first and only then fans it out to the lanes, so no lane ever reads a
//! half-updated drag.

use super::autoscroll::{self, ScrollAmount};
use super::controller::{
    DragController, DragTuning, MoveOutcome, PendingPress, PressKind, ReleaseOutcome,
};
use super::drag_state::{ActiveDrag, DragState};
use super::ghost::Ghost;
use super::lane::{Lane, LaneConfig};
use super::reorder;
use super::timers::{TimerKind, TimerQueue};
use crate::layout::{LayoutProbe, ScrollHost};
use crate::model::{CommitEvent, DragEvent, ItemId, LaneId, Point};
use std::mem;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Lanes, the drag in progress, and everything needed to tear it down.
#[derive(Debug, Clone)]
pub struct Board {
    lanes: Vec<Lane>,
    drag: DragState,
    controller: DragController,
    ghost: Option<Ghost>,
    timers: TimerQueue,
    tuning: DragTuning,
    events: Vec<DragEvent>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DragTuning::default())
    }
}

impl Board {
    /// Empty board.
    pub fn new(tuning: DragTuning) -> Self {
        Self {
            lanes: Vec::new(),
            drag: DragState::idle(),
            controller: DragController::new(tuning.drag_threshold),
            ghost: None,
            timers: TimerQueue::new(),
            tuning,
            events: Vec::new(),
        }
    }

    // ===== Lanes =====

    /// Add a lane at the end of board order. Returns `false` if the id is
    /// already taken.
    pub fn add_lane(&mut self, config: LaneConfig, items: Vec<ItemId>) -> bool {
        if self.lane(&config.id).is_some() {
            warn!(lane = %config.id, "lane already exists");
            return false;
        }
        self.lanes.push(Lane::new(config, items));
        true
    }

    /// Replace a lane's external item list, as the ordering store would.
    ///
    /// During a drag the lane keeps its working arrangement and the drag is
    /// fanned out again against `probe`, which must already reflect the new
    /// list.
    pub fn set_items(
        &mut self,
        lane: &LaneId,
        items: Vec<ItemId>,
        probe: &impl LayoutProbe,
    ) -> bool {
        if !self.replace_items(lane, items) {
            return false;
        }
        if self.drag.is_active() {
            self.fan_out(probe);
        }
        true
    }

    fn replace_items(&mut self, lane: &LaneId, items: Vec<ItemId>) -> bool {
        let Some(index) = self.lane_index(lane) else {
            return false;
        };
        let current = self.lanes.remove(index);
        let next = match self.drag.active() {
            Some(drag) => {
                debug!(lane = %lane, item = %drag.item, "items replaced during drag");
                current.with_items_during_drag(items, &drag.item)
            }
            None => current.with_items(items),
        };
        self.lanes.insert(index, next);
        true
    }

    /// Unmount a lane.
    ///
    /// Removing the origin lane (of a drag or a pending press) cancels it.
    /// Removing the lane holding the claim only releases the claim.
    pub fn remove_lane(&mut self, lane: &LaneId) -> bool {
        let Some(index) = self.lane_index(lane) else {
            return false;
        };
        let is_origin = self.drag.active().is_some_and(|d| &d.from == lane)
            || self.controller.pending().is_some_and(|p| &p.lane == lane);
        if is_origin {
            info!(lane = %lane, "origin lane removed, cancelling drag");
            self.cancel();
        } else if self.drag.active().is_some_and(|d| d.is_claimed_by(lane)) {
            debug!(lane = %lane, "claiming lane removed, releasing claim");
            self.drag = mem::take(&mut self.drag).with_target(None);
        }
        self.timers.cancel(&TimerKind::AutoScroll(lane.clone()));
        self.lanes.remove(index);
        true
    }

    /// Remove one item from a lane's external list. Removing the dragged
    /// (or pressed) item cancels the drag; removing any other item keeps it
    /// going.
    pub fn remove_item(
        &mut self,
        lane: &LaneId,
        item: &ItemId,
        probe: &impl LayoutProbe,
    ) -> bool {
        let is_dragged = self.drag.active().is_some_and(|d| &d.item == item)
            || self.controller.pending().is_some_and(|p| &p.item == item);
        if is_dragged {
            info!(item = %item, "dragged item removed, cancelling drag");
            self.cancel();
        }
        let Some(current) = self.lane(lane) else {
            return false;
        };
        if !current.items().contains(item) {
            return false;
        }
        let items = current
            .items()
            .iter()
            .filter(|id| *id != item)
            .cloned()
            .collect();
        self.set_items(lane, items, probe)
    }

    /// Move `commit.id` in the external lists the way the ordering store
    /// does after a commit.
    pub fn apply_commit(&mut self, commit: &CommitEvent) -> bool {
        let (Some(from), Some(to)) = (self.lane(&commit.from), self.lane(&commit.to)) else {
            return false;
        };
        if !from.items().contains(&commit.id) {
            return false;
        }
        let from_items: Vec<ItemId> = from
            .items()
            .iter()
            .filter(|id| **id != commit.id)
            .cloned()
            .collect();
        let mut to_items: Vec<ItemId> = if commit.from == commit.to {
            from_items.clone()
        } else {
            to.items().to_vec()
        };
        to_items.insert(commit.index.min(to_items.len()), commit.id.clone());

        if commit.from != commit.to {
            self.replace_items(&commit.from, from_items);
        }
        self.replace_items(&commit.to, to_items)
    }

    /// Lanes in board order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Lane by id.
    pub fn lane(&self, lane: &LaneId) -> Option<&Lane> {
        self.lanes.iter().find(|l| l.id() == lane)
    }

    fn lane_index(&self, lane: &LaneId) -> Option<usize> {
        self.lanes.iter().position(|l| l.id() == lane)
    }

    // ===== Observation =====

    /// Current drag snapshot.
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Floating ghost, present exactly while a drag is active.
    pub fn ghost(&self) -> Option<&Ghost> {
        self.ghost.as_ref()
    }

    /// Virtual time.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Interaction constants in use.
    pub fn tuning(&self) -> &DragTuning {
        &self.tuning
    }

    /// Whether global move/up listeners are attached.
    pub fn listeners_attached(&self) -> bool {
        self.controller.listeners().is_attached()
    }

    /// Number of pending timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether a timer of `kind` is pending.
    pub fn is_scheduled(&self, kind: &TimerKind) -> bool {
        self.timers.is_scheduled(kind)
    }

    /// Drain emitted events, oldest first.
    pub fn take_events(&mut self) -> Vec<DragEvent> {
        mem::take(&mut self.events)
    }

    // ===== Input =====

    /// Mouse/pen press on `item` in `lane` at `pointer`.
    ///
    /// Ignored (returns `false`) when a press or drag is already in
    /// progress, the lane is disabled, the item is not in the lane, or the
    /// item cannot be measured.
    pub fn pointer_down(
        &mut self,
        pointer: Point,
        item: &ItemId,
        lane: &LaneId,
        probe: &impl LayoutProbe,
    ) -> bool {
        self.press(pointer, item, lane, PressKind::Pointer, probe)
    }

    /// Touch press; the drag starts once the long-press delay elapses.
    pub fn touch_start(
        &mut self,
        pointer: Point,
        item: &ItemId,
        lane: &LaneId,
        probe: &impl LayoutProbe,
    ) -> bool {
        if !self.press(pointer, item, lane, PressKind::Touch, probe) {
            return false;
        }
        self.timers.schedule(TimerKind::LongPress, self.tuning.long_press);
        true
    }

    /// Pointer moved to `pointer`.
    pub fn pointer_move(&mut self, pointer: Point, probe: &impl LayoutProbe) {
        match self.controller.pointer_moved(pointer) {
            MoveOutcome::Ignored | MoveOutcome::Pending => {}
            MoveOutcome::Abandoned => {
                self.timers.cancel(&TimerKind::LongPress);
            }
            MoveOutcome::Confirmed(press) => {
                self.confirm(press, probe);
            }
            MoveOutcome::Dragging => {
                let Some(grab_offset) = self.drag.active().map(|d| d.grab_offset) else {
                    return;
                };
                self.drag =
                    mem::take(&mut self.drag).with_position(pointer.offset_from(grab_offset));
                self.fan_out(probe);
            }
        }
    }

    /// Touch moved; same as a pointer move.
    pub fn touch_move(&mut self, pointer: Point, probe: &impl LayoutProbe) {
        self.pointer_move(pointer, probe);
    }

    /// Pointer released. Returns the commit, if the drop produced one.
    pub fn pointer_up(&mut self) -> Option<CommitEvent> {
        match self.controller.released() {
            ReleaseOutcome::Ignored => None,
            ReleaseOutcome::Click => {
                trace!("press released before drag started");
                self.timers.cancel(&TimerKind::LongPress);
                None
            }
            ReleaseOutcome::Drop => self.finish_drop(),
        }
    }

    /// Touch released; same as a pointer release.
    pub fn touch_end(&mut self) -> Option<CommitEvent> {
        self.pointer_up()
    }

    /// Advance the virtual clock by `elapsed`, firing due timers in order.
    pub fn advance(&mut self, elapsed: Duration, host: &mut impl ScrollHost) {
        let until = self.timers.now() + elapsed;
        while let Some(kind) = self.timers.pop_due(until) {
            match kind {
                TimerKind::LongPress => self.long_press(&*host),
                TimerKind::AutoScroll(lane) => self.auto_scroll_tick(&lane, host),
            }
        }
        self.timers.advance_to(until);
    }

    /// Abort any press or drag. Emits `cancelled` if a drag was active.
    pub fn cancel(&mut self) {
        if let Some(drag) = self.drag.active() {
            info!(item = %drag.item, from = %drag.from, "drag cancelled");
            self.events.push(DragEvent::Cancelled {
                id: drag.item.clone(),
                from: drag.from.clone(),
            });
        }
        self.end_drag();
    }

    /// Unmount everything: cancel the drag and drop every lane.
    pub fn teardown(&mut self) {
        self.cancel();
        self.lanes.clear();
    }

    // ===== Internals =====

    fn press(
        &mut self,
        pointer: Point,
        item: &ItemId,
        lane: &LaneId,
        kind: PressKind,
        probe: &impl LayoutProbe,
    ) -> bool {
        let Some(state) = self.lane(lane) else {
            debug!(lane = %lane, "press on unknown lane");
            return false;
        };
        if state.is_disabled() {
            debug!(lane = %lane, "press on disabled lane");
            return false;
        }
        let Some(origin_index) = state.items().iter().position(|id| id == item) else {
            debug!(item = %item, lane = %lane, "pressed item not in lane");
            return false;
        };
        let group = state.group().clone();
        let (Some(metrics), Some(bounds)) = (probe.lane_metrics(lane), probe.item_bounds(item))
        else {
            debug!(item = %item, "pressed item not measurable");
            return false;
        };
        let size = bounds.size();
        if !(size.width > 0.0 && size.height > 0.0) {
            debug!(item = %item, "pressed item has no size");
            return false;
        }

        let item_origin = bounds.origin();
        self.controller.press(PendingPress {
            item: item.clone(),
            lane: lane.clone(),
            group,
            item_origin,
            origin: pointer,
            pointer,
            grab_offset: pointer.offset_from(item_origin),
            item_size: size,
            orientation: metrics.orientation,
            origin_index,
            kind,
        })
    }

    /// Turn a confirmed press into the first drag snapshot.
    fn confirm(&mut self, press: PendingPress, probe: &impl LayoutProbe) {
        let o = press.orientation;
        let drag = ActiveDrag {
            item: press.item.clone(),
            position: press.item_origin,
            previous_position: press.item_origin,
            grab_offset: press.grab_offset,
            from: press.lane.clone(),
            origin_index: press.origin_index,
            to: Some(press.lane.clone()),
            group: press.group.clone(),
            item_size: press.item_size,
            orientation: o,
            item_extent: press.item_size.along(o),
        };
        info!(item = %drag.item, from = %drag.from, "drag started");
        self.events.push(DragEvent::Started {
            id: drag.item.clone(),
            from: drag.from.clone(),
        });
        self.ghost = Some(Ghost::new(
            drag.item.clone(),
            drag.item_size,
            drag.position,
        ));
        self.drag = DragState::started(drag).with_position(press.item_position());
        self.fan_out(probe);
    }

    fn long_press(&mut self, probe: &impl LayoutProbe) {
        let Some(press) = self.controller.long_press_fired() else {
            return;
        };
        debug!(item = %press.item, "long press fired");
        self.confirm(press, probe);
        if self.tuning.haptics {
            self.events.push(DragEvent::HapticPulse);
        }
    }

    /// Settle the claim, update every lane, refresh auto-scroll, move the
    /// ghost.
    fn fan_out(&mut self, probe: &impl LayoutProbe) {
        let state = reorder::resolve_claim(&self.lanes, mem::take(&mut self.drag), probe);
        if let Some(drag) = state.active() {
            self.lanes = mem::take(&mut self.lanes)
                .into_iter()
                .map(|lane| reorder::update_lane(lane, drag, probe))
                .collect();
            self.ghost = self.ghost.take().map(|g| g.moved_to(drag.position));
        }
        self.drag = state;
        self.refresh_auto_scroll(probe);
    }

    /// Recompute each lane's auto-scroll amount, starting or stopping its
    /// tick as the amount changes.
    fn refresh_auto_scroll(&mut self, probe: &impl LayoutProbe) {
        let Some(drag) = self.drag.active() else {
            return;
        };
        let tick = self.tuning.tick_interval();
        for lane in mem::take(&mut self.lanes) {
            let amount = probe
                .lane_metrics(lane.id())
                .map(|metrics| autoscroll::evaluate(&lane, drag, &metrics))
                .unwrap_or_default();
            let kind = TimerKind::AutoScroll(lane.id().clone());
            if amount.is_idle() {
                if self.timers.cancel(&kind) {
                    debug!(lane = %lane.id(), "auto-scroll stopped");
                }
            } else if !self.timers.is_scheduled(&kind) {
                debug!(lane = %lane.id(), amount = ?amount, "auto-scroll started");
                self.timers.schedule(kind, tick);
            }
            self.lanes.push(lane.with_autoscroll(amount));
        }
    }

    /// One auto-scroll tick: scroll, re-sort in the scroll direction, and
    /// reschedule unless a bound was reached.
    fn auto_scroll_tick(&mut self, lane_id: &LaneId, host: &mut impl ScrollHost) {
        let Some(index) = self.lane_index(lane_id) else {
            return;
        };
        let Some(drag) = self.drag.active() else {
            return;
        };
        let Some(metrics) = host.lane_metrics(lane_id) else {
            self.set_autoscroll(index, ScrollAmount::Idle);
            return;
        };
        let lane = &self.lanes[index];
        let amount = autoscroll::evaluate(lane, drag, &metrics);
        if amount.is_idle() {
            self.set_autoscroll(index, ScrollAmount::Idle);
            return;
        }

        let max = metrics.max_scroll(lane.reserved_padding());
        let offset = autoscroll::next_offset(
            metrics.scroll_offset,
            amount,
            self.tuning.autoscroll_step,
            max,
        );
        host.set_scroll_offset(lane_id, offset);
        trace!(lane = %lane_id, offset, "auto-scroll tick");

        let Some(metrics) = host.lane_metrics(lane_id) else {
            return;
        };
        let direction = amount.direction_or(lane.direction());
        let lane = self.lanes.remove(index);
        let lane = reorder::sort_lane(lane, drag, &metrics, &*host, direction);
        let next = autoscroll::evaluate(&lane, drag, &metrics);
        self.lanes.insert(index, lane.with_autoscroll(next));

        if next.is_idle() {
            debug!(lane = %lane_id, "auto-scroll reached a bound");
        } else {
            self.timers.schedule(
                TimerKind::AutoScroll(lane_id.clone()),
                self.tuning.tick_interval(),
            );
        }
    }

    fn set_autoscroll(&mut self, index: usize, amount: ScrollAmount) {
        let lane = self.lanes.remove(index);
        self.lanes.insert(index, lane.with_autoscroll(amount));
    }

    /// Finish a release while dragging.
    ///
    /// Dropping with no claim, or back at the original index of the origin
    /// lane, is a cancellation.
    fn finish_drop(&mut self) -> Option<CommitEvent> {
        let drag = self.drag.active()?.clone();
        let index = drag
            .to
            .as_ref()
            .and_then(|to| self.lane(to))
            .and_then(|lane| lane.index_of(&drag.item));
        // Items may have been replaced since the press.
        let home_index = self
            .lane(&drag.from)
            .and_then(|lane| lane.items().iter().position(|id| id == &drag.item))
            .unwrap_or(drag.origin_index);

        let commit = match (&drag.to, index) {
            (Some(to), Some(index)) if !(to == &drag.from && index == home_index) => {
                Some(CommitEvent {
                    id: drag.item.clone(),
                    from: drag.from.clone(),
                    to: to.clone(),
                    index,
                })
            }
            _ => None,
        };

        match &commit {
            Some(event) => {
                info!(
                    item = %event.id,
                    from = %event.from,
                    to = %event.to,
                    index = event.index,
                    "drag committed"
                );
                self.events.push(DragEvent::Committed(event.clone()));
                self.end_drag();
            }
            None => self.cancel(),
        }
        commit
    }

    /// Tear down every drag resource in one step.
    fn end_drag(&mut self) {
        self.drag = DragState::idle();
        self.ghost = None;
        self.timers.clear();
        self.controller.reset();
        self.lanes = mem::take(&mut self.lanes)
            .into_iter()
            .map(Lane::reset)
            .collect();
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
