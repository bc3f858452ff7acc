//! Replays a script against a board and its static layout.
//!
//! This is the ordering store's stand-in: every commit the board emits is
//! applied to both the board's item lists and the layout before the next
//! step runs, just as a real front-end would re-render after persisting.

use crate::layout::StaticLayout;
use crate::model::{CommitEvent, DragEvent, ItemId, LaneId, Point};
use crate::script::ScriptStep;
use crate::state::Board;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Final item order of one lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaneOrder {
    /// Lane id.
    pub lane: LaneId,
    /// Items in order.
    pub items: Vec<ItemId>,
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// Events in emission order.
    pub events: Vec<DragEvent>,
    /// Lane orders after the last step.
    pub orders: Vec<LaneOrder>,
}

/// A board driven step by step.
#[derive(Debug, Clone)]
pub struct Replay {
    board: Board,
    layout: StaticLayout,
}

impl Replay {
    /// Start replaying against `board` laid out by `layout`.
    pub fn new(board: Board, layout: StaticLayout) -> Self {
        Self { board, layout }
    }

    /// Apply one step and return the events it produced.
    pub fn apply(&mut self, step: &ScriptStep) -> Vec<DragEvent> {
        debug!(step = ?step, "replaying step");
        match step {
            ScriptStep::PointerDown { x, y, item, lane } => {
                self.board
                    .pointer_down(Point::new(*x, *y), item, lane, &self.layout);
            }
            ScriptStep::TouchStart { x, y, item, lane } => {
                self.board
                    .touch_start(Point::new(*x, *y), item, lane, &self.layout);
            }
            ScriptStep::PointerMove { .. } | ScriptStep::TouchMove { .. } => {
                if let Some(point) = step.point() {
                    self.board.pointer_move(point, &self.layout);
                }
            }
            ScriptStep::PointerUp | ScriptStep::TouchEnd => {
                if let Some(commit) = self.board.pointer_up() {
                    self.persist(&commit);
                }
            }
            ScriptStep::Wait { ms } => {
                self.board
                    .advance(Duration::from_millis(*ms), &mut self.layout);
            }
            ScriptStep::Cancel => self.board.cancel(),
            ScriptStep::RemoveItem { lane, item } => {
                self.layout.remove_item(item);
                self.board.remove_item(lane, item, &self.layout);
            }
            ScriptStep::RemoveLane { lane } => {
                self.board.remove_lane(lane);
                self.layout.remove_lane(lane);
            }
        }
        self.board.take_events()
    }

    /// Apply `commit` to the board's item lists and to the layout, as the
    /// ordering store and a re-render would. Returns `false` (with a
    /// warning) if either side could not apply it.
    pub fn persist(&mut self, commit: &CommitEvent) -> bool {
        let on_board = self.board.apply_commit(commit);
        if !on_board {
            warn!(item = %commit.id, to = %commit.to, "commit not applied to board");
        }
        let in_layout = self.layout.move_item(&commit.id, &commit.to, commit.index);
        if !in_layout {
            warn!(item = %commit.id, to = %commit.to, "committed item not in layout");
        }
        on_board && in_layout
    }

    /// Current lane orders in board order.
    pub fn orders(&self) -> Vec<LaneOrder> {
        self.board
            .lanes()
            .iter()
            .map(|lane| LaneOrder {
                lane: lane.id().clone(),
                items: lane.order().to_vec(),
            })
            .collect()
    }

    /// The board being driven.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The layout being driven.
    pub fn layout(&self) -> &StaticLayout {
        &self.layout
    }
}

/// Replay every step and collect the results.
pub fn run<'a>(
    mut replay: Replay,
    steps: impl IntoIterator<Item = &'a ScriptStep>,
) -> ReplayReport {
    let events = steps
        .into_iter()
        .flat_map(|step| replay.apply(step))
        .collect();
    ReplayReport {
        events,
        orders: replay.orders(),
    }
}
