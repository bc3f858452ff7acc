//! Drag-and-drop state machine (pure).
//!
//! All transitions are plain functions over immutable snapshots, testable
//! without any UI. [`Board`] is the single writer that wires input, timers
//! and lanes together.

pub mod autoscroll;
pub mod board;
pub mod controller;
pub mod drag_state;
pub mod ghost;
pub mod lane;
pub mod position_cache;
pub mod reorder;
pub mod timers;

// Re-export for convenience
pub use autoscroll::ScrollAmount;
pub use board::Board;
pub use controller::{DragController, DragTuning, PressKind};
pub use drag_state::{ActiveDrag, DragState};
pub use ghost::Ghost;
pub use lane::{Direction, ItemStyle, Lane, LaneConfig};
pub use position_cache::PositionCache;
pub use timers::{TimerKind, TimerQueue};
