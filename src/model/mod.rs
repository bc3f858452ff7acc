//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod event;
pub mod geometry;
pub mod identifiers;

// Re-export for convenience
pub use error::{AppError, FixtureError, ScriptError};
pub use event::{CommitEvent, DragEvent};
pub use geometry::{Orientation, Point, Rect, Size};
pub use identifiers::{
    GroupName, InvalidGroupName, InvalidItemId, InvalidLaneId, ItemId, LaneId,
};
