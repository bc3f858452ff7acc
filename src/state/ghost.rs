//! Floating stand-in for the dragged item.

use crate::model::{ItemId, Point, Rect, Size};

/// Stacking layer of the ghost, above every lane.
pub const GHOST_LAYER: u32 = 9999;

/// Fully opaque copy of the dragged item that follows the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    /// Item being represented.
    pub item: ItemId,
    /// Size measured at grab time.
    pub size: Size,
    /// Top-left in screen coordinates.
    pub position: Point,
    /// Always `1.0`.
    pub opacity: f32,
    /// Always [`GHOST_LAYER`].
    pub layer: u32,
}

impl Ghost {
    /// Ghost of `item` at `position`.
    pub fn new(item: ItemId, size: Size, position: Point) -> Self {
        Self {
            item,
            size,
            position,
            opacity: 1.0,
            layer: GHOST_LAYER,
        }
    }

    /// Same ghost at a new position.
    pub fn moved_to(self, position: Point) -> Self {
        Self { position, ..self }
    }

    /// Screen rectangle covered by the ghost.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.size.width,
            self.size.height,
        )
    }
}
