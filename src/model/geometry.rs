//! Screen-space geometry primitives.
//!
//! Everything is measured in logical pixels with the origin at the top-left
//! of the screen. Lanes sort along one axis (their [`Orientation`]); the
//! other axis is the cross axis.

use serde::{Deserialize, Serialize};

/// Axis along which a lane lays out and sorts its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Items stack top to bottom; sorting runs along `y`.
    #[default]
    Vertical,
    /// Items stack left to right; sorting runs along `x`.
    Horizontal,
}

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Coordinate on the sorting axis of `orientation`.
    pub fn along(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Vertical => self.y,
            Orientation::Horizontal => self.x,
        }
    }

    /// Coordinate on the cross axis of `orientation`.
    pub fn across(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Vertical => self.x,
            Orientation::Horizontal => self.y,
        }
    }

    /// Component-wise difference `self - other`.
    pub fn offset_from(&self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Clamp both coordinates to be non-negative.
    pub fn clamp_non_negative(self) -> Point {
        Point::new(self.x.max(0.0), self.y.max(0.0))
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height of a measured box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// Create a size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent along the sorting axis of `orientation`.
    pub fn along(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Vertical => self.height,
            Orientation::Horizontal => self.width,
        }
    }

    /// Extent along the cross axis of `orientation`.
    pub fn across(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Vertical => self.width,
            Orientation::Horizontal => self.height,
        }
    }
}

/// An axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Leading edge on the sorting axis.
    pub fn start(&self, orientation: Orientation) -> f32 {
        self.origin().along(orientation)
    }

    /// Trailing edge on the sorting axis.
    pub fn end(&self, orientation: Orientation) -> f32 {
        self.start(orientation) + self.size().along(orientation)
    }

    /// Leading edge on the cross axis.
    pub fn cross_start(&self, orientation: Orientation) -> f32 {
        self.origin().across(orientation)
    }

    /// Trailing edge on the cross axis.
    pub fn cross_end(&self, orientation: Orientation) -> f32 {
        self.cross_start(orientation) + self.size().across(orientation)
    }

    /// Whether `value` lies in `[cross_start, cross_end)`.
    pub fn spans_across(&self, orientation: Orientation, value: f32) -> bool {
        value >= self.cross_start(orientation) && value < self.cross_end(orientation)
    }
}
