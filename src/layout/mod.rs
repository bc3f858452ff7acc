//! Geometry probe.
//!
//! The engine never measures anything itself. It asks a [`LayoutProbe`] for
//! lane metrics and item bounds every time it needs them, and asks a
//! [`ScrollHost`] to move a lane's scroll offset during auto-scroll. Real
//! front-ends implement these against their layout tree; [`StaticLayout`]
//! is an in-memory implementation used by the replay binary and the tests.

pub mod static_layout;

pub use static_layout::StaticLayout;

use crate::model::{ItemId, LaneId, Orientation, Rect};

/// Layout metadata of one lane, read on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneMetrics {
    /// Viewport rectangle in screen coordinates.
    pub bounds: Rect,
    /// Sorting axis.
    pub orientation: Orientation,
    /// Space between adjacent items.
    pub gap: f32,
    /// Padding before the first item (and after the last).
    pub padding: f32,
    /// Current scroll offset along the sorting axis.
    pub scroll_offset: f32,
    /// Total scrollable content length along the sorting axis.
    pub content_length: f32,
}

impl LaneMetrics {
    /// Visible length of the viewport along the sorting axis.
    pub fn client_length(&self) -> f32 {
        self.bounds.size().along(self.orientation)
    }

    /// Offset of the first item slot, unscrolled.
    pub fn content_start(&self) -> f32 {
        self.bounds.start(self.orientation) + self.padding
    }

    /// Largest valid scroll offset given `reserved` trailing padding.
    pub fn max_scroll(&self, reserved: f32) -> f32 {
        (self.content_length + reserved - self.client_length()).max(0.0)
    }

    /// Whether the lane has not been laid out yet (or reports nonsense).
    pub fn is_degenerate(&self) -> bool {
        let client = self.client_length();
        !(client > 0.0
            && client.is_finite()
            && self.bounds.size().across(self.orientation) > 0.0
            && self.gap.is_finite()
            && self.padding.is_finite()
            && self.scroll_offset.is_finite()
            && self.content_length.is_finite())
    }
}

/// Read-only access to live layout measurements.
pub trait LayoutProbe {
    /// Metrics of a mounted lane, or `None` if it is not mounted.
    fn lane_metrics(&self, lane: &LaneId) -> Option<LaneMetrics>;

    /// Current on-screen bounds of an item, or `None` if it is not mounted.
    fn item_bounds(&self, item: &ItemId) -> Option<Rect>;
}

/// A probe whose lanes can also be scrolled.
pub trait ScrollHost: LayoutProbe {
    /// Move `lane`'s scroll offset to `offset`. Returns `false` if the lane
    /// is not mounted.
    fn set_scroll_offset(&mut self, lane: &LaneId, offset: f32) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> LaneMetrics {
        LaneMetrics {
            bounds: Rect::new(0.0, 100.0, 200.0, 300.0),
            orientation: Orientation::Vertical,
            gap: 8.0,
            padding: 4.0,
            scroll_offset: 0.0,
            content_length: 500.0,
        }
    }

    #[test]
    fn client_length_follows_orientation() {
        assert_eq!(metrics().client_length(), 300.0);
        let horizontal = LaneMetrics {
            orientation: Orientation::Horizontal,
            ..metrics()
        };
        assert_eq!(horizontal.client_length(), 200.0);
    }

    #[test]
    fn max_scroll_includes_reserved_padding() {
        assert_eq!(metrics().max_scroll(0.0), 200.0);
        assert_eq!(metrics().max_scroll(58.0), 258.0);
    }

    #[test]
    fn max_scroll_is_zero_when_content_fits() {
        let short = LaneMetrics {
            content_length: 120.0,
            ..metrics()
        };
        assert_eq!(short.max_scroll(0.0), 0.0);
    }

    #[test]
    fn zero_sized_lane_is_degenerate() {
        let unmounted = LaneMetrics {
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
            ..metrics()
        };
        assert!(unmounted.is_degenerate());
        assert!(!metrics().is_degenerate());
    }

    #[test]
    fn nan_scroll_offset_is_degenerate() {
        let broken = LaneMetrics {
            scroll_offset: f32::NAN,
            ..metrics()
        };
        assert!(broken.is_degenerate());
    }
}
