//! Board fixtures: lanes, their geometry, and their items as JSON.
//!
//! A fixture describes both halves of a board: the engine's lanes (ids,
//! groups, items) and the static layout a front-end would otherwise
//! measure.
//!
//! ```json
//! {
//!   "item_extent": 50,
//!   "lanes": [
//!     { "id": "A", "bounds": { "x": 0, "y": 0, "width": 200, "height": 600 },
//!       "items": ["x", "y", { "id": "z", "extent": 80 }] }
//!   ]
//! }
//! ```

use crate::layout::StaticLayout;
use crate::model::{FixtureError, GroupName, ItemId, LaneId, Orientation, Rect};
use crate::state::{Board, DragTuning, LaneConfig};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

const DEFAULT_ITEM_EXTENT: f32 = 50.0;

fn default_item_extent() -> f32 {
    DEFAULT_ITEM_EXTENT
}

/// A whole board.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardFixture {
    /// Extent of items that do not give their own.
    #[serde(default = "default_item_extent")]
    pub item_extent: f32,
    /// Lanes in board order.
    pub lanes: Vec<LaneFixture>,
}

/// One lane.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaneFixture {
    /// Lane id.
    pub id: LaneId,
    /// Drag group, `"default"` when omitted.
    #[serde(default)]
    pub group: GroupName,
    /// Whether drags may start here.
    #[serde(default)]
    pub disabled: bool,
    /// Viewport in screen coordinates.
    pub bounds: Rect,
    /// Sorting axis.
    #[serde(default)]
    pub orientation: Orientation,
    /// Space between items.
    #[serde(default)]
    pub gap: f32,
    /// Space before the first and after the last item.
    #[serde(default)]
    pub padding: f32,
    /// Items in rendered order.
    #[serde(default)]
    pub items: Vec<ItemFixture>,
}

/// An item, either a bare id or an id with explicit geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ItemFixture {
    /// Id only; uses the board's item extent.
    Id(ItemId),
    /// Id with optional extent and cross-axis breadth.
    Sized {
        /// Item id.
        id: ItemId,
        /// Length along the lane axis.
        #[serde(default)]
        extent: Option<f32>,
        /// Length across the lane axis.
        #[serde(default)]
        breadth: Option<f32>,
    },
}

impl ItemFixture {
    /// Item id.
    pub fn id(&self) -> &ItemId {
        match self {
            Self::Id(id) | Self::Sized { id, .. } => id,
        }
    }
}

impl BoardFixture {
    /// Reject duplicate lane ids and items that appear more than once.
    pub fn validate(&self) -> Result<(), FixtureError> {
        let mut lanes = HashSet::new();
        let mut items = HashSet::new();
        for lane in &self.lanes {
            if !lanes.insert(&lane.id) {
                return Err(FixtureError::DuplicateLane(lane.id.clone()));
            }
            for item in &lane.items {
                if !items.insert(item.id()) {
                    return Err(FixtureError::DuplicateItem(item.id().clone()));
                }
            }
        }
        Ok(())
    }

    /// Build the engine board and the matching static layout.
    pub fn build(&self, tuning: DragTuning) -> (Board, StaticLayout) {
        let mut board = Board::new(tuning);
        let mut layout = StaticLayout::new();

        for lane in &self.lanes {
            layout.insert_lane(
                lane.id.clone(),
                lane.bounds,
                lane.orientation,
                lane.gap,
                lane.padding,
            );
            for item in &lane.items {
                let (extent, breadth) = match item {
                    ItemFixture::Id(_) => (self.item_extent, None),
                    ItemFixture::Sized {
                        extent, breadth, ..
                    } => (extent.unwrap_or(self.item_extent), *breadth),
                };
                layout.push_item(&lane.id, item.id().clone(), extent, breadth);
            }
            board.add_lane(
                LaneConfig {
                    id: lane.id.clone(),
                    group: lane.group.clone(),
                    disabled: lane.disabled,
                },
                lane.items.iter().map(|item| item.id().clone()).collect(),
            );
        }

        debug!(lanes = self.lanes.len(), "board built from fixture");
        (board, layout)
    }
}

/// Parse and validate a fixture from JSON text.
pub fn parse_fixture(json: &str) -> Result<BoardFixture, FixtureError> {
    let fixture: BoardFixture = serde_json::from_str(json).map_err(|e| FixtureError::Parse {
        reason: e.to_string(),
    })?;
    fixture.validate()?;
    Ok(fixture)
}

/// Read, parse and validate a fixture file.
pub fn load_fixture(path: &Path) -> Result<BoardFixture, FixtureError> {
    let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fixture(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutProbe;

    const BOARD: &str = r#"{
        "lanes": [
            { "id": "A", "bounds": { "x": 0, "y": 0, "width": 200, "height": 600 },
              "items": ["x", "y", { "id": "z", "extent": 80 }] },
            { "id": "B", "group": "archive", "disabled": true, "orientation": "horizontal",
              "gap": 4, "padding": 2,
              "bounds": { "x": 0, "y": 700, "width": 600, "height": 100 },
              "items": [] }
        ]
    }"#;

    #[test]
    fn parses_lanes_with_defaults() {
        let fixture = parse_fixture(BOARD).expect("valid fixture");
        assert_eq!(fixture.item_extent, 50.0);
        assert_eq!(fixture.lanes.len(), 2);

        let a = &fixture.lanes[0];
        assert_eq!(a.group, GroupName::default());
        assert!(!a.disabled);
        assert_eq!(a.orientation, Orientation::Vertical);
        assert_eq!(a.items.len(), 3);

        let b = &fixture.lanes[1];
        assert_eq!(b.group.as_str(), "archive");
        assert!(b.disabled);
        assert_eq!(b.orientation, Orientation::Horizontal);
    }

    #[test]
    fn build_mirrors_items_into_board_and_layout() {
        let (board, layout) = parse_fixture(BOARD)
            .expect("valid fixture")
            .build(DragTuning::default());

        let a = LaneId::new("A").expect("valid");
        let lane = board.lane(&a).expect("lane A");
        let ids: Vec<&str> = lane.items().iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, ["x", "y", "z"]);
        assert_eq!(layout.item_ids(&a), lane.items());

        let z = layout
            .item_bounds(&ItemId::new("z").expect("valid"))
            .expect("z mounted");
        assert_eq!(z, Rect::new(0.0, 100.0, 200.0, 80.0));

        let b = LaneId::new("B").expect("valid");
        assert!(board.lane(&b).is_some_and(|l| l.is_disabled()));
    }

    #[test]
    fn duplicate_lane_is_rejected() {
        let json = r#"{ "lanes": [
            { "id": "A", "bounds": { "x": 0, "y": 0, "width": 1, "height": 1 } },
            { "id": "A", "bounds": { "x": 0, "y": 0, "width": 1, "height": 1 } }
        ] }"#;
        assert!(matches!(
            parse_fixture(json),
            Err(FixtureError::DuplicateLane(id)) if id.as_str() == "A"
        ));
    }

    #[test]
    fn item_in_two_lanes_is_rejected() {
        let json = r#"{ "lanes": [
            { "id": "A", "bounds": { "x": 0, "y": 0, "width": 1, "height": 1 }, "items": ["x"] },
            { "id": "B", "bounds": { "x": 0, "y": 0, "width": 1, "height": 1 }, "items": ["x"] }
        ] }"#;
        assert!(matches!(
            parse_fixture(json),
            Err(FixtureError::DuplicateItem(id)) if id.as_str() == "x"
        ));
    }

    #[test]
    fn empty_ids_and_unknown_keys_are_parse_errors() {
        let empty = r#"{ "lanes": [ { "id": "", "bounds": { "x": 0, "y": 0, "width": 1, "height": 1 } } ] }"#;
        assert!(matches!(parse_fixture(empty), Err(FixtureError::Parse { .. })));

        let unknown = r#"{ "lanes": [], "colour": "red" }"#;
        assert!(matches!(parse_fixture(unknown), Err(FixtureError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            load_fixture(Path::new("/nonexistent/board.json")),
            Err(FixtureError::Read { .. })
        ));
    }
}
