//! JSON-lines input scripts.
//!
//! Each non-blank line is one step, tagged by `type`:
//!
//! ```text
//! # press y, drag it into lane B, drop
//! {"type": "pointer_down", "x": 100, "y": 75, "item": "y", "lane": "A"}
//! {"type": "pointer_move", "x": 400, "y": 85}
//! {"type": "pointer_up"}
//! ```
//!
//! Lines starting with `#` are comments.

use crate::model::{ItemId, LaneId, Point, ScriptError};
use serde::Deserialize;
use std::io::BufRead;

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ScriptStep {
    /// Mouse/pen press on an item.
    PointerDown {
        /// Pointer x.
        x: f32,
        /// Pointer y.
        y: f32,
        /// Pressed item.
        item: ItemId,
        /// Lane holding the item.
        lane: LaneId,
    },
    /// Pointer moved.
    PointerMove {
        /// Pointer x.
        x: f32,
        /// Pointer y.
        y: f32,
    },
    /// Pointer released.
    PointerUp,
    /// Touch press on an item.
    TouchStart {
        /// Touch x.
        x: f32,
        /// Touch y.
        y: f32,
        /// Pressed item.
        item: ItemId,
        /// Lane holding the item.
        lane: LaneId,
    },
    /// Touch moved.
    TouchMove {
        /// Touch x.
        x: f32,
        /// Touch y.
        y: f32,
    },
    /// Touch released.
    TouchEnd,
    /// Let virtual time pass.
    Wait {
        /// Milliseconds.
        ms: u64,
    },
    /// Abort the drag, as an Escape key would.
    Cancel,
    /// An item disappears from a lane.
    RemoveItem {
        /// Lane holding the item.
        lane: LaneId,
        /// Removed item.
        item: ItemId,
    },
    /// A lane is unmounted.
    RemoveLane {
        /// Removed lane.
        lane: LaneId,
    },
}

impl ScriptStep {
    /// Pointer position carried by the step, if any.
    pub fn point(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::TouchStart { x, y, .. }
            | Self::TouchMove { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
///
/// `line_number` is 1-based and only used for error reporting.
pub fn parse_step(line: &str, line_number: usize) -> Result<Option<ScriptStep>, ScriptError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| ScriptError::InvalidStep {
            line: line_number,
            reason: e.to_string(),
        })
}

/// Parse a whole script, stopping at the first malformed line.
pub fn parse_script(reader: impl BufRead) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        if let Some(step) = parse_step(&line?, index + 1)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let script = r#"
# comment
{"type": "pointer_down", "x": 100, "y": 75, "item": "y", "lane": "A"}
{"type": "pointer_move", "x": 1.5, "y": 2}
{"type": "pointer_up"}
{"type": "touch_start", "x": 0, "y": 0, "item": "p", "lane": "B"}
{"type": "touch_move", "x": 3, "y": 4}
{"type": "touch_end"}
{"type": "wait", "ms": 500}
{"type": "cancel"}
{"type": "remove_item", "lane": "A", "item": "x"}
{"type": "remove_lane", "lane": "B"}
"#;
        let steps = parse_script(script.as_bytes()).expect("valid script");
        assert_eq!(steps.len(), 10);
        assert_eq!(
            steps[0],
            ScriptStep::PointerDown {
                x: 100.0,
                y: 75.0,
                item: ItemId::new("y").expect("valid"),
                lane: LaneId::new("A").expect("valid"),
            }
        );
        assert_eq!(steps[1].point(), Some(Point::new(1.5, 2.0)));
        assert_eq!(steps[2], ScriptStep::PointerUp);
        assert_eq!(steps[6], ScriptStep::Wait { ms: 500 });
        assert_eq!(steps[7].point(), None);
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_step("   ", 1).ok(), Some(None));
        assert_eq!(parse_step("# {\"type\": \"pointer_up\"}", 2).ok(), Some(None));
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let script = "{\"type\": \"pointer_up\"}\n\n{\"type\": \"teleport\"}\n";
        match parse_script(script.as_bytes()) {
            Err(ScriptError::InvalidStep { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected invalid step, got {other:?}"),
        }
    }

    #[test]
    fn empty_ids_are_rejected() {
        let line = r#"{"type": "remove_lane", "lane": ""}"#;
        assert!(matches!(
            parse_step(line, 7),
            Err(ScriptError::InvalidStep { line: 7, .. })
        ));
    }
}
