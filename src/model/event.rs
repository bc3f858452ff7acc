//! Events raised by the board for the outside world.

use super::identifiers::{ItemId, LaneId};
use serde::Serialize;

/// Final reorder/move instruction for a completed drag.
///
/// The consumer moves `id` out of `from`'s order and inserts it into `to`'s
/// order at `index`. Emitted exactly once per completed drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitEvent {
    /// The dragged item.
    pub id: ItemId,
    /// Lane the drag started in.
    pub from: LaneId,
    /// Lane that claimed the drop.
    pub to: LaneId,
    /// Insertion index within `to` after removal from `from`.
    pub index: usize,
}

/// Everything observable that a drag produces, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEvent {
    /// A pending press crossed the threshold (or a long press fired).
    Started {
        /// The dragged item.
        id: ItemId,
        /// Lane the drag started in.
        from: LaneId,
    },
    /// The drag completed with a destination.
    Committed(CommitEvent),
    /// The drag ended without changing any order.
    Cancelled {
        /// The dragged item.
        id: ItemId,
        /// Lane the item returns to.
        from: LaneId,
    },
    /// The long-press path fired and haptics are enabled.
    HapticPulse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit() -> CommitEvent {
        CommitEvent {
            id: ItemId::new("y").expect("valid"),
            from: LaneId::new("A").expect("valid"),
            to: LaneId::new("B").expect("valid"),
            index: 1,
        }
    }

    #[test]
    fn committed_event_flattens_commit_fields() {
        let json = serde_json::to_string(&DragEvent::Committed(commit())).expect("serializable");
        assert_eq!(
            json,
            r#"{"event":"committed","id":"y","from":"A","to":"B","index":1}"#
        );
    }

    #[test]
    fn haptic_pulse_serializes_as_bare_tag() {
        let json = serde_json::to_string(&DragEvent::HapticPulse).expect("serializable");
        assert_eq!(json, r#"{"event":"haptic_pulse"}"#);
    }
}
