//! Tests for the board: drag lifecycle, long press, auto-scroll, teardown.

use super::*;
use crate::layout::StaticLayout;
use crate::model::{GroupName, Orientation, Rect};
use crate::state::autoscroll::ScrollAmount;

// ===== Test Helpers =====

fn lane_id(s: &str) -> LaneId {
    LaneId::new(s).expect("valid lane id")
}

fn item(s: &str) -> ItemId {
    ItemId::new(s).expect("valid item id")
}

fn ids(raw: &[&str]) -> Vec<ItemId> {
    raw.iter().map(|s| item(s)).collect()
}

/// A `[x, y, z]` at x 0..200, B `[p, q]` at x 300..500; 600 tall, cards 50.
fn two_lanes(tuning: DragTuning) -> (Board, StaticLayout) {
    let mut board = Board::new(tuning);
    let mut layout = StaticLayout::new();
    for (lane, x, cards) in [
        ("A", 0.0, ["x", "y", "z"].as_slice()),
        ("B", 300.0, ["p", "q"].as_slice()),
    ] {
        layout.insert_lane(
            lane_id(lane),
            Rect::new(x, 0.0, 200.0, 600.0),
            Orientation::Vertical,
            0.0,
            0.0,
        );
        for card in cards {
            layout.push_item(&lane_id(lane), item(card), 50.0, None);
        }
        board.add_lane(
            LaneConfig::new(lane_id(lane), GroupName::default()),
            ids(cards),
        );
    }
    (board, layout)
}

/// One lane of twenty 50px cards (`c0..c19`) in a 600px viewport.
fn tall_lane() -> (Board, StaticLayout) {
    let mut board = Board::default();
    let mut layout = StaticLayout::new();
    layout.insert_lane(
        lane_id("A"),
        Rect::new(0.0, 0.0, 200.0, 600.0),
        Orientation::Vertical,
        0.0,
        0.0,
    );
    let cards: Vec<ItemId> = (0..20).map(|i| item(&format!("c{i}"))).collect();
    for card in &cards {
        layout.push_item(&lane_id("A"), card.clone(), 50.0, None);
    }
    board.add_lane(LaneConfig::new(lane_id("A"), GroupName::default()), cards);
    (board, layout)
}

/// Press `y` at (100, 75), 25px below its top edge.
fn press_y(board: &mut Board, layout: &StaticLayout) {
    assert!(board.pointer_down(Point::new(100.0, 75.0), &item("y"), &lane_id("A"), layout));
}

fn order(board: &Board, lane: &str) -> Vec<ItemId> {
    board
        .lane(&lane_id(lane))
        .map(|l| l.order().to_vec())
        .unwrap_or_default()
}

fn items(board: &Board, lane: &str) -> Vec<ItemId> {
    board
        .lane(&lane_id(lane))
        .map(|l| l.items().to_vec())
        .unwrap_or_default()
}

fn assert_torn_down(board: &Board) {
    assert!(!board.drag().is_active(), "drag still active");
    assert!(board.ghost().is_none(), "ghost still present");
    assert_eq!(board.pending_timers(), 0, "timers still pending");
    assert!(!board.listeners_attached(), "listeners still attached");
    for lane in board.lanes() {
        assert_eq!(lane.reserved_padding(), 0.0, "{} reserves padding", lane.id());
        assert_eq!(lane.autoscroll(), ScrollAmount::Idle);
        assert_eq!(lane.order(), lane.items());
    }
}

// ===== Lifecycle Tests =====

#[test]
fn drag_into_other_lane_commits_at_drop_index() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);

    board.pointer_move(Point::new(105.0, 75.0), &layout);
    assert!(!board.drag().is_active(), "5px is below the threshold");

    board.pointer_move(Point::new(400.0, 225.0), &layout);
    assert_eq!(
        board.drag().active().and_then(|d| d.to.clone()),
        Some(lane_id("B"))
    );
    assert_eq!(order(&board, "A"), ids(&["x", "z"]));
    assert_eq!(order(&board, "B"), ids(&["p", "q", "y"]));

    board.pointer_move(Point::new(400.0, 85.0), &layout);
    assert_eq!(order(&board, "B"), ids(&["p", "y", "q"]));
    assert_eq!(
        board.ghost().map(|g| g.position),
        Some(Point::new(300.0, 60.0))
    );

    let commit = board.pointer_up().expect("drop commits");
    assert_eq!(
        commit,
        CommitEvent {
            id: item("y"),
            from: lane_id("A"),
            to: lane_id("B"),
            index: 1,
        }
    );
    assert_torn_down(&board);

    assert!(board.apply_commit(&commit));
    assert_eq!(items(&board, "A"), ids(&["x", "z"]));
    assert_eq!(items(&board, "B"), ids(&["p", "y", "q"]));

    let events = board.take_events();
    assert_eq!(
        events,
        vec![
            DragEvent::Started {
                id: item("y"),
                from: lane_id("A"),
            },
            DragEvent::Committed(commit),
        ]
    );
}

#[test]
fn second_press_is_rejected() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    assert!(!board.pointer_down(Point::new(350.0, 25.0), &item("p"), &lane_id("B"), &layout));

    board.pointer_move(Point::new(100.0, 200.0), &layout);
    assert!(board.drag().is_active());
    assert!(!board.touch_start(Point::new(350.0, 25.0), &item("p"), &lane_id("B"), &layout));
    assert_eq!(board.drag().active().map(|d| d.item.clone()), Some(item("y")));
}

#[test]
fn movement_within_threshold_never_starts_a_drag() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    board.pointer_move(Point::new(106.0, 75.0), &layout);
    board.pointer_move(Point::new(100.0, 81.0), &layout);
    assert!(!board.drag().is_active());
    assert!(board.ghost().is_none());
    assert_eq!(order(&board, "A"), ids(&["x", "y", "z"]));

    assert_eq!(board.pointer_up(), None);
    assert!(board.take_events().is_empty());
    assert_torn_down(&board);
}

#[test]
fn press_rules_out_disabled_lanes_and_strangers() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    assert!(!board.pointer_down(Point::new(100.0, 75.0), &item("p"), &lane_id("A"), &layout));
    assert!(!board.pointer_down(Point::new(100.0, 75.0), &item("y"), &lane_id("C"), &layout));

    let mut locked = Board::default();
    locked.add_lane(
        LaneConfig {
            disabled: true,
            ..LaneConfig::new(lane_id("A"), GroupName::default())
        },
        ids(&["x", "y", "z"]),
    );
    assert!(!locked.pointer_down(Point::new(100.0, 75.0), &item("y"), &lane_id("A"), &layout));
    assert!(!locked.listeners_attached());
}

#[test]
fn cancel_restores_every_lane() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    board.pointer_move(Point::new(400.0, 225.0), &layout);
    assert_eq!(
        board.lane(&lane_id("B")).map(|l| l.reserved_padding()),
        Some(50.0)
    );

    board.cancel();
    assert_torn_down(&board);
    assert_eq!(order(&board, "A"), ids(&["x", "y", "z"]));
    assert_eq!(order(&board, "B"), ids(&["p", "q"]));
    assert_eq!(
        board.take_events().last(),
        Some(&DragEvent::Cancelled {
            id: item("y"),
            from: lane_id("A"),
        })
    );
}

#[test]
fn drop_over_empty_space_cancels() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    // Center x = 120 + 100 = 220, between the lanes.
    board.pointer_move(Point::new(220.0, 200.0), &layout);
    assert_eq!(board.drag().active().and_then(|d| d.to.clone()), None);

    assert_eq!(board.pointer_up(), None);
    assert_torn_down(&board);
    assert_eq!(order(&board, "A"), ids(&["x", "y", "z"]));
}

#[test]
fn drop_at_original_position_does_not_commit() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    // Top moves 50 -> 60; target 85 stays above z.
    board.pointer_move(Point::new(100.0, 85.0), &layout);
    assert!(board.drag().is_active());
    assert_eq!(order(&board, "A"), ids(&["x", "y", "z"]));

    assert_eq!(board.pointer_up(), None);
    assert!(matches!(
        board.take_events().last(),
        Some(DragEvent::Cancelled { .. })
    ));
    assert_torn_down(&board);
}

#[test]
fn reorder_within_lane_commits() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    // Top 50 -> 80: target 105 passes z.
    board.pointer_move(Point::new(100.0, 105.0), &layout);
    assert_eq!(order(&board, "A"), ids(&["x", "z", "y"]));

    let commit = board.pointer_up().expect("moved within lane");
    assert_eq!((commit.from.as_str(), commit.to.as_str(), commit.index), ("A", "A", 2));
    assert!(board.apply_commit(&commit));
    assert_eq!(items(&board, "A"), ids(&["x", "z", "y"]));
}

// ===== Long Press Tests =====

#[test]
fn long_press_starts_drag_with_haptic_pulse() {
    let (mut board, mut layout) = two_lanes(DragTuning::default());
    assert!(board.touch_start(Point::new(100.0, 75.0), &item("y"), &lane_id("A"), &layout));
    assert!(board.is_scheduled(&TimerKind::LongPress));

    board.advance(Duration::from_millis(499), &mut layout);
    assert!(!board.drag().is_active());

    board.advance(Duration::from_millis(1), &mut layout);
    assert!(board.drag().is_active());
    assert!(board.ghost().is_some());
    assert_eq!(
        board.take_events(),
        vec![
            DragEvent::Started {
                id: item("y"),
                from: lane_id("A"),
            },
            DragEvent::HapticPulse,
        ]
    );
}

#[test]
fn long_press_without_haptics_is_silent() {
    let tuning = DragTuning {
        haptics: false,
        ..DragTuning::default()
    };
    let (mut board, mut layout) = two_lanes(tuning);
    board.touch_start(Point::new(100.0, 75.0), &item("y"), &lane_id("A"), &layout);
    board.advance(Duration::from_millis(500), &mut layout);
    assert!(board.drag().is_active());
    assert!(!board.take_events().contains(&DragEvent::HapticPulse));
}

#[test]
fn releasing_before_long_press_cancels_it() {
    let (mut board, mut layout) = two_lanes(DragTuning::default());
    board.touch_start(Point::new(100.0, 75.0), &item("y"), &lane_id("A"), &layout);
    board.advance(Duration::from_millis(200), &mut layout);
    assert_eq!(board.touch_end(), None);
    assert_torn_down(&board);

    board.advance(Duration::from_millis(1000), &mut layout);
    assert!(!board.drag().is_active());
    assert!(board.take_events().is_empty());
}

#[test]
fn touch_scrolling_away_abandons_long_press() {
    let (mut board, mut layout) = two_lanes(DragTuning::default());
    board.touch_start(Point::new(100.0, 75.0), &item("y"), &lane_id("A"), &layout);
    board.touch_move(Point::new(100.0, 140.0), &layout);
    assert_torn_down(&board);

    board.advance(Duration::from_millis(600), &mut layout);
    assert!(!board.drag().is_active());
}

#[test]
fn long_press_confirms_at_latest_touch_point() {
    let (mut board, mut layout) = two_lanes(DragTuning::default());
    board.touch_start(Point::new(100.0, 75.0), &item("y"), &lane_id("A"), &layout);
    board.touch_move(Point::new(103.0, 79.0), &layout);
    board.advance(Duration::from_millis(500), &mut layout);
    assert_eq!(
        board.drag().active().map(|d| d.position),
        Some(Point::new(3.0, 54.0))
    );
}

// ===== Auto-Scroll Tests =====

#[test]
fn pinned_drag_scrolls_until_the_end_then_stops() {
    let (mut board, mut layout) = tall_lane();
    assert!(board.pointer_down(Point::new(100.0, 75.0), &item("c1"), &lane_id("A"), &layout));
    // Top at 570: center 595 is within 25px of the bottom edge.
    board.pointer_move(Point::new(100.0, 595.0), &layout);
    assert_eq!(
        board.lane(&lane_id("A")).map(|l| l.autoscroll()),
        Some(ScrollAmount::Forward)
    );
    assert!(board.is_scheduled(&TimerKind::AutoScroll(lane_id("A"))));

    board.advance(Duration::from_millis(70), &mut layout);
    assert_eq!(
        layout.lane_metrics(&lane_id("A")).map(|m| m.scroll_offset),
        Some(40.0)
    );

    // Content 1000 - client 600 = 400 = 100 ticks of 4px.
    board.advance(Duration::from_millis(1000), &mut layout);
    assert_eq!(
        layout.lane_metrics(&lane_id("A")).map(|m| m.scroll_offset),
        Some(400.0)
    );
    assert_eq!(board.pending_timers(), 0);
    assert_eq!(
        board.lane(&lane_id("A")).map(|l| l.autoscroll()),
        Some(ScrollAmount::Idle)
    );
    assert_eq!(order(&board, "A").last(), Some(&item("c1")));
}

#[test]
fn fully_scrolled_lane_never_schedules_a_tick() {
    let (mut board, mut layout) = tall_lane();
    crate::layout::ScrollHost::set_scroll_offset(&mut layout, &lane_id("A"), 400.0);
    // c1 renders at 50 - 400 = -350, so press it where it is.
    assert!(board.pointer_down(Point::new(100.0, -325.0), &item("c1"), &lane_id("A"), &layout));
    board.pointer_move(Point::new(100.0, 595.0), &layout);
    assert!(board.drag().is_active());
    assert_eq!(
        board.lane(&lane_id("A")).map(|l| l.autoscroll()),
        Some(ScrollAmount::Idle)
    );
    assert_eq!(board.pending_timers(), 0);
}

#[test]
fn moving_away_from_the_edge_stops_auto_scroll() {
    let (mut board, mut layout) = tall_lane();
    board.pointer_down(Point::new(100.0, 75.0), &item("c1"), &lane_id("A"), &layout);
    board.pointer_move(Point::new(100.0, 595.0), &layout);
    board.advance(Duration::from_millis(21), &mut layout);

    board.pointer_move(Point::new(100.0, 300.0), &layout);
    assert_eq!(board.pending_timers(), 0);
    board.advance(Duration::from_millis(100), &mut layout);
    assert_eq!(
        layout.lane_metrics(&lane_id("A")).map(|m| m.scroll_offset),
        Some(12.0)
    );
}

// ===== Implicit Cancellation Tests =====

#[test]
fn removing_origin_lane_cancels_the_drag() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    board.pointer_move(Point::new(400.0, 225.0), &layout);
    assert!(board.remove_lane(&lane_id("A")));
    assert_torn_down(&board);
    assert_eq!(board.lanes().len(), 1);
    assert_eq!(order(&board, "B"), ids(&["p", "q"]));
}

#[test]
fn removing_claiming_lane_releases_the_claim() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    board.pointer_move(Point::new(400.0, 225.0), &layout);
    assert!(board.remove_lane(&lane_id("B")));
    assert!(board.drag().is_active());
    assert_eq!(board.drag().active().and_then(|d| d.to.clone()), None);
    assert_eq!(board.pointer_up(), None);
    assert_torn_down(&board);
}

#[test]
fn removing_dragged_item_cancels_the_drag() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    board.pointer_move(Point::new(100.0, 200.0), &layout);
    assert!(board.remove_item(&lane_id("A"), &item("y"), &layout));
    assert_torn_down(&board);
    assert_eq!(items(&board, "A"), ids(&["x", "z"]));
}

#[test]
fn removing_a_sibling_from_the_claiming_lane_keeps_the_drop() {
    let (mut board, mut layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    board.pointer_move(Point::new(400.0, 225.0), &layout);
    board.pointer_move(Point::new(400.0, 85.0), &layout);
    assert_eq!(order(&board, "B"), ids(&["p", "y", "q"]));

    assert!(layout.remove_item(&item("q")));
    assert!(board.remove_item(&lane_id("B"), &item("q"), &layout));
    assert!(board.drag().is_active());
    assert_eq!(order(&board, "B"), ids(&["p", "y"]));
    assert_eq!(
        board.lane(&lane_id("B")).map(|l| l.reserved_padding()),
        Some(50.0)
    );

    let commit = board.pointer_up().expect("drop still commits");
    assert_eq!(
        (commit.from.as_str(), commit.to.as_str(), commit.index),
        ("A", "B", 1)
    );
    assert_torn_down(&board);
    assert!(board.apply_commit(&commit));
    assert_eq!(items(&board, "B"), ids(&["p", "y"]));
}

#[test]
fn removing_a_sibling_from_the_origin_lane_keeps_the_reorder() {
    let (mut board, mut layout) = two_lanes(DragTuning::default());
    press_y(&mut board, &layout);
    board.pointer_move(Point::new(100.0, 105.0), &layout);
    assert_eq!(order(&board, "A"), ids(&["x", "z", "y"]));

    assert!(layout.remove_item(&item("x")));
    assert!(board.remove_item(&lane_id("A"), &item("x"), &layout));
    assert_eq!(order(&board, "A"), ids(&["z", "y"]));
    assert!(board.ghost().is_some());
    let styles = board
        .lane(&lane_id("A"))
        .map(|l| l.item_styles())
        .unwrap_or_default();
    let y = styles.iter().find(|s| s.id == item("y")).expect("y styled");
    assert!(y.hidden, "dragged item stays hidden in flow");
    assert_eq!(y.translate, 50.0);

    let commit = board.pointer_up().expect("moved below z");
    assert_eq!(
        (commit.from.as_str(), commit.to.as_str(), commit.index),
        ("A", "A", 1)
    );
    assert!(board.apply_commit(&commit));
    assert_eq!(items(&board, "A"), ids(&["z", "y"]));
}

#[test]
fn teardown_releases_everything() {
    let (mut board, layout) = two_lanes(DragTuning::default());
    board.touch_start(Point::new(100.0, 75.0), &item("y"), &lane_id("A"), &layout);
    board.teardown();
    assert_torn_down(&board);
    assert!(board.lanes().is_empty());
}

// ===== Order Store Tests =====

#[test]
fn apply_commit_rejects_unknown_lanes_and_items() {
    let (mut board, _) = two_lanes(DragTuning::default());
    let bogus = CommitEvent {
        id: item("p"),
        from: lane_id("A"),
        to: lane_id("B"),
        index: 0,
    };
    assert!(!board.apply_commit(&bogus));
    let missing = CommitEvent {
        to: lane_id("C"),
        ..bogus
    };
    assert!(!board.apply_commit(&missing));
    assert_eq!(items(&board, "A"), ids(&["x", "y", "z"]));
}
