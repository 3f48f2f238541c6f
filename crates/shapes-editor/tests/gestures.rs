//! Integration tests: pointer gestures through the editor session.
//!
//! Drag and resize update the live shape on every frame but reach the
//! history log exactly once, when the gesture ends.

use shapes_core::id::ShapeId;
use shapes_core::model::*;
use shapes_editor::{EditorConfig, EditorSession, GestureState, HitTarget};

fn square_at(id: &str, x: f64, y: f64) -> Shape {
    let mut s = Shape::create_default(ShapeKind::Square, x, y);
    s.id = ShapeId::intern(id);
    s
}

fn session_with(shapes: Vec<Shape>, config: EditorConfig) -> EditorSession {
    let _ = env_logger::builder().is_test(true).try_init();
    EditorSession::new(shapes, config)
}

fn snapping() -> EditorConfig {
    EditorConfig {
        snap_to_grid: true,
        grid_size: 20,
        ..EditorConfig::default()
    }
}

// ─── Drag ───────────────────────────────────────────────────────────────

#[test]
fn drag_snaps_to_grid() {
    let id = ShapeId::intern("drag-snap");
    let mut session = session_with(vec![square_at("drag-snap", 0.0, 0.0)], snapping());

    session.pointer_down(10.0, 10.0);
    assert_eq!(session.selected_id(), Some(id));

    // raw x = 63 - 10 = 53
    session.pointer_move(63.0, 10.0);
    session.pointer_up(63.0, 10.0);

    let shape = session.shape(id).unwrap();
    assert_eq!(shape.x, 60.0);
    assert_eq!(shape.y, 0.0);
}

#[test]
fn drag_commits_exactly_once() {
    let id = ShapeId::intern("drag-once");
    let mut session = session_with(
        vec![square_at("drag-once", 100.0, 100.0)],
        EditorConfig::default(),
    );

    session.pointer_down(110.0, 110.0);
    for step in 1..=10 {
        session.pointer_move(110.0 + step as f64 * 5.0, 110.0);
    }
    assert!(!session.can_undo(), "live frames must not be recorded");
    session.pointer_up(160.0, 110.0);

    assert_eq!(session.shape(id).unwrap().x, 150.0);
    assert!(session.undo());
    assert_eq!(session.shape(id).unwrap().x, 100.0);
    assert!(!session.undo());
}

#[test]
fn release_outside_canvas_still_commits() {
    let id = ShapeId::intern("drag-outside");
    let mut session = session_with(
        vec![square_at("drag-outside", 100.0, 100.0)],
        EditorConfig::default(),
    );

    session.pointer_down(120.0, 120.0);
    session.pointer_move(2000.0, -50.0);
    session.pointer_up(2000.0, -50.0);

    assert_eq!(*session.gesture(), GestureState::Idle);
    let shape = session.shape(id).unwrap();
    assert_eq!((shape.x, shape.y), (520.0, 0.0));
    assert!(session.can_undo());
}

#[test]
fn drag_stays_within_canvas() {
    let id = ShapeId::intern("drag-bounds");
    let mut shape = square_at("drag-bounds", 0.0, 0.0);
    shape.width = 150.0;
    shape.height = 30.0;
    let mut session = session_with(vec![shape], EditorConfig::default());

    session.pointer_down(5.0, 5.0);
    for (x, y) in [(-300.0, -300.0), (900.0, 900.0), (300.0, 1000.0)] {
        session.pointer_move(x, y);
        let s = session.shape(id).unwrap();
        assert!(s.x >= 0.0 && s.x <= 600.0 - s.width, "x = {}", s.x);
        assert!(s.y >= 0.0 && s.y <= 400.0 - s.height, "y = {}", s.y);
    }
    session.pointer_up(300.0, 1000.0);
}

#[test]
fn snapped_drag_never_crosses_far_edge() {
    let id = ShapeId::intern("drag-edge");
    let config = EditorConfig {
        snap_to_grid: true,
        grid_size: 30,
        ..EditorConfig::default()
    };
    // 600 - 75 = 525 would round up to 540
    let mut shape = square_at("drag-edge", 0.0, 0.0);
    shape.width = 75.0;
    let mut session = session_with(vec![shape], config);

    session.pointer_down(1.0, 1.0);
    session.pointer_move(5000.0, 1.0);
    session.pointer_up(5000.0, 1.0);
    assert_eq!(session.shape(id).unwrap().x, 510.0);
}

// ─── Resize ─────────────────────────────────────────────────────────────

#[test]
fn resize_from_handle() {
    let id = ShapeId::intern("resize");
    let mut session = session_with(
        vec![square_at("resize", 10.0, 10.0)],
        EditorConfig::default(),
    );
    session.select(Some(id));

    // bottom-right corner is (90, 90)
    session.pointer_down(90.0, 90.0);
    assert!(matches!(session.gesture(), GestureState::Resizing { .. }));
    session.pointer_move(130.0, 60.0);
    session.pointer_up(130.0, 60.0);

    let shape = session.shape(id).unwrap();
    assert_eq!((shape.x, shape.y), (10.0, 10.0));
    assert_eq!((shape.width, shape.height), (120.0, 50.0));
    assert!(session.undo());
    assert!(!session.can_undo());
}

#[test]
fn resize_never_below_minimum() {
    let id = ShapeId::intern("resize-min");
    let mut session = session_with(vec![square_at("resize-min", 10.0, 10.0)], snapping());
    session.select(Some(id));

    session.pointer_down_on(HitTarget::ResizeHandle(id), 90.0, 90.0);
    session.pointer_move(-400.0, -400.0);
    let shape = session.shape(id).unwrap();
    assert!(shape.width >= MIN_SIZE && shape.height >= MIN_SIZE);
    session.pointer_up(-400.0, -400.0);
    assert_eq!(session.shape(id).unwrap().width, 20.0);
}

#[test]
fn resize_snaps_size() {
    let id = ShapeId::intern("resize-snap");
    let mut session = session_with(vec![square_at("resize-snap", 0.0, 0.0)], snapping());
    session.select(Some(id));

    session.pointer_down_on(HitTarget::ResizeHandle(id), 80.0, 80.0);
    session.pointer_move(93.0, 80.0);
    session.pointer_up(93.0, 80.0);
    let shape = session.shape(id).unwrap();
    assert_eq!((shape.width, shape.height), (100.0, 80.0));
}

// ─── Selection ──────────────────────────────────────────────────────────

#[test]
fn canvas_click_deselects_without_history() {
    let mut session = session_with(
        vec![square_at("deselect", 0.0, 0.0)],
        EditorConfig::default(),
    );
    session.select(Some(ShapeId::intern("deselect")));
    session.pointer_down(500.0, 300.0);
    session.pointer_up(500.0, 300.0);
    assert_eq!(session.selected_id(), None);
    assert!(!session.can_undo());
}

#[test]
fn selection_is_exclusive() {
    let mut session = session_with(
        vec![
            square_at("sel-a", 0.0, 0.0),
            square_at("sel-b", 200.0, 200.0),
        ],
        EditorConfig::default(),
    );
    session.pointer_down(10.0, 10.0);
    session.pointer_up(10.0, 10.0);
    assert_eq!(session.selected_id(), Some(ShapeId::intern("sel-a")));
    session.pointer_down(210.0, 210.0);
    session.pointer_up(210.0, 210.0);
    assert_eq!(session.selected_id(), Some(ShapeId::intern("sel-b")));
}

#[test]
fn structural_edit_mid_gesture_commits_first() {
    let id = ShapeId::intern("mid-gesture");
    let mut session = session_with(
        vec![square_at("mid-gesture", 0.0, 0.0)],
        EditorConfig::default(),
    );
    session.pointer_down(10.0, 10.0);
    session.pointer_move(110.0, 10.0);
    // delete arrives before the pointer-up
    assert!(session.delete_selected());
    assert_eq!(*session.gesture(), GestureState::Idle);

    assert!(session.undo());
    assert_eq!(session.shape(id).unwrap().x, 100.0);
    assert!(session.undo());
    assert_eq!(session.shape(id).unwrap().x, 0.0);
}

#[test]
fn live_frames_bump_revision() {
    let mut session = session_with(
        vec![square_at("revision", 0.0, 0.0)],
        EditorConfig::default(),
    );
    let start = session.revision();
    session.pointer_down(10.0, 10.0);
    session.pointer_move(20.0, 10.0);
    let mid = session.revision();
    assert!(mid > start);
    session.pointer_move(30.0, 10.0);
    assert!(session.revision() > mid);
}
