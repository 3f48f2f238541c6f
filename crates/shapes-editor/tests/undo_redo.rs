//! Integration tests: undo/redo through the editor session.
//!
//! Each discrete edit is one history entry; undo and redo walk those
//! entries and hand back independent copies.

use shapes_core::id::ShapeId;
use shapes_core::model::*;
use shapes_editor::{EditorConfig, EditorSession, Modifiers, ShortcutAction};

fn make_session() -> EditorSession {
    let mut rect = Shape::create_default(ShapeKind::Rectangle, 10.0, 10.0);
    rect.id = ShapeId::intern("box");
    EditorSession::new(vec![rect], EditorConfig::default())
}

fn box_id() -> ShapeId {
    ShapeId::intern("box")
}

// ─── Basic undo/redo ────────────────────────────────────────────────────

#[test]
fn undo_restores_previous_state() {
    let mut session = make_session();
    assert!(session.resize(box_id(), 200.0, 100.0));

    let shape = session.shape(box_id()).unwrap();
    assert_eq!((shape.width, shape.height), (200.0, 100.0));

    assert!(session.undo());
    let shape = session.shape(box_id()).unwrap();
    assert_eq!(shape.width, 80.0, "width not restored after undo");
    assert_eq!(shape.height, 50.0, "height not restored after undo");
}

#[test]
fn redo_reapplies_undone_action() {
    let mut session = make_session();
    session.update_property(box_id(), ShapeProperty::Rotation(45.0));
    session.undo();
    assert!(session.redo());
    assert_eq!(session.shape(box_id()).unwrap().rotation, 45.0);
}

#[test]
fn undo_n_edits_walks_back_one_at_a_time() {
    let mut session = make_session();
    let mut states = vec![session.snapshot()];
    for opacity in [90.0, 70.0, 50.0, 30.0] {
        assert!(session.update_property(box_id(), ShapeProperty::Opacity(opacity)));
        states.push(session.snapshot());
    }

    for expected in states.iter().rev().skip(1) {
        assert!(session.undo());
        assert_eq!(&session.snapshot(), expected);
    }
    assert!(!session.undo());
}

#[test]
fn redo_after_undo_restores_pre_undo_state() {
    let mut session = make_session();
    session.move_to(box_id(), 300.0, 200.0);
    session.update_property(box_id(), ShapeProperty::FlipX(true));
    let before_undo = session.snapshot();

    session.undo();
    session.redo();
    assert_eq!(session.snapshot(), before_undo);
}

#[test]
fn new_edit_discards_redo_branch() {
    let mut session = make_session();
    session.update_property(box_id(), ShapeProperty::Color("#111111".into()));
    session.undo();
    assert!(session.can_redo());

    session.update_property(box_id(), ShapeProperty::Color("#222222".into()));
    let after_edit = session.snapshot();
    assert!(!session.can_redo());
    assert!(!session.redo());
    assert_eq!(session.snapshot(), after_edit);
}

#[test]
fn undo_on_fresh_session_is_noop() {
    let mut session = make_session();
    let before = session.snapshot();
    assert!(!session.undo());
    assert!(!session.redo());
    assert_eq!(session.snapshot(), before);
}

// ─── Selection and history ──────────────────────────────────────────────

#[test]
fn undo_clears_selection() {
    let mut session = make_session();
    let id = session.add_shape(ShapeKind::Ellipse).unwrap();
    assert_eq!(session.selected_id(), Some(id));
    session.undo();
    assert_eq!(session.selected_id(), None);
    assert!(session.shape(id).is_none());
}

#[test]
fn delete_clears_selection_and_undoes() {
    let mut session = make_session();
    session.select(Some(box_id()));
    assert!(session.delete_selected());
    assert_eq!(session.selected_id(), None);
    assert!(session.shapes().is_empty());
    assert!(!session.delete_selected(), "second delete has nothing to remove");

    session.undo();
    assert!(session.shape(box_id()).is_some());
}

#[test]
fn snapshots_are_not_aliased() {
    let mut session = make_session();
    session.move_to(box_id(), 50.0, 50.0);
    let mut taken = session.snapshot();
    taken[0].x = 999.0;

    session.undo();
    session.redo();
    assert_eq!(session.shape(box_id()).unwrap().x, 50.0);
}

// ─── Keyboard ───────────────────────────────────────────────────────────

#[test]
fn keyboard_undo_redo() {
    let mut session = make_session();
    session.move_to(box_id(), 100.0, 100.0);
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    let ctrl_shift = Modifiers {
        ctrl: true,
        shift: true,
        ..Modifiers::NONE
    };

    assert_eq!(
        session.handle_key("z", ctrl, false),
        Some(ShortcutAction::Undo)
    );
    assert_eq!(session.shape(box_id()).unwrap().x, 10.0);

    assert_eq!(
        session.handle_key("Z", ctrl_shift, false),
        Some(ShortcutAction::Redo)
    );
    assert_eq!(session.shape(box_id()).unwrap().x, 100.0);

    // a focused text field keeps its own undo
    assert_eq!(session.handle_key("z", ctrl, true), None);
    assert_eq!(session.shape(box_id()).unwrap().x, 100.0);
}

#[test]
fn capped_history_forgets_oldest() {
    let config = EditorConfig {
        history_limit: Some(3),
        ..EditorConfig::default()
    };
    let mut session = EditorSession::new(Vec::new(), config);
    for _ in 0..5 {
        session.add_shape(ShapeKind::Square);
    }
    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(session.shapes().len(), 3);
}
