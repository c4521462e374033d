//! Integration tests: pointer and keyboard interaction on a canvas session.
//!
//! Images are 250×250 squares; a square centred on (150, 150) covers
//! (25, 25)..(275, 275), with its delete handle at the top-right corner and
//! its resize handle at the bottom-right corner.

mod common;

use common::*;
use nc_core::{EntityId, Point, Size};
use nc_editor::CanvasSession;
use nc_editor::input::{KeyEvent, Modifiers};
use nc_editor::interaction::GestureKind;
use nc_editor::shortcuts::ShortcutAction;
use nc_render::Hit;
use pretty_assertions::assert_eq;

const CENTERS: [(f32, f32); 5] = [
    (150.0, 150.0),
    (450.0, 150.0),
    (150.0, 450.0),
    (450.0, 450.0),
    (650.0, 650.0),
];

fn session_with(n: usize) -> (CanvasSession, Vec<EntityId>) {
    let mut session = CanvasSession::default();
    let ids = CENTERS[..n]
        .iter()
        .enumerate()
        .map(|(i, &(cx, cy))| place_at(&mut session, &format!("img{i}"), cx, cy))
        .collect();
    (session, ids)
}

fn selected(session: &CanvasSession) -> Vec<EntityId> {
    session.selection().iter().collect()
}

// ─── Selection ──────────────────────────────────────────────────────────

#[test]
fn shift_click_toggles_membership() {
    let (mut session, ids) = session_with(2);
    let (a, b) = (ids[0], ids[1]);

    click(&mut session, 150.0, 150.0, Modifiers::NONE);
    click(&mut session, 450.0, 150.0, Modifiers::SHIFT);
    assert_eq!(selected(&session), vec![a, b]);

    click(&mut session, 150.0, 150.0, Modifiers::SHIFT);
    assert_eq!(selected(&session), vec![b]);
}

#[test]
fn plain_click_on_unselected_replaces_selection() {
    let (mut session, ids) = session_with(3);
    click(&mut session, 150.0, 150.0, Modifiers::NONE);
    click(&mut session, 450.0, 150.0, Modifiers::SHIFT);

    click(&mut session, 150.0, 450.0, Modifiers::NONE);
    assert_eq!(selected(&session), vec![ids[2]]);
}

#[test]
fn click_on_empty_canvas_clears_selection_without_commit() {
    let (mut session, _) = session_with(1);
    click(&mut session, 150.0, 150.0, Modifiers::NONE);
    let len = session.history().len();

    click(&mut session, 700.0, 100.0, Modifiers::NONE);
    assert!(session.selection().is_empty());
    assert_eq!(session.history().len(), len);
}

// ─── Stacking ───────────────────────────────────────────────────────────

#[test]
fn every_press_raises_even_when_already_on_top() {
    let (mut session, ids) = session_with(1);
    let a = ids[0];
    let z = |s: &CanvasSession| s.scene().get(a).map(|img| img.z_index);

    let mut last = z(&session);
    for _ in 0..3 {
        let len = session.history().len();
        click(&mut session, 150.0, 150.0, Modifiers::NONE);
        assert!(z(&session) > last);
        assert_eq!(session.history().len(), len + 1, "raise is its own step");
        last = z(&session);
    }
}

#[test]
fn pressed_image_is_painted_last() {
    let mut session = CanvasSession::default();
    let under = place_at(&mut session, "under", 200.0, 200.0);
    let over = place_at(&mut session, "over", 260.0, 260.0);
    assert_eq!(session.hit_test(230.0, 230.0), Hit::Body(over));

    // (100, 100) only touches the lower image.
    click(&mut session, 100.0, 100.0, Modifiers::NONE);
    let order: Vec<_> = session.paint_order().iter().map(|img| img.id).collect();
    assert_eq!(order, vec![over, under]);
    assert_eq!(session.hit_test(230.0, 230.0), Hit::Body(under));
}

// ─── Dragging ───────────────────────────────────────────────────────────

#[test]
fn group_drag_result_ignores_move_granularity() {
    fn run(path: &[(f32, f32)]) -> Vec<Point> {
        let (mut session, _) = session_with(3);
        click(&mut session, 150.0, 150.0, Modifiers::NONE);
        click(&mut session, 450.0, 150.0, Modifiers::SHIFT);
        drag(&mut session, (150.0, 150.0), path);
        session.scene().iter().map(|img| img.position()).collect()
    }

    let stepped = run(&[(160.0, 140.0), (120.0, 190.0), (170.0, 180.0)]);
    let direct = run(&[(170.0, 180.0)]);
    assert_eq!(stepped, direct);
    assert_eq!(
        direct,
        vec![
            Point::new(45.0, 55.0),
            Point::new(345.0, 55.0),
            Point::new(25.0, 325.0),
        ]
    );
}

#[test]
fn drag_commits_once_on_release() {
    let (mut session, ids) = session_with(1);
    session.handle_pointer_down(1, 150.0, 150.0, Modifiers::NONE);
    let len = session.history().len();

    for step in 1..=5 {
        session.handle_pointer_move(1, 150.0 + step as f32 * 10.0, 150.0);
    }
    assert_eq!(session.history().len(), len);
    assert_ne!(session.history().current(), session.scene());

    session.handle_pointer_up(1, 200.0, 150.0);
    assert_eq!(session.history().len(), len + 1);
    assert_eq!(position(&session, ids[0]), Point::new(75.0, 25.0));
    assert_eq!(session.history().current(), session.scene());
}

#[test]
fn cancel_commits_like_release() {
    let (mut session, ids) = session_with(1);
    session.handle_pointer_down(1, 150.0, 150.0, Modifiers::NONE);
    session.handle_pointer_move(1, 180.0, 190.0);
    let len = session.history().len();

    assert!(session.handle_pointer_cancel(1));
    assert_eq!(session.history().len(), len + 1);
    assert_eq!(
        session.history().current().get(ids[0]).map(|img| img.position()),
        Some(Point::new(55.0, 65.0))
    );
    assert!(session.gesture(1).is_none());
}

#[test]
fn two_pointers_drag_two_images() {
    let (mut session, ids) = session_with(2);
    session.handle_pointer_down(1, 150.0, 150.0, Modifiers::NONE);
    session.handle_pointer_down(2, 450.0, 150.0, Modifiers::NONE);

    session.handle_pointer_move(1, 150.0, 200.0);
    session.handle_pointer_move(2, 470.0, 150.0);
    session.handle_pointer_up(2, 470.0, 150.0);
    session.handle_pointer_move(1, 150.0, 210.0);
    session.handle_pointer_up(1, 150.0, 210.0);

    assert_eq!(position(&session, ids[0]), Point::new(25.0, 85.0));
    assert_eq!(position(&session, ids[1]), Point::new(345.0, 25.0));
}

// ─── Resizing ───────────────────────────────────────────────────────────

#[test]
fn resize_handle_grows_single_selection() {
    let (mut session, ids) = session_with(1);
    let a = ids[0];
    click(&mut session, 150.0, 150.0, Modifiers::NONE);
    assert_eq!(session.hit_test(275.0, 275.0), Hit::ResizeHandle(a));

    session.handle_pointer_down(1, 275.0, 275.0, Modifiers::NONE);
    assert_eq!(session.gesture(1), Some(GestureKind::Resizing));
    session.handle_pointer_move(1, 325.0, 305.0);
    session.handle_pointer_up(1, 325.0, 305.0);

    let img = session.scene().get(a).map(|img| (img.position(), img.size()));
    assert_eq!(img, Some((Point::new(25.0, 25.0), Size::new(300.0, 280.0))));

    session.undo();
    assert_eq!(
        session.scene().get(a).map(|img| img.size()),
        Some(Size::new(250.0, 250.0))
    );
}

#[test]
fn resize_never_goes_below_minimum() {
    let (mut session, ids) = session_with(1);
    click(&mut session, 150.0, 150.0, Modifiers::NONE);

    session.handle_pointer_down(1, 275.0, 275.0, Modifiers::NONE);
    session.handle_pointer_move(1, 100.0, 100.0);
    assert!(!session.handle_pointer_move(1, 70.0, 100.0));
    session.handle_pointer_up(1, 70.0, 100.0);

    assert_eq!(
        session.scene().get(ids[0]).map(|img| img.size()),
        Some(Size::new(75.0, 75.0))
    );
}

// ─── Deletion ───────────────────────────────────────────────────────────

#[test]
fn delete_key_removes_selection_in_one_step() {
    let (mut session, ids) = session_with(5);
    click(&mut session, 150.0, 150.0, Modifiers::NONE);
    click(&mut session, 450.0, 150.0, Modifiers::SHIFT);
    click(&mut session, 150.0, 450.0, Modifiers::SHIFT);
    let len = session.history().len();

    let action = session.handle_key(&KeyEvent::new("Delete", Modifiers::NONE));
    assert_eq!(action, Some(ShortcutAction::Delete));
    assert_eq!(session.history().len(), len + 1);
    let left: Vec<_> = session.scene().ids().collect();
    assert_eq!(left, vec![ids[3], ids[4]]);
    assert!(session.selection().is_empty());

    session.undo();
    assert_eq!(session.scene().len(), 5);
}

#[test]
fn delete_key_is_ignored_while_typing() {
    let (mut session, _) = session_with(1);
    click(&mut session, 150.0, 150.0, Modifiers::NONE);

    let action = session.handle_key(&KeyEvent::new("Backspace", Modifiers::NONE).in_text_input());
    assert_eq!(action, None);
    assert_eq!(session.scene().len(), 1);
}

#[test]
fn delete_handle_removes_whole_selection() {
    let (mut session, ids) = session_with(3);
    click(&mut session, 150.0, 150.0, Modifiers::NONE);
    click(&mut session, 450.0, 150.0, Modifiers::SHIFT);
    assert_eq!(session.hit_test(275.0, 25.0), Hit::DeleteHandle(ids[0]));

    session.handle_pointer_down(1, 275.0, 25.0, Modifiers::NONE);
    session.handle_pointer_up(1, 275.0, 25.0);
    let left: Vec<_> = session.scene().ids().collect();
    assert_eq!(left, vec![ids[2]]);
}
