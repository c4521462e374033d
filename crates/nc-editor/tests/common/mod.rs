//! Shared fixtures for nc-editor integration tests.

#![allow(dead_code)]

use nc_core::{EntityId, ImageSource, Point};
use nc_editor::CanvasSession;
use nc_editor::input::Modifiers;
use nc_editor::services::DecodedImage;

/// A 1:1 image; placed at the default width it is 250×250.
pub fn square(tag: &str) -> DecodedImage {
    DecodedImage {
        source: ImageSource::new(format!("data:image/png;base64,{tag}")),
        width: 64,
        height: 64,
    }
}

/// Place a square image centred on (cx, cy).
pub fn place_at(session: &mut CanvasSession, tag: &str, cx: f32, cy: f32) -> EntityId {
    session
        .place_image(&square(tag), Some(Point::new(cx, cy)))
        .expect("square images always place")
}

/// Press and release at (x, y) on pointer 1 without moving.
pub fn click(session: &mut CanvasSession, x: f32, y: f32, modifiers: Modifiers) {
    session.handle_pointer_down(1, x, y, modifiers);
    session.handle_pointer_up(1, x, y);
}

/// Press at `from`, move through `path`, release at the last point.
pub fn drag(session: &mut CanvasSession, from: (f32, f32), path: &[(f32, f32)]) {
    session.handle_pointer_down(1, from.0, from.1, Modifiers::NONE);
    for &(x, y) in path {
        session.handle_pointer_move(1, x, y);
    }
    let end = path.last().copied().unwrap_or(from);
    session.handle_pointer_up(1, end.0, end.1);
}

pub fn position(session: &CanvasSession, id: EntityId) -> Point {
    session.scene().get(id).expect("image in scene").position()
}
