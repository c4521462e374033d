//! Hit testing: point → entity or affordance lookup.
//!
//! Walks the scene front-to-back (highest `z_index` first) so the topmost
//! image under the pointer wins. Affordances belong to their image's layer:
//! a selected image's handles are only reachable where no higher image
//! covers them.
//!
//! Affordances are drawn only on selected images:
//! - the delete handle sits on the top-right corner of each selected image;
//! - the resize handle sits on the bottom-right corner, and only while
//!   exactly one image is selected.

use kurbo::{Circle, Point, Rect, Shape};
use nc_core::id::EntityId;
use nc_core::model::{PlacedImage, Scene};

/// Radius of the resize handle, centred on the bottom-right corner.
pub const RESIZE_HANDLE_RADIUS: f64 = 12.0;

/// Radius of the delete handle, centred on the top-right corner.
pub const DELETE_HANDLE_RADIUS: f64 = 14.0;

/// What lies under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The image itself (select / drag).
    Body(EntityId),
    /// The resize affordance of the sole selected image.
    ResizeHandle(EntityId),
    /// The delete affordance of a selected image.
    DeleteHandle(EntityId),
    /// Empty canvas.
    Canvas,
}

impl Hit {
    pub fn entity(self) -> Option<EntityId> {
        match self {
            Hit::Body(id) | Hit::ResizeHandle(id) | Hit::DeleteHandle(id) => Some(id),
            Hit::Canvas => None,
        }
    }
}

/// Find what is at canvas position (px, py) given the current selection.
pub fn hit_test(scene: &Scene, selected: &[EntityId], px: f32, py: f32) -> Hit {
    let pt = Point::new(px as f64, py as f64);
    let single = selected.len() == 1;

    for img in scene.paint_order().into_iter().rev() {
        if selected.contains(&img.id) {
            if delete_handle(img).contains(pt) {
                return Hit::DeleteHandle(img.id);
            }
            if single && resize_handle(img).contains(pt) {
                return Hit::ResizeHandle(img.id);
            }
        }
        if bounds(img).contains(pt) {
            return Hit::Body(img.id);
        }
    }

    log::trace!("HIT canvas at ({px}, {py})");
    Hit::Canvas
}

/// Image rectangle in canvas coordinates.
pub fn bounds(img: &PlacedImage) -> Rect {
    Rect::new(
        img.x as f64,
        img.y as f64,
        (img.x + img.width) as f64,
        (img.y + img.height) as f64,
    )
}

pub fn resize_handle(img: &PlacedImage) -> Circle {
    let b = bounds(img);
    Circle::new((b.x1, b.y1), RESIZE_HANDLE_RADIUS)
}

pub fn delete_handle(img: &PlacedImage) -> Circle {
    let b = bounds(img);
    Circle::new((b.x1, b.y0), DELETE_HANDLE_RADIUS)
}
