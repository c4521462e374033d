//! Scene model for a collage.
//!
//! A [`Scene`] is a flat, insertion-ordered list of [`PlacedImage`]s. Paint
//! order is decided by `z_index`, not by position in the list. Entities are
//! values: every move, resize or raise produces a new entity (and a new
//! scene) rather than mutating one in place, so any scene can be kept as a
//! history snapshot and compared structurally with `==`.

use crate::id::EntityId;
use crate::source::ImageSource;
use serde::{Deserialize, Serialize};

/// Width given to a freshly placed image; height follows its aspect ratio.
pub const DEFAULT_WIDTH: f32 = 250.0;

/// Smallest width or height a resize may produce.
pub const MIN_SIZE: f32 = 50.0;

// ─── Geometry ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset from `origin` to `self`.
    pub fn delta_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn offset(self, delta: Point) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn grown_by(self, delta: Point) -> Size {
        Size::new(self.width + delta.x, self.height + delta.y)
    }

    /// Whether both dimensions satisfy the `min` threshold.
    pub fn fits_min(self, min: f32) -> bool {
        self.width >= min && self.height >= min
    }
}

// ─── Placed image ────────────────────────────────────────────────────────

/// One image on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedImage {
    pub id: EntityId,
    pub source: ImageSource,
    /// Top-left corner in canvas-local units. May lie outside the canvas.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Higher paints on top. Not required to be unique.
    pub z_index: u64,
}

impl PlacedImage {
    /// Place an image `width` units wide, centred on `center`, with its
    /// height derived from `aspect_ratio` (natural width / natural height).
    ///
    /// Returns `None` for a zero, negative or non-finite aspect ratio.
    pub fn centered(
        id: EntityId,
        source: ImageSource,
        center: Point,
        aspect_ratio: f32,
        width: f32,
        z_index: u64,
    ) -> Option<Self> {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            log::debug!("{id:?} rejected: aspect ratio {aspect_ratio}");
            return None;
        }
        let height = width / aspect_ratio;
        Some(Self {
            id,
            source,
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
            z_index,
        })
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn moved_to(&self, position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self.clone()
        }
    }

    /// Copy with a new size, or `None` when either dimension is below `min`.
    pub fn resized(&self, size: Size, min: f32) -> Option<Self> {
        if !size.fits_min(min) {
            return None;
        }
        Some(Self {
            width: size.width,
            height: size.height,
            ..self.clone()
        })
    }

    pub fn raised(&self, z_index: u64) -> Self {
        Self {
            z_index,
            ..self.clone()
        }
    }
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// The complete set of placed images at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    images: Vec<PlacedImage>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedImage> {
        self.images.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.images.iter().map(|img| img.id)
    }

    pub fn get(&self, id: EntityId) -> Option<&PlacedImage> {
        self.images.iter().find(|img| img.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// New scene with `image` appended.
    pub fn with_added(&self, image: PlacedImage) -> Scene {
        let mut images = self.images.clone();
        images.push(image);
        Scene { images }
    }

    /// New scene where the entity `id` is replaced by `f(entity)`.
    /// Unknown IDs leave the scene unchanged.
    pub fn with_updated(&self, id: EntityId, f: impl FnOnce(&PlacedImage) -> PlacedImage) -> Scene {
        let mut images = self.images.clone();
        if let Some(slot) = images.iter_mut().find(|img| img.id == id) {
            *slot = f(slot);
        }
        Scene { images }
    }

    /// New scene where every entity accepted by `f` is replaced.
    pub fn with_each(&self, mut f: impl FnMut(&PlacedImage) -> Option<PlacedImage>) -> Scene {
        let images = self
            .images
            .iter()
            .map(|img| f(img).unwrap_or_else(|| img.clone()))
            .collect();
        Scene { images }
    }

    /// New scene without the entities whose IDs are in `ids`.
    pub fn without(&self, ids: &[EntityId]) -> Scene {
        let images = self
            .images
            .iter()
            .filter(|img| !ids.contains(&img.id))
            .cloned()
            .collect();
        Scene { images }
    }

    /// Entities back to front: ascending `z_index`, ties in insertion order.
    pub fn paint_order(&self) -> Vec<&PlacedImage> {
        let mut order: Vec<&PlacedImage> = self.images.iter().collect();
        order.sort_by_key(|img| img.z_index);
        order
    }

    pub fn max_z(&self) -> Option<u64> {
        self.images.iter().map(|img| img.z_index).max()
    }
}

impl FromIterator<PlacedImage> for Scene {
    fn from_iter<I: IntoIterator<Item = PlacedImage>>(iter: I) -> Self {
        Scene {
            images: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a PlacedImage;
    type IntoIter = std::slice::Iter<'a, PlacedImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}

// ─── Stacking counter ────────────────────────────────────────────────────

/// Source of "next on top" z values for one session. Starts at 1 and only
/// counts up.
#[derive(Debug, Clone)]
pub struct StackingCounter {
    next: u64,
}

impl Default for StackingCounter {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl StackingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next z value.
    pub fn next_z(&mut self) -> u64 {
        let z = self.next;
        self.next += 1;
        z
    }

    /// The value the next call to [`next_z`](Self::next_z) returns.
    pub fn peek(&self) -> u64 {
        self.next
    }
}
