//! Pointer interaction controller.
//!
//! Translates pointer events into scene edits and history commits. Each
//! pointer runs its own gesture state machine, tracked in a registry keyed
//! by [`PointerId`]:
//!
//! ```text
//! Idle ──press body──▶ Dragging ──up / cancel──▶ Idle
//! Idle ──press resize handle──▶ Resizing ──up / cancel──▶ Idle
//! ```
//!
//! Every press on an image first raises it to the top and commits that as
//! its own undo step. Moves update the live scene only; the gesture's result
//! is committed once, when the pointer is released or cancelled.
//!
//! Drag and resize positions are always derived from the values captured at
//! gesture start plus the total pointer delta, never accumulated per move,
//! so skipped or coalesced move events cannot make the result drift.
//!
//! ## Selection on press
//!
//! | Press | Selection afterwards | Drag group |
//! |-------|----------------------|------------|
//! | unselected, no Shift | `{e}` | `{e}` |
//! | selected, no Shift | unchanged | whole selection |
//! | Shift | `e` toggled | resulting selection |

use crate::history::History;
use crate::input::{InputEvent, Modifiers, PointerId};
use crate::selection::Selection;
use nc_core::id::EntityId;
use nc_core::model::{Point, Scene, Size, StackingCounter};
use nc_render::hit::Hit;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Mutable session state an interaction works on. Handed in per event so
/// the controller always reads the live scene, never a copy it kept.
pub struct EditContext<'a> {
    /// The scene as currently displayed, including in-progress gestures.
    pub live: &'a mut Scene,
    pub selection: &'a mut Selection,
    pub stacking: &'a mut StackingCounter,
    pub history: &'a mut History,
    /// Smallest width/height a resize may produce.
    pub min_size: f32,
}

impl EditContext<'_> {
    fn commit(&mut self) -> bool {
        self.history.commit(self.live.clone())
    }
}

/// Kind of an active gesture, for hosts that style the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Dragging,
    Resizing,
}

#[derive(Debug, Clone)]
enum Gesture {
    Dragging {
        origin: Point,
        /// Position of every dragged image at gesture start.
        starts: SmallVec<[(EntityId, Point); 4]>,
    },
    Resizing {
        id: EntityId,
        origin: Point,
        start: Size,
    },
}

impl Gesture {
    fn kind(&self) -> GestureKind {
        match self {
            Gesture::Dragging { .. } => GestureKind::Dragging,
            Gesture::Resizing { .. } => GestureKind::Resizing,
        }
    }
}

/// Gesture registry plus the press/move/release rules.
#[derive(Debug, Default)]
pub struct InteractionController {
    gestures: HashMap<PointerId, Gesture>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a pointer event. `hit` is what lies under the pointer (only
    /// consulted on press). Returns `true` if the scene or selection changed.
    pub fn handle(&mut self, event: &InputEvent, hit: Hit, ctx: &mut EditContext<'_>) -> bool {
        match event {
            InputEvent::PointerDown {
                pointer,
                x,
                y,
                modifiers,
            } => self.pointer_down(*pointer, Point::new(*x, *y), *modifiers, hit, ctx),
            InputEvent::PointerMove { pointer, x, y, .. } => {
                self.pointer_move(*pointer, Point::new(*x, *y), ctx)
            }
            InputEvent::PointerUp { pointer, .. } | InputEvent::PointerCancel { pointer } => {
                self.pointer_end(*pointer, ctx)
            }
        }
    }

    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        at: Point,
        modifiers: Modifiers,
        hit: Hit,
        ctx: &mut EditContext<'_>,
    ) -> bool {
        match hit {
            Hit::Canvas => {
                let changed = !ctx.selection.is_empty();
                ctx.selection.clear();
                changed
            }
            Hit::DeleteHandle(id) => {
                if !ctx.selection.contains(id) {
                    return false;
                }
                delete_selected(ctx)
            }
            Hit::Body(id) | Hit::ResizeHandle(id) => {
                if !ctx.live.contains(id) {
                    log::warn!("press on unknown image {id:?}");
                    return false;
                }
                let group = press(id, modifiers.shift, ctx);

                let gesture = match hit {
                    Hit::ResizeHandle(_) if ctx.selection.is_only(id) => {
                        let start = ctx.live.get(id).map(|img| img.size());
                        start.map(|start| Gesture::Resizing {
                            id,
                            origin: at,
                            start,
                        })
                    }
                    _ => None,
                };
                let gesture = gesture.unwrap_or_else(|| Gesture::Dragging {
                    origin: at,
                    starts: group
                        .iter()
                        .filter_map(|gid| ctx.live.get(*gid).map(|img| (*gid, img.position())))
                        .collect(),
                });

                log::debug!("GESTURE {:?} start {pointer:?} on {id:?}", gesture.kind());
                if self.gestures.insert(pointer, gesture).is_some() {
                    log::warn!("{pointer:?} pressed again without release; gesture replaced");
                }
                true
            }
        }
    }

    pub fn pointer_move(&mut self, pointer: PointerId, at: Point, ctx: &mut EditContext<'_>) -> bool {
        let Some(gesture) = self.gestures.get(&pointer) else {
            return false;
        };

        match gesture {
            Gesture::Dragging { origin, starts } => {
                if starts.is_empty() {
                    return false;
                }
                let delta = at.delta_from(*origin);
                *ctx.live = ctx.live.with_each(|img| {
                    starts
                        .iter()
                        .find(|(id, _)| *id == img.id)
                        .map(|(_, start)| img.moved_to(start.offset(delta)))
                });
                log::trace!("DRAG {pointer:?} by ({}, {})", delta.x, delta.y);
                true
            }
            Gesture::Resizing { id, origin, start } => {
                let size = start.grown_by(at.delta_from(*origin));
                let Some(resized) = ctx
                    .live
                    .get(*id)
                    .and_then(|img| img.resized(size, ctx.min_size))
                else {
                    log::trace!("RESIZE {id:?} to {size:?} rejected");
                    return false;
                };
                *ctx.live = ctx.live.with_updated(*id, |_| resized);
                log::trace!("RESIZE {id:?} to {size:?}");
                true
            }
        }
    }

    /// Release or cancel: commit the gesture's result once and go idle.
    /// Unknown pointers are ignored.
    pub fn pointer_end(&mut self, pointer: PointerId, ctx: &mut EditContext<'_>) -> bool {
        let Some(gesture) = self.gestures.remove(&pointer) else {
            return false;
        };
        let committed = ctx.commit();
        log::debug!(
            "GESTURE {:?} end {pointer:?} (committed: {committed})",
            gesture.kind()
        );
        committed
    }

    /// Drop every in-flight gesture without committing. Used when history
    /// moves under the gestures' feet (undo / redo).
    pub fn abandon_all(&mut self) {
        if !self.gestures.is_empty() {
            log::debug!("GESTURE abandoned {} in flight", self.gestures.len());
        }
        self.gestures.clear();
    }

    pub fn gesture(&self, pointer: PointerId) -> Option<GestureKind> {
        self.gestures.get(&pointer).map(Gesture::kind)
    }

    pub fn is_idle(&self) -> bool {
        self.gestures.is_empty()
    }
}

/// Raise `id` to the top (committed on its own), apply the press selection
/// rules, and return the drag group.
fn press(id: EntityId, shift: bool, ctx: &mut EditContext<'_>) -> SmallVec<[EntityId; 4]> {
    let z = ctx.stacking.next_z();
    *ctx.live = ctx.live.with_updated(id, |img| img.raised(z));
    ctx.commit();

    let was_selected = ctx.selection.contains(id);
    if shift {
        ctx.selection.toggle(id);
    } else if !was_selected {
        ctx.selection.replace(id);
    }
    ctx.selection.iter().collect()
}

/// Remove every selected image in one commit and clear them from the
/// selection. Returns `false` when nothing is selected.
pub fn delete_selected(ctx: &mut EditContext<'_>) -> bool {
    if ctx.selection.is_empty() {
        return false;
    }
    let doomed: SmallVec<[EntityId; 4]> = ctx.selection.iter().collect();
    *ctx.live = ctx.live.without(&doomed);
    ctx.commit();
    ctx.selection.remove(&doomed);
    log::debug!("DELETE {} images", doomed.len());
    true
}
