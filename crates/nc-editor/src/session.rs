//! Canvas session: the top-level owner of collage state.
//!
//! Holds the live scene, the snapshot history, the selection, the stacking
//! counter and the gesture controller, and routes host events to them.
//!
//! The live scene equals `history.current()` except while a gesture is in
//! flight; gestures write to the live scene and commit it when they end.
//! Every entry point reads the live scene at call time, so an action that
//! resumes after an asynchronous collaborator call sees everything that
//! happened meanwhile.

use crate::config::SessionConfig;
use crate::history::History;
use crate::input::{InputEvent, KeyEvent, Modifiers, PointerId};
use crate::interaction::{self, EditContext, GestureKind, InteractionController};
use crate::selection::Selection;
use crate::services::DecodedImage;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use nc_core::id::EntityId;
use nc_core::layout::{AspectRatio, Viewport};
use nc_core::model::{PlacedImage, Point, Scene, StackingCounter};
use nc_render::hit::{Hit, hit_test};
use serde::Serialize;

pub struct CanvasSession {
    pub(crate) config: SessionConfig,
    pub(crate) viewport: Viewport,
    pub(crate) live: Scene,
    history: History,
    selection: Selection,
    stacking: StackingCounter,
    controller: InteractionController,
    shortcuts: ShortcutMap,
    dragging_over: bool,
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl CanvasSession {
    pub fn new(config: SessionConfig) -> Self {
        let viewport = Viewport::for_aspect(config.canvas_width, config.aspect_ratio);
        let shortcuts = ShortcutMap::new(config.bind_redo);
        Self {
            config,
            viewport,
            live: Scene::new(),
            history: History::new(),
            selection: Selection::new(),
            stacking: StackingCounter::new(),
            controller: InteractionController::new(),
            shortcuts,
            dragging_over: false,
        }
    }

    // ─── Render-facing state ─────────────────────────────────────────────

    /// The scene to display, including any gesture in progress.
    pub fn scene(&self) -> &Scene {
        &self.live
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.config.aspect_ratio
    }

    /// Images back to front.
    pub fn paint_order(&self) -> Vec<&PlacedImage> {
        self.live.paint_order()
    }

    /// Whether files are being dragged over the canvas.
    pub fn is_dragging_over(&self) -> bool {
        self.dragging_over
    }

    pub fn gesture(&self, pointer: u32) -> Option<GestureKind> {
        self.controller.gesture(PointerId(pointer))
    }

    /// Scene, selection and history flags as JSON for a script host.
    pub fn view_json(&self) -> String {
        let view = SessionView {
            images: &self.live,
            selected: &self.selection,
            dragging_over: self.dragging_over,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        };
        serde_json::to_string(&view).unwrap_or_else(|e| {
            log::error!("session view serialization failed: {e}");
            "{}".to_string()
        })
    }

    // ─── Canvas frame ────────────────────────────────────────────────────

    /// Switch the canvas frame. Images keep their canvas coordinates.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.config.aspect_ratio = ratio;
        self.viewport = Viewport::for_aspect(self.config.canvas_width, ratio);
    }

    /// The host laid the canvas out at a new width.
    pub fn set_canvas_width(&mut self, width: f32) {
        self.config.canvas_width = width;
        self.viewport = Viewport::for_aspect(width, self.config.aspect_ratio);
    }

    // ─── Entity creation ─────────────────────────────────────────────────

    /// Place a decoded image centred on `at` (canvas centre when `None`),
    /// on top of everything else, and commit. Returns `None` for an image
    /// with a zero dimension.
    pub fn place_image(&mut self, decoded: &DecodedImage, at: Option<Point>) -> Option<EntityId> {
        let Some(aspect) = decoded.aspect_ratio() else {
            log::warn!(
                "dropping image with degenerate size {}x{}",
                decoded.width,
                decoded.height
            );
            return None;
        };
        let center = at.unwrap_or_else(|| self.viewport.center());
        let image = PlacedImage::centered(
            EntityId::generate(),
            decoded.source.clone(),
            center,
            aspect,
            self.config.default_width,
            self.stacking.next_z(),
        )?;
        let id = image.id;
        self.live = self.live.with_added(image);
        self.history.commit(self.live.clone());
        log::debug!("ADD {id:?} at ({}, {})", center.x, center.y);
        Some(id)
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// What lies under (x, y) given the current selection.
    pub fn hit_test(&self, x: f32, y: f32) -> Hit {
        hit_test(&self.live, self.selection.as_slice(), x, y)
    }

    /// Route a pointer event. Returns `true` if the scene or selection changed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let hit = match event {
            InputEvent::PointerDown { x, y, .. } => self.hit_test(*x, *y),
            _ => Hit::Canvas,
        };
        self.dispatch(event, hit)
    }

    pub fn handle_pointer_down(&mut self, pointer: u32, x: f32, y: f32, modifiers: Modifiers) -> bool {
        self.handle_input(&InputEvent::from_pointer_down(pointer, x, y, modifiers))
    }

    pub fn handle_pointer_move(&mut self, pointer: u32, x: f32, y: f32) -> bool {
        self.handle_input(&InputEvent::from_pointer_move(pointer, x, y, Modifiers::NONE))
    }

    pub fn handle_pointer_up(&mut self, pointer: u32, x: f32, y: f32) -> bool {
        self.handle_input(&InputEvent::from_pointer_up(pointer, x, y, Modifiers::NONE))
    }

    pub fn handle_pointer_cancel(&mut self, pointer: u32) -> bool {
        self.handle_input(&InputEvent::from_pointer_cancel(pointer))
    }

    /// Route a pointer event whose target the host resolved itself (e.g.
    /// from DOM event targets) instead of [`hit_test`](Self::hit_test).
    pub fn dispatch(&mut self, event: &InputEvent, hit: Hit) -> bool {
        let (controller, mut ctx) = self.split();
        controller.handle(event, hit, &mut ctx)
    }

    // ─── Keyboard & discrete actions ─────────────────────────────────────

    /// Handle a key press. Returns the action the key was consumed for;
    /// hosts should suppress the default browser behavior when `Some`.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<ShortcutAction> {
        let action = self.shortcuts.resolve(event)?;
        match action {
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Delete => {
                if !self.delete_selected() {
                    return None;
                }
            }
        }
        Some(action)
    }

    /// Step back one snapshot and clear the selection. No-op at the start.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.reload_from_history();
        true
    }

    /// Step forward one snapshot and clear the selection. No-op at the tail.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.reload_from_history();
        true
    }

    /// Remove every selected image in one commit.
    pub fn delete_selected(&mut self) -> bool {
        let (_, mut ctx) = self.split();
        interaction::delete_selected(&mut ctx)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ─── Drag & drop hover ───────────────────────────────────────────────

    pub fn drag_enter(&mut self) {
        self.dragging_over = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging_over = false;
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn reload_from_history(&mut self) {
        self.controller.abandon_all();
        self.live = self.history.current().clone();
        self.selection.clear();
    }

    fn split(&mut self) -> (&mut InteractionController, EditContext<'_>) {
        (
            &mut self.controller,
            EditContext {
                live: &mut self.live,
                selection: &mut self.selection,
                stacking: &mut self.stacking,
                history: &mut self.history,
                min_size: self.config.min_size,
            },
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView<'a> {
    images: &'a Scene,
    selected: &'a Selection,
    dragging_over: bool,
    can_undo: bool,
    can_redo: bool,
}
