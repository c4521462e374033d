//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Undo is
//! intercepted before anything else, even while a text field has focus;
//! delete keys only apply to the canvas, never to text being edited.

use crate::input::KeyEvent;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    /// Remove every selected image.
    Delete,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; on other platforms `ctrl` serves the same role.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutMap {
    /// Bind ⌘⇧Z / ⌘Y to redo. Off by default: only undo is bound.
    pub bind_redo: bool,
}

impl ShortcutMap {
    pub fn new(bind_redo: bool) -> Self {
        Self { bind_redo }
    }

    /// Resolve a key event to an action, or `None` if the combo is unbound
    /// in the event's focus context.
    pub fn resolve(&self, event: &KeyEvent) -> Option<ShortcutAction> {
        let mods = event.modifiers;
        let key = event.key.as_str();

        // ── Global: wins over focus and every other binding ──
        if mods.command() {
            return match key {
                "z" | "Z" if !mods.shift => Some(ShortcutAction::Undo),
                "z" | "Z" if self.bind_redo => Some(ShortcutAction::Redo),
                "y" | "Y" if self.bind_redo && !mods.shift => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        // ── Canvas-only keys ──
        if event.text_input_focused {
            return None;
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            _ => None,
        }
    }
}
