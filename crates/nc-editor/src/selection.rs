//! The set of selected images.
//!
//! Selection is session state, not scene state: changing it never creates
//! a history entry. Order is kept (first-selected first) so group
//! operations visit images predictably.

use nc_core::id::EntityId;
use serde::Serialize;
use smallvec::SmallVec;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    ids: SmallVec<[EntityId; 4]>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn as_slice(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.ids.iter().copied()
    }

    /// Whether `id` is the one and only selected image.
    pub fn is_only(&self, id: EntityId) -> bool {
        self.ids.as_slice() == [id]
    }

    /// Select exactly `id`.
    pub fn replace(&mut self, id: EntityId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Add `id` if absent, remove it if present. Returns whether it is
    /// selected afterwards.
    pub fn toggle(&mut self, id: EntityId) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn remove(&mut self, ids: &[EntityId]) {
        self.ids.retain(|s| !ids.contains(s));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
