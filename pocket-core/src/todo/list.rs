use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stable handle to an item. Handles are never reused within a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u64);

impl fmt::Display for ItemId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: ItemId,
    pub text: String,
    pub done: bool,
}

/// Items in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<TodoItem>,
    next_id: u64,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new, not-done item.
    ///
    /// Surrounding whitespace is trimmed. Returns `None` and leaves the list
    /// untouched when nothing is left.
    pub fn append(
        &mut self,
        text: &str,
    ) -> Option<ItemId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(TodoItem {
            id,
            text: text.to_string(),
            done: false,
        });
        debug!(%id, text, "item added");
        Some(id)
    }

    /// Deletes an item. Removing an absent item is not an error; the return
    /// value says whether anything was removed.
    pub fn remove(
        &mut self,
        id: ItemId,
    ) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            debug!(%id, "item removed");
        }
        removed
    }

    /// Flips the completion flag. Returns the new flag, or `None` when the
    /// item does not exist.
    pub fn toggle(
        &mut self,
        id: ItemId,
    ) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.done = !item.done;
        debug!(%id, done = item.done, "item toggled");
        Some(item.done)
    }

    /// Removes every completed item and returns how many went.
    pub fn clear_done(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.done);
        before - self.items.len()
    }

    pub fn get(
        &self,
        id: ItemId,
    ) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The item at a 0-based position.
    pub fn at(
        &self,
        index: usize,
    ) -> Option<&TodoItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items not yet done.
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.done).count()
    }
}
