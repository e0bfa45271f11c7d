//! Checklist store: an ordered list of to-do items.

mod list;

pub use list::{ItemId, TodoItem, TodoList};
