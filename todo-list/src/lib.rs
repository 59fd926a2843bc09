//! Core state management for the todo list.
//!
//! [`TodoListController`] owns the ordered list of [`TodoItem`]s and is the only
//! way to mutate it. Every change is mirrored into a [`PersistentStore`] slot.
pub mod controller;
pub mod error;
pub mod item;
pub mod store;

pub use controller::{EmptyEditPolicy, LoadOutcome, TodoListController};
pub use error::{StoreError, TodoError};
pub use item::{TodoId, TodoItem};
pub use store::{MemoryStore, PersistentStore, STORAGE_KEY};
