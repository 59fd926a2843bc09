//! Browser-side persistence for the todo list.
//!
//! The list lives in one LocalStorage slot so it survives reloads.

use dioxus::prelude::*;
use gloo_storage::{LocalStorage, Storage};
use todo_list::{PersistentStore, StoreError, TodoError, TodoListController};

/// [`PersistentStore`] over the browser's LocalStorage.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl PersistentStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}

pub type TodoList = TodoListController<LocalStorageStore>;

/// Hook owning the app's single controller, restored from LocalStorage on first render.
pub fn use_todo_list() -> Signal<TodoList> {
    use_signal(|| {
        let mut todos = TodoListController::new(LocalStorageStore);
        let outcome = todos.load();
        tracing::info!(?outcome, "Loaded todos");
        todos
    })
}

/// Logs a failed save. The in-memory list has already changed, so the UI keeps going.
pub fn report<T>(result: Result<T, TodoError>) {
    if let Err(e) = result {
        tracing::error!("{e}");
    }
}
