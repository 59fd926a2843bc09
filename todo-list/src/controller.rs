use crate::error::TodoError;
use crate::item::{TodoId, TodoItem, next_id};
use crate::store::{PersistentStore, STORAGE_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// What committing an edit does when the trimmed text is empty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyEditPolicy {
    /// Store the empty text as-is.
    #[default]
    KeepEmpty,
    /// Restore the text the item had before the edit started.
    Revert,
    /// Remove the item.
    Delete,
}

/// Result of reading the persisted slot at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored yet.
    Missing,
    /// The stored list was restored with this many items.
    Restored(usize),
    /// The stored value could not be parsed and was discarded.
    Corrupted,
    /// The store could not be read.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditSession {
    id: TodoId,
    original_text: String,
}

/// Owns the todo list and mirrors every change into a [`PersistentStore`].
#[derive(Debug)]
pub struct TodoListController<S> {
    items: Vec<TodoItem>,
    editing: Option<EditSession>,
    store: S,
    key: String,
    empty_edit: EmptyEditPolicy,
    clock: fn() -> DateTime<Utc>,
}

impl<S: PersistentStore> TodoListController<S> {
    /// Creates a controller with an empty list. Call [`Self::load`] to restore
    /// previously saved items.
    pub fn new(store: S) -> Self {
        Self {
            items: Vec::new(),
            editing: None,
            store,
            key: STORAGE_KEY.to_string(),
            empty_edit: EmptyEditPolicy::default(),
            clock: Utc::now,
        }
    }

    /// Uses a different storage slot.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_empty_edit_policy(mut self, policy: EmptyEditPolicy) -> Self {
        self.empty_edit = policy;
        self
    }

    /// Replaces the time source used for ids and creation times.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items not yet completed.
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    /// The item currently in edit mode, if any.
    pub fn editing(&self) -> Option<TodoId> {
        self.editing.as_ref().map(|session| session.id)
    }

    pub fn empty_edit_policy(&self) -> EmptyEditPolicy {
        self.empty_edit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the in-memory list with the persisted one.
    ///
    /// Never fails: a missing, unreadable or corrupted slot leaves the list
    /// empty. A list in which two items share an id counts as corrupted.
    /// Corrupted content is overwritten by the next save.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn load(&mut self) -> LoadOutcome {
        self.items.clear();
        self.editing = None;

        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved todo list");
                return LoadOutcome::Missing;
            }
            Err(e) => {
                warn!("Cannot read saved todo list, starting empty: {e}");
                return LoadOutcome::Unavailable;
            }
        };

        match serde_json::from_str::<Vec<TodoItem>>(&raw) {
            Ok(items) if has_duplicate_ids(&items) => {
                warn!("Discarding todo list with duplicate ids");
                LoadOutcome::Corrupted
            }
            Ok(items) => {
                debug!(count = items.len(), "Restored todo list");
                self.items = items;
                LoadOutcome::Restored(self.items.len())
            }
            Err(e) => {
                warn!("Discarding corrupted todo list: {e}");
                LoadOutcome::Corrupted
            }
        }
    }

    /// Writes the whole list to the store.
    #[tracing::instrument(skip(self), fields(key = %self.key, count = self.items.len()))]
    pub fn save(&mut self) -> Result<(), TodoError> {
        let json = serde_json::to_string(&self.items)?;
        self.store.set(&self.key, &json)?;
        Ok(())
    }

    /// Appends a new item if `text` has any non-whitespace content.
    ///
    /// Returns the id of the new item, or `None` when the input was blank. Fails
    /// without changing the list if the largest id is already taken.
    pub fn add(&mut self, text: &str) -> Result<Option<TodoId>, TodoError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let now = (self.clock)();
        let last = self.items.iter().map(|item| item.id).max();
        let id = next_id(now, last).ok_or(TodoError::IdsExhausted)?;
        self.items.push(TodoItem::new(id, text, now));
        debug!(id, "Added todo");

        self.save()?;
        Ok(Some(id))
    }

    /// Removes the item with `id`. Unknown ids are ignored.
    pub fn delete(&mut self, id: TodoId) -> Result<(), TodoError> {
        if !self.remove(id) {
            return Ok(());
        }
        debug!(id, "Deleted todo");
        self.save()
    }

    /// Flips the completed flag of the item with `id`. Unknown ids are ignored.
    pub fn toggle(&mut self, id: TodoId) -> Result<(), TodoError> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(());
        };
        item.completed = !item.completed;
        debug!(id, completed = item.completed, "Toggled todo");
        self.save()
    }

    /// Replaces the text of `id` in one step: start editing, set the text, commit.
    ///
    /// Unknown ids are ignored and leave any open edit session untouched.
    pub fn edit(&mut self, id: TodoId, text: &str) -> Result<(), TodoError> {
        if self.get(id).is_none() {
            return Ok(());
        }
        if self.editing() != Some(id) {
            self.commit_session();
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            let previous = std::mem::replace(&mut item.text, text.to_string());
            let original_text = match self.editing.take() {
                Some(session) => session.original_text,
                None => previous,
            };
            self.editing = Some(EditSession { id, original_text });
            self.commit_session();
        }
        self.save()
    }

    /// Puts `id` into edit mode, committing any other item being edited.
    pub fn start_editing(&mut self, id: TodoId) -> Result<(), TodoError> {
        if self.editing() == Some(id) {
            return Ok(());
        }
        let Some(item) = self.get(id) else {
            return Ok(());
        };
        let session = EditSession {
            id,
            original_text: item.text.clone(),
        };

        let changed = self.commit_session();
        self.editing = Some(session);
        if changed { self.save() } else { Ok(()) }
    }

    /// Sets the text of the item being edited, untrimmed.
    pub fn update_draft(&mut self, text: &str) -> Result<(), TodoError> {
        let Some(id) = self.editing() else {
            return Ok(());
        };
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(());
        };
        if item.text == text {
            return Ok(());
        }
        item.text = text.to_string();
        self.save()
    }

    /// Commits the current edit and leaves edit mode.
    pub fn finish_editing(&mut self) -> Result<(), TodoError> {
        if self.commit_session() { self.save() } else { Ok(()) }
    }

    /// Restores the text from before the edit and leaves edit mode.
    pub fn cancel_editing(&mut self) -> Result<(), TodoError> {
        let Some(session) = self.editing.take() else {
            return Ok(());
        };
        let Some(item) = self.items.iter_mut().find(|item| item.id == session.id) else {
            return Ok(());
        };
        if item.text == session.original_text {
            return Ok(());
        }
        item.text = session.original_text;
        self.save()
    }

    /// Ends the edit session, trimming the text and applying the empty-edit
    /// policy. Returns whether the list changed relative to its saved state.
    fn commit_session(&mut self) -> bool {
        let Some(session) = self.editing.take() else {
            return false;
        };
        let Some(item) = self.items.iter_mut().find(|item| item.id == session.id) else {
            return false;
        };

        let trimmed = item.text.trim().to_string();
        if trimmed.is_empty() {
            match self.empty_edit {
                EmptyEditPolicy::KeepEmpty => item.text = trimmed,
                EmptyEditPolicy::Revert => item.text = session.original_text,
                EmptyEditPolicy::Delete => {
                    self.remove(session.id);
                    debug!(id = session.id, "Deleted todo after empty edit");
                    return true;
                }
            }
        } else {
            item.text = trimmed;
        }
        debug!(id = session.id, "Committed edit");
        // Drafts are saved as they are typed, so any commit is worth writing.
        true
    }

    fn remove(&mut self, id: TodoId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.editing() == Some(id) {
            self.editing = None;
        }
        self.items.len() != before
    }
}

fn has_duplicate_ids(items: &[TodoItem]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    !items.iter().all(|item| seen.insert(item.id))
}


#[cfg(test)]
mod load_tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;

    struct BrokenStore;

    impl PersistentStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Backend("quota exceeded".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("quota exceeded".to_string()))
        }
    }

    #[test]
    fn load_without_saved_state_is_empty() {
        let mut todos = TodoListController::new(MemoryStore::new());

        assert_eq!(todos.load(), LoadOutcome::Missing);
        assert!(todos.is_empty());
    }

    #[test]
    fn load_restores_saved_items() {
        let json = r#"[
            {"id":1,"text":"First","completed":false},
            {"id":2,"text":"Second","completed":true,"createdAt":"2023-01-01T00:00:00Z"}
        ]"#;
        let mut todos = TodoListController::new(MemoryStore::with_value(STORAGE_KEY, json));

        assert_eq!(todos.load(), LoadOutcome::Restored(2));
        assert_eq!(todos.items()[0].text, "First");
        assert!(todos.items()[1].completed);
        assert!(todos.items()[1].created_at.is_some());
    }

    #[test]
    fn load_discards_corrupted_state() {
        let mut todos =
            TodoListController::new(MemoryStore::with_value(STORAGE_KEY, "{not json"));

        assert_eq!(todos.load(), LoadOutcome::Corrupted);
        assert!(todos.is_empty());
    }

    #[test]
    fn save_after_corrupted_load_overwrites_slot() {
        let mut todos =
            TodoListController::new(MemoryStore::with_value(STORAGE_KEY, "{not json"));
        todos.load();

        todos.add("Fresh start").unwrap();

        let stored = todos.store().value(STORAGE_KEY).unwrap();
        assert!(stored.starts_with('['));
        assert!(stored.contains("Fresh start"));
    }

    #[test]
    fn load_discards_list_with_duplicate_ids() {
        let json = r#"[
            {"id":5,"text":"One","completed":false},
            {"id":5,"text":"Two","completed":false}
        ]"#;
        let mut todos = TodoListController::new(MemoryStore::with_value(STORAGE_KEY, json));

        assert_eq!(todos.load(), LoadOutcome::Corrupted);
        assert!(todos.is_empty());
    }

    #[test]
    fn add_after_largest_id_fails_without_panicking() {
        let json = format!(r#"[{{"id":{},"text":"Last","completed":false}}]"#, TodoId::MAX);
        let mut todos = TodoListController::new(MemoryStore::with_value(STORAGE_KEY, &json));
        assert_eq!(todos.load(), LoadOutcome::Restored(1));

        let result = todos.add("One more");

        assert!(matches!(result, Err(TodoError::IdsExhausted)));
        assert_eq!(todos.len(), 1);
        assert_eq!(todos.store().value(STORAGE_KEY), Some(json.as_str()));
    }

    #[test]
    fn load_from_unreadable_store_is_empty() {
        let mut todos = TodoListController::new(BrokenStore);

        assert_eq!(todos.load(), LoadOutcome::Unavailable);
        assert!(todos.is_empty());
    }

    #[test]
    fn failed_save_still_applies_mutation() {
        let mut todos = TodoListController::new(BrokenStore);

        let result = todos.add("Buy milk");

        assert!(matches!(result, Err(TodoError::Store(StoreError::Backend(_)))));
        assert_eq!(todos.len(), 1);
    }

    #[test]
    fn custom_key_is_used_for_load_and_save() {
        let mut todos = TodoListController::new(MemoryStore::new()).with_key("other-slot");

        todos.add("Buy milk").unwrap();

        assert!(todos.store().value("other-slot").is_some());
        assert!(todos.store().value(STORAGE_KEY).is_none());
    }

    #[test]
    fn load_ends_edit_session() {
        let mut todos = TodoListController::new(MemoryStore::new());
        let id = todos.add("Buy milk").unwrap().unwrap();
        todos.start_editing(id).unwrap();

        todos.load();

        assert_eq!(todos.editing(), None);
        assert_eq!(todos.len(), 1);
    }
}
