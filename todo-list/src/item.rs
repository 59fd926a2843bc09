use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a todo item: its creation time in epoch milliseconds.
pub type TodoId = i64;

/// A single task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    /// Missing in lists written before creation times were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// Creates an incomplete item.
    pub fn new(id: TodoId, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at: Some(created_at),
        }
    }
}

/// Picks the id for an item created at `now`.
///
/// Ids follow the creation timestamp but never repeat or go backwards, even when
/// two items land in the same millisecond or the clock is adjusted. Returns
/// `None` once `last` is already the largest representable id.
pub(crate) fn next_id(now: DateTime<Utc>, last: Option<TodoId>) -> Option<TodoId> {
    let millis = now.timestamp_millis();
    match last {
        Some(last) if last >= millis => last.checked_add(1),
        _ => Some(millis),
    }
}
