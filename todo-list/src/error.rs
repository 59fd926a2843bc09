use thiserror::Error;

/// Failures reported by a [`crate::PersistentStore`] backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage backend failed: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("Could not persist todo list: {0}")]
    Store(#[from] StoreError),
    #[error("Could not serialize todo list: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("No todo ids left")]
    IdsExhausted,
}
