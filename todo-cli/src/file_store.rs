use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use todo_list::{PersistentStore, StoreError};
use tracing::warn;

/// Keeps named string slots in a single JSON object on disk, the way browser
/// local storage keeps them per origin.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable slot file is kept before a fresh one replaces it.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn read_slots(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            StoreError::Backend(format!("{} is not a slot file: {e}", self.path.display()))
        })
    }
}

impl PersistentStore for FileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut slots = self.read_slots()?;
        Ok(slots.remove(key))
    }

    #[tracing::instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut slots = match self.read_slots() {
            Ok(slots) => slots,
            Err(e) => {
                let backup = self.backup_path();
                warn!("Moving unreadable slot file to {}: {e}", backup.display());
                fs::rename(&self.path, &backup)?;
                BTreeMap::new()
            }
        };
        slots.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&slots)
            .map_err(|e| StoreError::Backend(format!("cannot encode slot file: {e}")))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        Ok(())
    }
}
