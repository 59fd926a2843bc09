use serde::Deserialize;
use std::path::{Path, PathBuf};
use todo_list::{EmptyEditPolicy, STORAGE_KEY};

/// Settings for the terminal front end.
///
/// Sources, later ones winning: built-in defaults, `todo.{toml,yaml,json}` in the
/// working directory (or the file passed with `--config`), `TODO_*` variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CliConfig {
    /// File holding the storage slots.
    pub storage_path: PathBuf,
    /// Slot the list is saved under.
    pub storage_key: String,
    pub empty_edit: EmptyEditPolicy,
    pub log_level: String,
}

impl CliConfig {
    pub fn load(config_file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("storage_path", "todos.json")?
            .set_default("storage_key", STORAGE_KEY)?
            .set_default("empty_edit", "keep-empty")?
            .set_default("log_level", "warn")?;

        let builder = match config_file {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name("todo").required(false)),
        };

        builder
            .add_source(config::Environment::with_prefix("TODO"))
            .build()?
            .try_deserialize()
    }

    /// Maximum log level, falling back to `warn` for unrecognized values.
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::WARN)
    }
}
