use anyhow::Context;
use clap::Parser;
use todo_cli::{Cli, CliConfig, FileStore};
use todo_list::TodoListController;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut config = CliConfig::load(args.config.as_deref()).context("cannot load configuration")?;
    if let Some(file) = args.file {
        config.storage_path = file;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level())
        .init();
    tracing::debug!(?config, "Starting");

    let store = FileStore::new(&config.storage_path);
    let mut todos = TodoListController::new(store)
        .with_key(config.storage_key)
        .with_empty_edit_policy(config.empty_edit);

    todo_cli::run(args.command, &mut todos, std::io::stdout().lock())
        .with_context(|| format!("todo file {}", config.storage_path.display()))
}
