pub mod config;
pub mod file_store;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use todo_list::{LoadOutcome, PersistentStore, TodoId, TodoListController};
use tracing::info;

pub use self::config::CliConfig;
pub use self::file_store::FileStore;

/// Keep track of things to do from the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file to read instead of ./todo.{toml,yaml,json}
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Slot file to store todos in, overriding the configured path
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Add a todo
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show all todos
    #[command(alias = "ls")]
    List,
    /// Replace the text of a todo
    Edit {
        id: TodoId,
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },
    /// Mark a todo done, or not done again
    Toggle { id: TodoId },
    /// Remove a todo
    #[command(alias = "rm")]
    Delete { id: TodoId },
}

/// Loads the list, applies one command and writes the result to `out`.
pub fn run<S: PersistentStore>(
    command: Commands,
    todos: &mut TodoListController<S>,
    mut out: impl Write,
) -> anyhow::Result<()> {
    match todos.load() {
        LoadOutcome::Corrupted => {
            writeln!(out, "Saved todos were unreadable and have been discarded")?
        }
        outcome => info!(?outcome, "Loaded todos"),
    }

    match command {
        Commands::Add { text } => match todos.add(&text.join(" "))? {
            Some(id) => writeln!(out, "Todo added with ID {id}")?,
            None => writeln!(out, "Nothing to add")?,
        },
        Commands::List => print_list(todos, &mut out)?,
        Commands::Edit { id, text } => {
            ensure_exists(todos, id)?;
            todos.edit(id, &text.join(" "))?;
            match todos.get(id) {
                Some(item) => writeln!(out, "Todo {id} is now \"{}\"", item.text)?,
                None => writeln!(out, "Todo {id} removed")?,
            }
        }
        Commands::Toggle { id } => {
            ensure_exists(todos, id)?;
            todos.toggle(id)?;
            let done = todos.get(id).is_some_and(|item| item.completed);
            writeln!(out, "Todo {id} marked {}", if done { "done" } else { "not done" })?;
        }
        Commands::Delete { id } => {
            ensure_exists(todos, id)?;
            todos.delete(id)?;
            writeln!(out, "Todo {id} deleted")?;
        }
    }
    Ok(())
}

fn ensure_exists<S: PersistentStore>(todos: &TodoListController<S>, id: TodoId) -> anyhow::Result<()> {
    anyhow::ensure!(todos.get(id).is_some(), "No todo with ID {id}");
    Ok(())
}

fn print_list<S: PersistentStore>(
    todos: &TodoListController<S>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if todos.is_empty() {
        writeln!(out, "No todos yet")?;
        return Ok(());
    }
    for item in todos.items() {
        let mark = if item.completed { 'x' } else { ' ' };
        writeln!(out, "{}\t[{mark}] {}", item.id, item.text)?;
    }
    let left = todos.remaining();
    writeln!(out, "{left} {} left", if left == 1 { "item" } else { "items" })
        .context("cannot write todo list")?;
    Ok(())
}
