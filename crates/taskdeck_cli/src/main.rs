//! Terminal front end for Taskdeck.
//!
//! # Responsibility
//! - Map subcommands onto board intents.
//! - Render the display-ordered task list as plain text.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use taskdeck_core::{
    init_logging, open_board, CoreConfig, IntentOutcome, Priority, SqliteKvStore, Task, TaskBoard,
    TaskId,
};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Single-user task list with priority ordering")]
#[command(version)]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite file holding the task store (overrides config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files (overrides config)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides config)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tasks, highest priority first
    List,

    /// Add a task
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// low|medium|high
        #[arg(long, default_value = "low")]
        priority: Priority,
    },

    /// Edit a task; omitted fields keep their current value
    Edit {
        id: TaskId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        priority: Option<Priority>,
    },

    /// Flip a task between open and done
    Toggle { id: TaskId },

    /// Delete a task (missing ids are ignored)
    Delete { id: TaskId },

    /// Print the effective configuration
    Config,
}

impl Commands {
    /// Subcommand name as written on the command line.
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add { .. } => "add",
            Self::Edit { .. } => "edit",
            Self::Toggle { .. } => "toggle",
            Self::Delete { .. } => "delete",
            Self::Config => "config",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())
            .context("failed to initialize logging")?;
    }
    let command = cli.command.name();
    info!("event=cli_command module=cli status=start command={command}");

    if let Commands::Config = cli.command {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let mut board = open_board(&config)
        .with_context(|| format!("failed to open task store {}", config.db_path.display()))?;

    match cli.command {
        Commands::List => print_tasks(&board),
        Commands::Add {
            title,
            description,
            priority,
        } => {
            board.set_title(title);
            board.set_description(description);
            board.set_priority(priority);
            let outcome = board.add_or_save()?;
            report("added", &outcome);
        }
        Commands::Edit {
            id,
            title,
            description,
            priority,
        } => {
            board.begin_edit(id)?;
            if let Some(title) = title {
                board.set_title(title);
            }
            if let Some(description) = description {
                board.set_description(description);
            }
            if let Some(priority) = priority {
                board.set_priority(priority);
            }
            let outcome = board.add_or_save()?;
            report("saved", &outcome);
        }
        Commands::Toggle { id } => {
            let outcome = board.toggle_complete(id)?;
            report("updated", &outcome);
        }
        Commands::Delete { id } => {
            let outcome = board.delete_task(id);
            if outcome.task.is_none() {
                println!("no task with id {id}");
            }
            report("deleted", &outcome);
        }
        Commands::Config => {}
    }

    info!("event=cli_command module=cli status=ok command={command}");
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = match &cli.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn print_tasks(board: &TaskBoard<SqliteKvStore>) {
    let tasks = board.visible_tasks();
    if tasks.is_empty() {
        println!("no tasks");
        return;
    }
    for task in &tasks {
        println!("{}", render_task(task));
    }
}

fn render_task(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!(
        "[{mark}] {id} ({priority}) {title}: {description}",
        id = task.id,
        priority = task.priority,
        title = task.title,
        description = task.description,
    )
}

fn report(verb: &str, outcome: &IntentOutcome) {
    if let Some(task) = &outcome.task {
        println!("{verb}: {}", render_task(task));
    }
    if let Some(warning) = &outcome.persistence_warning {
        eprintln!("warning: {warning}");
    }
}
