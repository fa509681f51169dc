//! Command-line interface for artmark
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is implemented in its own submodule.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::ids::{ArtworkId, TaskId};
use crate::notify::{ConsoleNotifier, LogNotifier, Notifier};
use crate::reminder::{ReminderService, StoreReminders, UnscheduledReminders};
use crate::session::Session;
use crate::storage::Storage;
use crate::store::FileStore;

mod artworks;
mod fav;
mod init;
mod task;

/// artmark - favourites and follow-up tasks for catalog artworks
///
/// Marks artworks as favourites and keeps dated tasks, with reminders,
/// against individual artwork IDs.
#[derive(Parser, Debug)]
#[command(name = "artmark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "ARTMARK_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the data directory
    Init,

    /// Favourite artworks
    #[command(subcommand)]
    Fav(FavCommands),

    /// Tasks attached to artworks
    #[command(subcommand)]
    Task(TaskCommands),

    /// List artworks that have tasks
    Artworks {
        /// Only artworks with uncompleted tasks, listing those tasks
        #[arg(long)]
        open: bool,

        /// Print the comma-joined ID list only
        #[arg(long, conflicts_with = "open")]
        ids: bool,
    },
}

/// Favourite subcommands
#[derive(Subcommand, Debug)]
pub enum FavCommands {
    /// Show whether an artwork is a favourite
    Show {
        /// Artwork ID
        artwork: ArtworkId,
    },

    /// Add or remove an artwork from favourites
    Toggle {
        /// Artwork ID
        artwork: ArtworkId,
    },

    /// List favourite artworks
    List,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task to an artwork
    Add {
        /// Artwork ID
        artwork: ArtworkId,

        /// What to do
        text: String,

        /// When: RFC 3339, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD" (09:00)
        #[arg(long)]
        due: String,
    },

    /// List an artwork's tasks
    #[command(visible_alias = "list")]
    Ls {
        /// Artwork ID
        artwork: ArtworkId,
    },

    /// Mark a task completed
    Done {
        /// Artwork ID
        artwork: ArtworkId,

        /// Task ID
        task: TaskId,
    },

    /// Delete a task
    Rm {
        /// Artwork ID
        artwork: ArtworkId,

        /// Task ID
        task: TaskId,
    },
}

/// Shared context for commands that open the data directory
pub struct Context {
    pub session: Session,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    fn open(data_dir: Option<PathBuf>, json: bool, quiet: bool) -> Result<Self> {
        let storage = Storage::resolve(data_dir)?;
        storage.require_initialized()?;
        let config = Config::load(&storage.config_file())?;

        let store = Arc::new(FileStore::new(storage.store_file(&config)));
        let reminders: Box<dyn ReminderService> = if config.reminders.enabled {
            Box::new(StoreReminders::new(Arc::new(FileStore::new(
                storage.reminders_file(&config),
            ))))
        } else {
            Box::new(UnscheduledReminders)
        };
        // Notifications go to stderr; JSON consumers only read stdout.
        let notifier: Arc<dyn Notifier> = if quiet {
            Arc::new(LogNotifier)
        } else {
            Arc::new(ConsoleNotifier::new(config.notifications.enabled))
        };

        Ok(Self {
            session: Session::new(store, reminders, notifier, config),
            json,
            quiet,
        })
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let Cli {
            data_dir,
            json,
            quiet,
            command,
            ..
        } = self;

        match command {
            Commands::Init => init::run(data_dir, json, quiet),
            Commands::Fav(cmd) => {
                let ctx = Context::open(data_dir, json, quiet)?;
                match cmd {
                    FavCommands::Show { artwork } => fav::run_show(&ctx, artwork).await,
                    FavCommands::Toggle { artwork } => fav::run_toggle(&ctx, artwork).await,
                    FavCommands::List => fav::run_list(&ctx).await,
                }
            }
            Commands::Task(cmd) => {
                let ctx = Context::open(data_dir, json, quiet)?;
                match cmd {
                    TaskCommands::Add { artwork, text, due } => {
                        task::run_add(&ctx, artwork, &text, &due).await
                    }
                    TaskCommands::Ls { artwork } => task::run_list(&ctx, artwork).await,
                    TaskCommands::Done { artwork, task } => {
                        task::run_done(&ctx, artwork, &task).await
                    }
                    TaskCommands::Rm { artwork, task } => task::run_rm(&ctx, artwork, &task).await,
                }
            }
            Commands::Artworks { open, ids } => {
                let ctx = Context::open(data_dir, json, quiet)?;
                artworks::run(&ctx, open, ids).await
            }
        }
    }
}
