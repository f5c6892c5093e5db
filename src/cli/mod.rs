//! Command-line interface for pm
//!
//! This module defines the CLI structure using clap derive macros.
//! Handlers live in per-entity submodules; each one loads the store, applies
//! a single change, and saves only the collection it touched.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{Error, Result};
use crate::output::OutputOptions;
use crate::storage::Storage;

mod init;
mod project;
mod task;
mod user;

/// pm - Project Manager
///
/// Track users, their projects, and project tasks in plain JSON files.
#[derive(Parser, Debug)]
#[command(name = "pm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the collection files (defaults to current directory)
    #[arg(long, global = true, env = "PM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory with a default .pm.toml and empty collections
    Init,

    /// Add a user
    AddUser {
        #[arg(long)]
        name: String,

        /// Must contain "@"
        #[arg(long)]
        email: String,
    },

    /// List all users
    ListUsers,

    /// Show a user and the projects they own
    ShowUser {
        #[arg(long)]
        name: String,
    },

    /// Add a project owned by an existing user
    AddProject {
        /// Owner's user name
        #[arg(long)]
        user: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due_date: String,
    },

    /// List projects, optionally only those owned by one user
    ListProjects {
        /// Owner's user name
        #[arg(long)]
        user: Option<String>,
    },

    /// Show a project and its tasks
    ShowProject {
        #[arg(long)]
        project_id: u64,
    },

    /// Add a task to an existing project
    AddTask {
        #[arg(long)]
        project_id: u64,

        #[arg(long)]
        title: String,

        /// Assignee identifier (free-form)
        #[arg(long)]
        assigned_to: String,

        /// Incomplete or Complete (defaults to tasks.default_status)
        #[arg(long)]
        status: Option<String>,
    },

    /// List tasks
    ListTasks {
        /// Only tasks of this project
        #[arg(long)]
        project_id: Option<u64>,

        /// Only tasks with this status (Incomplete or Complete)
        #[arg(long)]
        status: Option<String>,
    },

    /// Mark a task complete
    CompleteTask {
        #[arg(long)]
        task_id: u64,
    },
}

/// Global flags shared by every handler
#[derive(Debug, Clone)]
pub struct Context {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn open_storage(&self) -> Result<Storage> {
        let dir = self.data_dir();
        if dir.exists() && !dir.is_dir() {
            return Err(Error::InvalidArgument(format!(
                "data directory {} is not a directory",
                dir.display()
            )));
        }
        Storage::open(dir)
    }

    pub fn output(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = Context {
            data_dir: self.data_dir,
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Init => init::run(&ctx),
            Commands::AddUser { name, email } => user::run_add(&ctx, user::AddOptions { name, email }),
            Commands::ListUsers => user::run_list(&ctx),
            Commands::ShowUser { name } => user::run_show(&ctx, &name),
            Commands::AddProject {
                user,
                title,
                description,
                due_date,
            } => project::run_add(
                &ctx,
                project::AddOptions {
                    user,
                    title,
                    description,
                    due_date,
                },
            ),
            Commands::ListProjects { user } => project::run_list(&ctx, user.as_deref()),
            Commands::ShowProject { project_id } => project::run_show(&ctx, project_id),
            Commands::AddTask {
                project_id,
                title,
                assigned_to,
                status,
            } => task::run_add(
                &ctx,
                task::AddOptions {
                    project_id,
                    title,
                    assigned_to,
                    status,
                },
            ),
            Commands::ListTasks { project_id, status } => task::run_list(
                &ctx,
                task::ListOptions { project_id, status },
            ),
            Commands::CompleteTask { task_id } => task::run_complete(&ctx, task_id),
        }
    }
}
