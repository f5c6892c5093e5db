//! pm - Project Manager Library
//!
//! Core of the `pm` CLI: users own projects, projects own tasks, and each
//! collection is persisted to its own JSON file.
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.pm.toml`
//! - `error`: Error types, exit codes, and result aliases
//! - `model`: User, Project, and Task entities with field validation
//! - `registry`: Id assignment and id → entity mapping
//! - `store`: The three registries plus referential checks and queries
//! - `storage`: Lenient JSON load / atomic save of each collection
//! - `output`: Human and JSON output envelopes

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod registry;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
pub use store::Store;
