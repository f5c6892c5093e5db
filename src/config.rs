//! Configuration loading and management
//!
//! Handles parsing of the optional `.pm.toml` file in the data directory.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::TaskStatus;

/// Name of the configuration file inside the data directory
pub const CONFIG_FILE: &str = ".pm.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Collection file names
    #[serde(default)]
    pub storage: StorageConfig,

    /// Task defaults
    #[serde(default)]
    pub tasks: TasksConfig,
}

/// Where each collection is persisted, relative to the data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default = "default_projects_file")]
    pub projects_file: String,

    #[serde(default = "default_tasks_file")]
    pub tasks_file: String,
}

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_projects_file() -> String {
    "projects.json".to_string()
}

fn default_tasks_file() -> String {
    "tasks.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            users_file: default_users_file(),
            projects_file: default_projects_file(),
            tasks_file: default_tasks_file(),
        }
    }
}

/// Task configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Status for `pm add-task` when `--status` is omitted
    #[serde(default = "default_task_status")]
    pub default_status: String,
}

fn default_task_status() -> String {
    TaskStatus::Incomplete.as_str().to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_status: default_task_status(),
        }
    }
}

impl Config {
    /// Load configuration from a `.pm.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data directory, or return defaults when
    /// no config file exists
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        self.tasks.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        let files = [
            ("storage.users_file", &self.users_file),
            ("storage.projects_file", &self.projects_file),
            ("storage.tasks_file", &self.tasks_file),
        ];

        let mut seen = HashSet::new();
        for (field, name) in files {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(Error::InvalidConfig(format!("{field} cannot be empty")));
            }
            if trimmed.contains('/') || trimmed.contains('\\') || trimmed == "." || trimmed == ".."
            {
                return Err(Error::InvalidConfig(format!(
                    "{field} must be a plain file name, got '{trimmed}'"
                )));
            }
            if trimmed == CONFIG_FILE {
                return Err(Error::InvalidConfig(format!(
                    "{field} cannot be the config file itself"
                )));
            }
            if !seen.insert(trimmed) {
                return Err(Error::InvalidConfig(format!(
                    "{field} '{trimmed}' is used by another collection"
                )));
            }
        }
        Ok(())
    }
}

impl TasksConfig {
    fn validate(&self) -> Result<()> {
        self.default_status.parse::<TaskStatus>().map_err(|_| {
            Error::InvalidConfig(format!(
                "tasks.default_status '{}' must be Incomplete or Complete",
                self.default_status
            ))
        })?;
        Ok(())
    }
}
