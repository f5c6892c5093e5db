//! Storage layer for pm
//!
//! Each collection lives in its own pretty-printed JSON array inside the
//! data directory:
//!
//! ```text
//! <data-dir>/
//!   .pm.toml          # Optional configuration
//!   users.json        # [{ "id", "name", "email" }]
//!   projects.json     # [{ "id", "user_id", "title", "description", "due_date" }]
//!   tasks.json        # [{ "id", "project_id", "title", "status", "assigned_to" }]
//! ```
//!
//! Reads are lenient: a missing, empty, unreadable, or malformed file loads
//! as an empty collection and only leaves a `warn` trace behind. Writes
//! replace the whole file through a temp file + rename.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::store::Store;

/// Storage manager for pm state
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
    config: Config,
}

impl Storage {
    pub fn new(data_dir: PathBuf, config: Config) -> Self {
        Self { data_dir, config }
    }

    /// Open the data directory, reading `.pm.toml` if present
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let config = Config::load_from_dir(&data_dir)?;
        Ok(Self::new(data_dir, config))
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(crate::config::CONFIG_FILE)
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join(self.config.storage.users_file.trim())
    }

    pub fn projects_file(&self) -> PathBuf {
        self.data_dir.join(self.config.storage.projects_file.trim())
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join(self.config.storage.tasks_file.trim())
    }

    // =========================================================================
    // Collection I/O
    // =========================================================================

    /// Read every collection into a fresh [`Store`]
    pub fn load_store(&self) -> Store {
        let mut store = Store::new();
        let users = store.hydrate_users(load(&self.users_file()));
        let projects = store.hydrate_projects(load(&self.projects_file()));
        let tasks = store.hydrate_tasks(load(&self.tasks_file()));
        debug!(users, projects, tasks, dir = %self.data_dir.display(), "loaded store");
        store
    }

    pub fn save_users(&self, store: &Store) -> Result<()> {
        save(&self.users_file(), &store.user_records())
    }

    pub fn save_projects(&self, store: &Store) -> Result<()> {
        save(&self.projects_file(), &store.project_records())
    }

    pub fn save_tasks(&self, store: &Store) -> Result<()> {
        save(&self.tasks_file(), &store.task_records())
    }
}

/// Read a JSON array of records. Never fails: anything unreadable is
/// treated as an empty collection.
pub fn load<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unreadable collection file; starting empty");
            return Vec::new();
        }
    };

    let content = content.trim();
    if content.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str(content) {
        Ok(records) => records,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "malformed collection file; starting empty");
            Vec::new()
        }
    }
}

/// Overwrite `path` with the full collection
pub fn save<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    write_atomic(path, json.as_bytes())?;
    debug!(path = %path.display(), count = records.len(), "saved collection");
    Ok(())
}

/// Write data using temp file + rename so a crash never leaves half a file
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.write_all(b"\n")?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, TaskStatus, UserRecord};
    use tempfile::TempDir;

    fn storage(temp: &TempDir) -> Storage {
        Storage::new(temp.path().to_path_buf(), Config::default())
    }

    #[test]
    fn test_storage_paths() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let storage = storage(&temp);

        assert_eq!(storage.users_file(), root.join("users.json"));
        assert_eq!(storage.projects_file(), root.join("projects.json"));
        assert_eq!(storage.tasks_file(), root.join("tasks.json"));
        assert_eq!(storage.config_file(), root.join(".pm.toml"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let records: Vec<UserRecord> = load(&temp.path().join("users.json"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_load_empty_and_malformed_files_are_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("users.json");

        for body in ["", "   \n", "{not json", "{\"id\": 1}", "[{\"id\": \"one\"}]"] {
            fs::write(&path, body).unwrap();
            let records: Vec<UserRecord> = load(&path);
            assert!(records.is_empty(), "expected empty for {body:?}");
        }
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("users.json");
        let records = vec![UserRecord {
            id: 1,
            name: "Ian".to_string(),
            email: "ian@email.com".to_string(),
        }];

        save(&path, &records).unwrap();
        let read_back: Vec<UserRecord> = load(&path);

        assert_eq!(read_back, records);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_saved_json_uses_two_space_indent_and_key_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("users.json");
        save(
            &path,
            &[UserRecord {
                id: 1,
                name: "Ian".to_string(),
                email: "ian@email.com".to_string(),
            }],
        )
        .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let expected = "[\n  {\n    \"id\": 1,\n    \"name\": \"Ian\",\n    \"email\": \"ian@email.com\"\n  }\n]\n";
        assert_eq!(written, expected);
    }

    #[test]
    fn test_store_survives_reload() {
        let temp = TempDir::new().unwrap();
        let storage = storage(&temp);

        let mut store = storage.load_store();
        store.create_user("Ian", "ian@email.com").unwrap();
        store
            .create_project(1, "Testing CLI", "desc", "2025-08-09")
            .unwrap();
        store.create_task(1, "Write tests", "Incomplete", "1").unwrap();
        store.complete_task(1).unwrap();
        storage.save_users(&store).unwrap();
        storage.save_projects(&store).unwrap();
        storage.save_tasks(&store).unwrap();

        let mut reloaded = storage.load_store();
        assert_eq!(reloaded.user_count(), 1);
        assert_eq!(reloaded.task(1).unwrap().status(), TaskStatus::Complete);

        let next = reloaded.create_user("Ann", "ann@email.com").unwrap();
        assert_eq!(next.id(), 2);
    }

    #[test]
    fn test_reads_files_written_by_older_versions() {
        let temp = TempDir::new().unwrap();
        let storage = storage(&temp);
        fs::write(
            storage.tasks_file(),
            r#"[
  {
    "id": 4,
    "project_id": 1,
    "title": "Write tests",
    "status": "Incomplete",
    "assigned_to": 1
  }
]"#,
        )
        .unwrap();

        let store = storage.load_store();
        let task = store.task(4).unwrap();
        assert_eq!(task.assigned_to(), "1");
    }
}
