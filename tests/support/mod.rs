#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

pub fn pm_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pm").expect("binary");
    cmd.env_remove("PM_DATA_DIR").env_remove("RUST_LOG");
    cmd
}

/// Isolated data directory for one test
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// `pm` with `--data-dir` pointing at this directory
    pub fn cmd(&self) -> Command {
        let mut cmd = pm_cmd();
        cmd.arg("--data-dir").arg(self.path());
        cmd
    }

    pub fn write_file(&self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.file(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read_json(&self, name: &str) -> Result<Value, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(self.file(name))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Run a command with `--json` and return the `data` payload
    pub fn json_data(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let value: Value = serde_json::from_slice(&output).expect("json output");
        value["data"].clone()
    }

    pub fn add_user(&self, name: &str, email: &str) -> u64 {
        let data = self.json_data(&["add-user", "--name", name, "--email", email]);
        data["id"].as_u64().expect("user id")
    }

    pub fn add_project(&self, user: &str, title: &str, due_date: &str) -> u64 {
        let data = self.json_data(&[
            "add-project",
            "--user",
            user,
            "--title",
            title,
            "--description",
            "desc",
            "--due-date",
            due_date,
        ]);
        data["id"].as_u64().expect("project id")
    }

    pub fn add_task(&self, project_id: u64, title: &str, assigned_to: &str) -> u64 {
        let project_id = project_id.to_string();
        let data = self.json_data(&[
            "add-task",
            "--project-id",
            &project_id,
            "--title",
            title,
            "--assigned-to",
            assigned_to,
        ]);
        data["id"].as_u64().expect("task id")
    }
}
