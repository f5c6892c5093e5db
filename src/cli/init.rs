//! pm init command implementation
//!
//! Creates the data directory, a default `.pm.toml`, and empty collection
//! files. Existing files are left untouched.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Context;
use crate::error::Result;
use crate::model::UserRecord;
use crate::output::{emit_success, HumanOutput};

#[derive(serde::Serialize)]
struct InitReport {
    data_dir: PathBuf,
    created: Vec<String>,
}

pub fn run(ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let data_dir = storage.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;

    let mut created = Vec::new();

    let config_file = storage.config_file();
    if !config_file.exists() {
        storage.config().save(&config_file)?;
        created.push(file_label(&config_file));
    }

    for path in [
        storage.users_file(),
        storage.projects_file(),
        storage.tasks_file(),
    ] {
        if !path.exists() {
            // Any record type serializes an empty collection the same way.
            crate::storage::save::<UserRecord>(&path, &[])?;
            created.push(file_label(&path));
        }
    }

    let header = if created.is_empty() {
        format!("pm init: already initialized ({})", data_dir.display())
    } else {
        format!("pm init: initialized {}", data_dir.display())
    };
    let mut human = HumanOutput::new(header);
    for item in &created {
        human.entry(format!("created {item}"));
    }
    human.next_step("pm add-user --name <name> --email <email>");

    let report = InitReport { data_dir, created };
    emit_success(ctx.output(), "init", &report, &human)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
