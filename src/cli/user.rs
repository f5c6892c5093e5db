//! pm user command implementations
//!
//! `add-user`, `list-users`, and `show-user`.

use serde::Serialize;

use crate::cli::Context;
use crate::error::Result;
use crate::model::{Entity, ProjectRecord, TaskStatus, UserRecord};
use crate::output::{emit_success, HumanOutput};

/// Options for `pm add-user`
pub struct AddOptions {
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
struct UserListReport {
    total: usize,
    users: Vec<UserRecord>,
}

#[derive(Serialize)]
struct UserShowReport {
    user: UserRecord,
    projects: Vec<ProjectRecord>,
}

pub fn run_add(ctx: &Context, options: AddOptions) -> Result<()> {
    let storage = ctx.open_storage()?;
    let mut store = storage.load_store();

    let user = store.create_user(&options.name, &options.email)?.clone();
    storage.save_users(&store)?;

    let mut human = HumanOutput::new(format!("User has been added: {user}"));
    human.next_step(format!(
        "pm add-project --user \"{}\" --title <title> --description <text> --due-date YYYY-MM-DD",
        user.name()
    ));

    emit_success(ctx.output(), "add-user", &user.to_record(), &human)
}

pub fn run_list(ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;
    let store = storage.load_store();

    let users: Vec<UserRecord> = store.users().map(|user| user.to_record()).collect();

    let mut human =
        HumanOutput::listing("Users", store.users()).or_when_empty("No users found.");
    if users.is_empty() {
        human.next_step("pm add-user --name <name> --email <email>");
    }

    let report = UserListReport {
        total: users.len(),
        users,
    };
    emit_success(ctx.output(), "list-users", &report, &human)
}

pub fn run_show(ctx: &Context, name: &str) -> Result<()> {
    let storage = ctx.open_storage()?;
    let store = storage.load_store();

    let user = store.find_user_by_name(name)?;
    let projects: Vec<_> = store.projects_of(user.id()).collect();

    let mut human = HumanOutput::new(user.to_string());
    human.field("projects", projects.len().to_string());
    for project in &projects {
        let open = store
            .tasks_of(project.id())
            .filter(|task| task.status() == TaskStatus::Incomplete)
            .count();
        human.entry(format!("{project} ({open} open tasks)"));
    }

    let report = UserShowReport {
        user: user.to_record(),
        projects: projects.iter().map(|project| project.to_record()).collect(),
    };
    emit_success(ctx.output(), "show-user", &report, &human)
}
