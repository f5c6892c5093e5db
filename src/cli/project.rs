//! pm project command implementations

use serde::Serialize;

use crate::cli::Context;
use crate::error::Result;
use crate::model::{Entity, ProjectRecord, TaskRecord};
use crate::output::{emit_success, HumanOutput};

/// Options for `pm add-project`
pub struct AddOptions {
    /// Owner's user name
    pub user: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
}

#[derive(Serialize)]
struct ProjectListReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<u64>,
    total: usize,
    projects: Vec<ProjectRecord>,
}

#[derive(Serialize)]
struct ProjectShowReport {
    project: ProjectRecord,
    tasks: Vec<TaskRecord>,
}

pub fn run_add(ctx: &Context, options: AddOptions) -> Result<()> {
    let storage = ctx.open_storage()?;
    let mut store = storage.load_store();

    let user_id = store.find_user_by_name(&options.user)?.id();
    let project = store
        .create_project(
            user_id,
            &options.title,
            &options.description,
            &options.due_date,
        )?
        .clone();
    storage.save_projects(&store)?;

    let mut human = HumanOutput::new(format!("Project has been added: {project}"));
    human.field("owner", options.user.trim());
    human.next_step(format!(
        "pm add-task --project-id {} --title <title> --assigned-to <who>",
        project.id()
    ));

    emit_success(ctx.output(), "add-project", &project.to_record(), &human)
}

pub fn run_list(ctx: &Context, user: Option<&str>) -> Result<()> {
    let storage = ctx.open_storage()?;
    let store = storage.load_store();

    let user_id = match user {
        Some(name) => Some(store.find_user_by_name(name)?.id()),
        None => None,
    };

    let projects: Vec<_> = match user_id {
        Some(id) => store.projects_of(id).collect(),
        None => store.projects().collect(),
    };

    let title = match user {
        Some(name) => format!("Projects for {}", name.trim()),
        None => "Projects".to_string(),
    };
    let human = HumanOutput::listing(&title, &projects);

    let report = ProjectListReport {
        user_id,
        total: projects.len(),
        projects: projects.iter().map(|project| project.to_record()).collect(),
    };
    emit_success(ctx.output(), "list-projects", &report, &human)
}

pub fn run_show(ctx: &Context, project_id: u64) -> Result<()> {
    let storage = ctx.open_storage()?;
    let store = storage.load_store();

    let project = store.project(project_id)?;
    let tasks: Vec<_> = store.tasks_of(project_id).collect();

    let mut human = HumanOutput::new(project.to_string());
    if !project.description().is_empty() {
        human.field("description", project.description());
    }
    match store.user(project.user_id()) {
        Ok(owner) => human.field("owner", owner.name()),
        Err(_) => human.warn(format!("owner user {} is missing", project.user_id())),
    }
    human.field("tasks", tasks.len().to_string());
    for task in &tasks {
        human.entry(task);
    }

    let report = ProjectShowReport {
        project: project.to_record(),
        tasks: tasks.iter().map(|task| task.to_record()).collect(),
    };
    emit_success(ctx.output(), "show-project", &report, &human)
}
