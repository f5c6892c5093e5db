//! pm task command implementations

use serde::Serialize;

use crate::cli::Context;
use crate::error::Result;
use crate::model::{Entity, TaskRecord, TaskStatus};
use crate::output::{emit_success, HumanOutput};

/// Options for `pm add-task`
pub struct AddOptions {
    pub project_id: u64,
    pub title: String,
    pub assigned_to: String,
    pub status: Option<String>,
}

/// Options for `pm list-tasks`
pub struct ListOptions {
    pub project_id: Option<u64>,
    pub status: Option<String>,
}

#[derive(Serialize)]
struct TaskListReport {
    total: usize,
    tasks: Vec<TaskRecord>,
}

pub fn run_add(ctx: &Context, options: AddOptions) -> Result<()> {
    let storage = ctx.open_storage()?;
    let mut store = storage.load_store();

    let status = options
        .status
        .unwrap_or_else(|| storage.config().tasks.default_status.clone());
    let task = store
        .create_task(
            options.project_id,
            &options.title,
            &status,
            &options.assigned_to,
        )?
        .clone();
    storage.save_tasks(&store)?;

    let mut human = HumanOutput::new(format!("Task added: {task}"));
    if task.status() == TaskStatus::Incomplete {
        human.next_step(format!("pm complete-task --task-id {}", task.id()));
    }

    emit_success(ctx.output(), "add-task", &task.to_record(), &human)
}

pub fn run_list(ctx: &Context, options: ListOptions) -> Result<()> {
    let storage = ctx.open_storage()?;
    let store = storage.load_store();

    let status = options
        .status
        .as_deref()
        .map(str::parse::<TaskStatus>)
        .transpose()?;
    if let Some(project_id) = options.project_id {
        store.project(project_id)?;
    }

    let candidates: Vec<_> = match status {
        Some(status) => store.tasks_with_status(status).collect(),
        None => store.tasks().collect(),
    };
    let tasks: Vec<_> = candidates
        .into_iter()
        .filter(|task| options.project_id.map_or(true, |id| task.project_id() == id))
        .collect();

    let human = HumanOutput::listing("Tasks", &tasks);

    let report = TaskListReport {
        total: tasks.len(),
        tasks: tasks.iter().map(|task| task.to_record()).collect(),
    };
    emit_success(ctx.output(), "list-tasks", &report, &human)
}

pub fn run_complete(ctx: &Context, task_id: u64) -> Result<()> {
    let storage = ctx.open_storage()?;
    let mut store = storage.load_store();

    let task = store.complete_task(task_id)?.clone();
    storage.save_tasks(&store)?;

    let human = HumanOutput::new(format!("Task has been marked complete: {task}"));
    emit_success(ctx.output(), "complete-task", &task.to_record(), &human)
}
