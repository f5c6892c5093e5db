//! The in-memory store for users, projects, and tasks.
//!
//! A `Store` owns one [`Registry`] per entity type and is the only place that
//! checks foreign keys. Both references are checked at creation time:
//! a project needs an existing user, a task needs an existing project.
//! Hydration from storage skips those checks since collections load
//! independently.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{
    Entity, Project, ProjectRecord, Task, TaskRecord, TaskStatus, User, UserRecord,
};
use crate::registry::{IdPolicy, Registry};

#[derive(Debug, Clone, Default)]
pub struct Store {
    users: Registry<User>,
    projects: Registry<Project>,
    tasks: Registry<Task>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Creation
    // =========================================================================

    pub fn create_user(&mut self, name: &str, email: &str) -> Result<&User> {
        let user = User::new(name, email)?;
        let id = self.users.insert(user, IdPolicy::Assign)?;
        debug!(id, "created user");
        self.user(id)
    }

    pub fn create_project(
        &mut self,
        user_id: u64,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> Result<&Project> {
        let project = Project::new(user_id, title, description, due_date)?;
        if !self.users.contains(user_id) {
            return Err(Error::UserNotFound(user_id.to_string()));
        }
        let id = self.projects.insert(project, IdPolicy::Assign)?;
        debug!(id, user_id, "created project");
        self.project(id)
    }

    pub fn create_task(
        &mut self,
        project_id: u64,
        title: &str,
        status: &str,
        assigned_to: &str,
    ) -> Result<&Task> {
        if !self.projects.contains(project_id) {
            return Err(Error::ProjectNotFound(project_id));
        }
        let task = Task::new(project_id, title, status, assigned_to)?;
        let id = self.tasks.insert(task, IdPolicy::Assign)?;
        debug!(id, project_id, "created task");
        self.task(id)
    }

    /// Mark a task complete. Completing an already complete task succeeds.
    pub fn complete_task(&mut self, task_id: u64) -> Result<&Task> {
        let task = self
            .tasks
            .get_mut(task_id)
            .ok_or(Error::TaskNotFound(task_id))?;
        task.mark_complete();
        debug!(id = task_id, "completed task");
        Ok(&*task)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn user(&self, id: u64) -> Result<&User> {
        self.users
            .get(id)
            .ok_or_else(|| Error::UserNotFound(id.to_string()))
    }

    pub fn project(&self, id: u64) -> Result<&Project> {
        self.projects.get(id).ok_or(Error::ProjectNotFound(id))
    }

    pub fn task(&self, id: u64) -> Result<&Task> {
        self.tasks.get(id).ok_or(Error::TaskNotFound(id))
    }

    /// First user (by id) whose name equals `name` after trimming.
    pub fn find_user_by_name(&self, name: &str) -> Result<&User> {
        let wanted = name.trim();
        self.users
            .iter()
            .find(|user| user.name() == wanted)
            .ok_or_else(|| Error::UserNotFound(wanted.to_string()))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn projects_of(&self, user_id: u64) -> impl Iterator<Item = &Project> {
        self.projects
            .iter()
            .filter(move |project| project.user_id() == user_id)
    }

    pub fn tasks_of(&self, project_id: u64) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.project_id() == project_id)
    }

    pub fn tasks_with_status(&self, status: TaskStatus) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |task| task.status() == status)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    // =========================================================================
    // Hydrate / dehydrate
    // =========================================================================

    /// Load user records, keeping their stored ids. Returns how many were loaded.
    pub fn hydrate_users(&mut self, records: Vec<UserRecord>) -> usize {
        hydrate_into(&mut self.users, records, User::from_record)
    }

    pub fn hydrate_projects(&mut self, records: Vec<ProjectRecord>) -> usize {
        hydrate_into(&mut self.projects, records, Project::from_record)
    }

    pub fn hydrate_tasks(&mut self, records: Vec<TaskRecord>) -> usize {
        hydrate_into(&mut self.tasks, records, Task::from_record)
    }

    pub fn user_records(&self) -> Vec<UserRecord> {
        self.users.iter().map(User::to_record).collect()
    }

    pub fn project_records(&self) -> Vec<ProjectRecord> {
        self.projects.iter().map(Project::to_record).collect()
    }

    pub fn task_records(&self) -> Vec<TaskRecord> {
        self.tasks.iter().map(Task::to_record).collect()
    }
}

fn hydrate_into<T, R, F>(registry: &mut Registry<T>, records: Vec<R>, convert: F) -> usize
where
    T: Entity,
    F: Fn(R) -> Result<T>,
{
    let mut loaded = 0;
    for record in records {
        let inserted = convert(record)
            .and_then(|entity| registry.insert(entity, IdPolicy::PreserveGiven));
        match inserted {
            Ok(_) => loaded += 1,
            Err(err) => warn!(entity = T::KIND, error = %err, "skipping stored record"),
        }
    }
    loaded
}
