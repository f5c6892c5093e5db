//! Domain entities for pm.
//!
//! Users own projects and projects own tasks. Ownership is expressed only
//! through foreign-key ids (`Project::user_id`, `Task::project_id`); the
//! owned collections are derived by the [`crate::store::Store`] on demand.
//!
//! Constructors validate and normalize their inputs. A freshly constructed
//! entity has id `0` ("unassigned") until a [`crate::registry::Registry`]
//! gives it one.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Storage/display format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Common behaviour the registry needs from every entity.
pub trait Entity {
    /// Singular, lowercase entity name used in messages and logs.
    const KIND: &'static str;

    fn id(&self) -> u64;

    /// Only the registry should call this.
    fn set_id(&mut self, id: u64);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: u64,
    name: String,
    email: String,
}

impl User {
    pub fn new(name: &str, email: &str) -> Result<Self> {
        let name = required("name", name)?;
        let email = validate_email(email)?;
        Ok(Self { id: 0, name, email })
    }

    pub fn from_record(record: UserRecord) -> Result<Self> {
        let mut user = Self::new(&record.name, &record.email)?;
        user.id = record.id;
        Ok(user)
    }

    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {}, Name: {} Email: {}", self.id, self.name, self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: u64,
    user_id: u64,
    title: String,
    description: String,
    due_date: NaiveDate,
}

impl Project {
    pub fn new(user_id: u64, title: &str, description: &str, due_date: &str) -> Result<Self> {
        let title = required("title", title)?;
        let due_date = parse_due_date(due_date)?;
        Ok(Self {
            id: 0,
            user_id,
            title,
            description: description.trim().to_string(),
            due_date,
        })
    }

    pub fn from_record(record: ProjectRecord) -> Result<Self> {
        let mut project = Self::new(
            record.user_id,
            &record.title,
            &record.description,
            &record.due_date,
        )?;
        project.id = record.id;
        Ok(project)
    }

    pub fn to_record(&self) -> ProjectRecord {
        ProjectRecord {
            id: self.id,
            user_id: self.user_id,
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date_iso(),
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Due date in normalized `YYYY-MM-DD` form.
    pub fn due_date_iso(&self) -> String {
        self.due_date.format(DUE_DATE_FORMAT).to_string()
    }
}

impl Entity for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {} Due: {}",
            self.id,
            self.title,
            self.due_date_iso()
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskStatus {
    #[default]
    Incomplete,
    Complete,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Incomplete => "Incomplete",
            TaskStatus::Complete => "Complete",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Incomplete" => Ok(TaskStatus::Incomplete),
            "Complete" => Ok(TaskStatus::Complete),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: u64,
    project_id: u64,
    title: String,
    status: TaskStatus,
    assigned_to: String,
}

impl Task {
    pub fn new(project_id: u64, title: &str, status: &str, assigned_to: &str) -> Result<Self> {
        let title = required("title", title)?;
        let status = status.parse()?;
        Ok(Self {
            id: 0,
            project_id,
            title,
            status,
            assigned_to: assigned_to.trim().to_string(),
        })
    }

    pub fn from_record(record: TaskRecord) -> Result<Self> {
        let mut task = Self::new(
            record.project_id,
            &record.title,
            &record.status,
            &record.assigned_to,
        )?;
        task.id = record.id;
        Ok(task)
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id,
            project_id: self.project_id,
            title: self.title.clone(),
            status: self.status.as_str().to_string(),
            assigned_to: self.assigned_to.clone(),
        }
    }

    pub fn project_id(&self) -> u64 {
        self.project_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn assigned_to(&self) -> &str {
        &self.assigned_to
    }

    /// Idempotent: completing a completed task is a no-op.
    pub fn mark_complete(&mut self) {
        self.status = TaskStatus::Complete;
    }
}

impl Entity for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {} ({}), Assigned to: {}",
            self.id, self.title, self.status, self.assigned_to
        )
    }
}

// =============================================================================
// Persisted records
// =============================================================================

/// On-disk form of a [`User`]. Field order is id, then data fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// On-disk form of a [`Project`]. Field order is id, foreign key, data fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: String,
}

/// On-disk form of a [`Task`]. Field order is id, foreign key, data fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: u64,
    pub project_id: u64,
    pub title: String,
    pub status: String,
    /// Older files store numeric user ids here.
    #[serde(deserialize_with = "string_or_number")]
    pub assigned_to: String,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

// =============================================================================
// Field validation
// =============================================================================

fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

fn validate_email(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if !trimmed.contains('@') {
        return Err(Error::InvalidEmail(value.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// Chrono's `%Y` accepts signs and more than four digits, so the shape is
/// checked first.
pub fn parse_due_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let bytes = trimmed.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(idx, b)| idx == 4 || idx == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(Error::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_fields_are_trimmed() {
        let user = User::new("  Ian ", " ian@email.com ").unwrap();
        assert_eq!(user.name(), "Ian");
        assert_eq!(user.email(), "ian@email.com");
        assert_eq!(user.id(), 0);
    }

    #[test]
    fn user_rejects_email_without_at() {
        let err = User::new("Ian", "ian.email.com").unwrap_err();
        assert!(matches!(err, Error::InvalidEmail(_)));
    }

    #[test]
    fn user_rejects_blank_name() {
        let err = User::new("   ", "ian@email.com").unwrap_err();
        assert!(matches!(err, Error::EmptyField("name")));
    }

    #[test]
    fn project_normalizes_due_date() {
        let project = Project::new(1, " Testing CLI ", " desc ", " 2025-08-09 ").unwrap();
        assert_eq!(project.title(), "Testing CLI");
        assert_eq!(project.description(), "desc");
        assert_eq!(project.due_date_iso(), "2025-08-09");
    }

    #[test]
    fn project_rejects_bad_dates() {
        for bad in [
            "2025-13-01",
            "2025-02-30",
            "09-08-2025",
            "2025/08/09",
            "2025-8-9",
            "+2025-08-09",
            "tomorrow",
            "",
        ] {
            let err = Project::new(1, "T", "", bad).unwrap_err();
            assert!(matches!(err, Error::InvalidDate(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn leap_day_is_a_valid_due_date() {
        assert!(Project::new(1, "T", "", "2024-02-29").is_ok());
        assert!(Project::new(1, "T", "", "2023-02-29").is_err());
    }

    #[test]
    fn task_status_parsing() {
        assert_eq!(" Complete ".parse::<TaskStatus>().unwrap(), TaskStatus::Complete);
        assert_eq!("Incomplete".parse::<TaskStatus>().unwrap(), TaskStatus::Incomplete);
        assert!("complete".parse::<TaskStatus>().is_err());
        assert!("Done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn mark_complete_is_idempotent() {
        let mut task = Task::new(1, "Write tests", "Incomplete", "1").unwrap();
        task.mark_complete();
        let once = task.clone();
        task.mark_complete();
        assert_eq!(task, once);
        assert_eq!(task.status(), TaskStatus::Complete);
    }

    #[test]
    fn task_record_accepts_numeric_assignee() {
        let record: TaskRecord = serde_json::from_str(
            r#"{"id": 3, "project_id": 1, "title": "Write tests", "status": "Incomplete", "assigned_to": 1}"#,
        )
        .unwrap();
        assert_eq!(record.assigned_to, "1");
    }

    #[test]
    fn records_serialize_in_stable_key_order() {
        let mut project = Project::new(4, "Launch", "ship it", "2025-08-09").unwrap();
        project.set_id(2);
        let json = serde_json::to_string(&project.to_record()).unwrap();
        assert_eq!(
            json,
            r#"{"id":2,"user_id":4,"title":"Launch","description":"ship it","due_date":"2025-08-09"}"#
        );
    }

    #[test]
    fn display_matches_listing_format() {
        let mut task = Task::new(1, "Write tests", "Incomplete", "1").unwrap();
        task.set_id(1);
        assert_eq!(
            task.to_string(),
            "ID: 1, Title: Write tests (Incomplete), Assigned to: 1"
        );
    }
}
