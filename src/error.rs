//! Error types for pm
//!
//! Exit codes:
//! - 0: Success
//! - 2: Validation error (bad field value, bad config, bad argument)
//! - 3: Reference error (user, project, or task not found)
//! - 4: Operation failed (storage I/O or serialization)

use thiserror::Error;

/// Exit codes for pm CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const REFERENCE_ERROR: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for pm operations
#[derive(Error, Debug)]
pub enum Error {
    // Validation errors (exit code 2)
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Invalid due date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid status '{0}': expected Incomplete or Complete")]
    InvalidStatus(String),

    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: &'static str, id: u64 },

    #[error("{entity} id {id} leaves no room for further ids")]
    IdExhausted { entity: &'static str, id: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Reference errors (exit code 3)
    #[error("User '{0}' could not be found")]
    UserNotFound(String),

    #[error("Project ID '{0}' could not be found")]
    ProjectNotFound(u64),

    #[error("Task ID {0} could not be found")]
    TaskNotFound(u64),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidEmail(_)
            | Error::EmptyField(_)
            | Error::InvalidDate(_)
            | Error::InvalidStatus(_)
            | Error::DuplicateId { .. }
            | Error::IdExhausted { .. }
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_) => exit_codes::VALIDATION_ERROR,

            Error::UserNotFound(_) | Error::ProjectNotFound(_) | Error::TaskNotFound(_) => {
                exit_codes::REFERENCE_ERROR
            }

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Stable error category used in JSON output
    pub fn kind(&self) -> &'static str {
        match self.exit_code() {
            exit_codes::VALIDATION_ERROR => "validation",
            exit_codes::REFERENCE_ERROR => "reference",
            _ => "storage",
        }
    }

    /// Structured details for machine consumers, when the error carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::UserNotFound(name) => Some(serde_json::json!({
                "entity": "user",
                "name": name,
            })),
            Error::ProjectNotFound(id) => Some(serde_json::json!({
                "entity": "project",
                "id": id,
            })),
            Error::TaskNotFound(id) => Some(serde_json::json!({
                "entity": "task",
                "id": id,
            })),
            Error::DuplicateId { entity, id } | Error::IdExhausted { entity, id } => {
                Some(serde_json::json!({
                    "entity": entity,
                    "id": id,
                }))
            }
            Error::InvalidConfig(message) => Some(serde_json::json!({
                "message": message,
            })),
            _ => None,
        }
    }
}

/// Result type alias for pm operations
pub type Result<T> = std::result::Result<T, Error>;

/// The `error` object of a `--json` failure envelope
#[derive(serde::Serialize)]
pub struct JsonError {
    pub message: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            message: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
            details: err.details(),
        }
    }
}
