//! Application layer errors.
//!
//! These errors represent orchestration failures: an external command that a
//! required step depends on exited non-zero, the database collaborator
//! refused a statement, or a filesystem operation failed. There is no
//! domain-error counterpart — settings resolution is total and the command
//! builder cannot fail.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving the provisioning pipeline.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A required external command exited non-zero.
    #[error("command `{command}` failed with status {status}")]
    CommandFailed {
        command: String,
        status: i32,
        /// Captured output, surfaced so the operator can see what the tool
        /// reported before aborting.
        output: String,
    },

    /// The executor could not start the external command at all.
    #[error("failed to spawn `{command}`: {reason}")]
    CommandSpawn { command: String, reason: String },

    /// A database statement failed.
    #[error("database error: {reason}")]
    Database { reason: String },

    /// The database connection could not be established.
    #[error("unable to connect to DB: {reason}")]
    DatabaseConnection { reason: String },

    /// Filesystem operation failed.
    #[error("filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CommandFailed {
                command, output, ..
            } => vec![
                format!("The command `{}` is required for provisioning", command),
                format!("Command output: {}", output.trim()),
                "Re-run provisioning once the cause is fixed; completed steps are skipped".into(),
            ],
            Self::CommandSpawn { command, .. } => vec![
                format!("Could not start `{}`", command),
                "Ensure the tool is installed and on PATH".into(),
            ],
            Self::Database { .. } => vec![
                "Check that the database server is running".into(),
                "Verify the credentials in the [overrides.db] config section".into(),
            ],
            Self::DatabaseConnection { .. } => vec![
                "Check that the database server is running and reachable".into(),
                "Verify host/user/pass in the [overrides.db] config section".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CommandFailed { .. } | Self::CommandSpawn { .. } => ErrorCategory::Command,
            Self::Database { .. } => ErrorCategory::Database,
            Self::DatabaseConnection { .. } => ErrorCategory::Configuration,
            Self::Filesystem { .. } => ErrorCategory::Internal,
        }
    }
}
