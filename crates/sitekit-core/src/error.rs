//! Unified error handling for Sitekit Core.
//!
//! This module provides a unified error type that wraps application errors,
//! with rich context and user-actionable suggestions. There is no domain
//! error variant: settings resolution is total over any well-typed input.

use thiserror::Error;

use crate::application::ApplicationError;

/// Root error type for Sitekit Core operations.
#[derive(Debug, Error, Clone)]
pub enum SitekitError {
    /// Errors from the application layer (pipeline orchestration failures).
    #[error("Provisioning error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SitekitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in Sitekit".into(),
                "Please report this issue at: https://github.com/sitekit-dev/sitekit/issues"
                    .into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display and exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A required external command failed.
    Command,
    /// A database statement failed.
    Database,
    /// Configuration problem (including connection parameters).
    Configuration,
    /// Internal/system error.
    Internal,
}

/// Convenient result type alias.
pub type SitekitResult<T> = Result<T, SitekitError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> SitekitResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> SitekitResult<T> {
        self.map_err(|e| SitekitError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
