//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from external systems.
//! The `sitekit-adapters` crate provides implementations.

use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::CommandSpec;
use crate::error::SitekitResult;

// ── Process execution ─────────────────────────────────────────────────────────

/// Captured result of one external command execution.
///
/// A non-zero exit status is *data*, not an error: the pipeline decides per
/// step whether to abort (required mode) or log and continue (best-effort
/// mode). Only spawn failures surface as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
}

impl CommandOutput {
    pub const fn success(&self) -> bool {
        self.status == 0
    }
}

/// Port for external command execution.
///
/// Implemented by:
/// - `sitekit_adapters::process::SystemRunner` (production)
/// - `sitekit_adapters::process::ScriptedRunner` (testing)
#[cfg_attr(test, automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run the command to completion, capturing stdout and the exit status.
    fn run(&self, spec: &CommandSpec) -> SitekitResult<CommandOutput>;
}

// ── Database access ───────────────────────────────────────────────────────────

/// Result of one SQL statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    rows: usize,
}

impl QueryResult {
    pub const fn with_rows(rows: usize) -> Self {
        Self { rows }
    }

    pub const fn row_count(&self) -> usize {
        self.rows
    }
}

/// Port for the database collaborator.
///
/// The pipeline issues only `SHOW DATABASES LIKE`, `CREATE DATABASE`, and
/// `GRANT` statements with the site identifier interpolated. Identifiers are
/// expected to be sanitized by the caller before they reach this port
/// (documented risk carried over from the legacy tool).
///
/// Implemented by:
/// - `sitekit_adapters::database::MysqlShell` (production)
/// - `sitekit_adapters::database::MemoryDatabase` (testing)
#[cfg_attr(test, automock)]
pub trait Database: Send + Sync {
    fn query(&self, sql: &str) -> SitekitResult<QueryResult>;
}

// ── Filesystem ────────────────────────────────────────────────────────────────

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sitekit_adapters::filesystem::LocalFilesystem` (production)
/// - `sitekit_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SitekitResult<()>;

    /// Write content to a file, creating it and any missing parent
    /// directories if absent.
    fn write_file(&self, path: &Path, content: &str) -> SitekitResult<()>;

    /// Read a file to a string.
    fn read_to_string(&self, path: &Path) -> SitekitResult<String>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SitekitResult<()>;
}
