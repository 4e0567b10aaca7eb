//! Infrastructure adapters for Sitekit.
//!
//! This crate implements the ports defined in `sitekit_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod database;
pub mod filesystem;
pub mod nginx_template;
pub mod process;

// Re-export commonly used adapters
pub use database::{MemoryDatabase, MysqlShell};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use nginx_template::DEFAULT_NGINX_TEMPLATE;
pub use process::{ScriptedRunner, SystemRunner};
