//! Application layer - pipeline orchestration.
//!
//! The application layer owns the fixed provisioning step order and the
//! required/best-effort command execution split. It talks to the outside
//! world only through the port traits in [`ports`].

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::{ProvisionService, SitePaths};
