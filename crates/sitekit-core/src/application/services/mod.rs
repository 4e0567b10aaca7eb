//! Application services.

pub mod provision_service;

pub use provision_service::{ProvisionService, SitePaths};
