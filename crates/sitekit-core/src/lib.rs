//! Sitekit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sitekit
//! site provisioner, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           sitekit-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (ProvisionService)             │
//! │      Orchestrates the Step Order        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: Runner, Database, Filesystem) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     sitekit-adapters (Infrastructure)   │
//! │  (SystemRunner, LocalFilesystem, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (SiteSettings, CommandBuilder, Nginx)   │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitekit_core::{
//!     application::ProvisionService,
//!     domain::{GlobalOverrides, RawSiteConfig, SiteSettings},
//! };
//!
//! // 1. Resolve the site settings (total over any well-typed input)
//! let settings = SiteSettings::resolve("mysite", RawSiteConfig::default());
//!
//! // 2. Use application service (with injected adapters)
//! let service = ProvisionService::new(
//!     runner, database, filesystem, paths, settings, overrides, nginx_template,
//! );
//! service.provision().unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ProvisionService, SitePaths,
        ports::{CommandOutput, Database, Filesystem, ProcessRunner, QueryResult},
    };
    pub use crate::domain::{
        CommandBuilder, CommandSpec, DbCredentials, FlagValue, GlobalOverrides, ItemKind,
        ItemSpec, MultisiteMode, NginxConfigPatcher, PatchOutcome, RawItemSpec, RawSiteConfig,
        RawSiteSettings, SiteSettings,
    };
    pub use crate::error::{SitekitError, SitekitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
