//! Domain layer - pure provisioning logic.
//!
//! No I/O lives here. The three pillars:
//!
//! - [`settings`] — raw per-site configuration resolved into an immutable
//!   [`SiteSettings`] view (computed defaults + legacy alias handling).
//! - [`command`] — typed external-command construction with well-defined
//!   flag-value semantics.
//! - [`nginx`] — idempotent virtual-host config rewriting.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

pub mod command;
pub mod nginx;
pub mod settings;

pub use command::{CommandBuilder, CommandSpec, FlagValue};
pub use nginx::{NginxConfigPatcher, PatchOutcome};
pub use settings::{
    DbCredentials, GlobalOverrides, ItemKind, ItemSpec, MultisiteMode, RawItemSpec, RawSiteConfig,
    RawSiteSettings, SiteSettings,
};
