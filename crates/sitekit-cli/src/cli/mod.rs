//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sitekit",
    bin_name = "sitekit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f527} Local development-site provisioner",
    long_about = "Sitekit provisions local WordPress development sites: \
                  database, logs, nginx virtual host, core download, \
                  wp-config, install, and plugin/theme content.",
    after_help = "EXAMPLES:\n\
        \x20 sitekit provision mysite\n\
        \x20 sitekit provision mysite --vm-dir /srv/www/mysite\n\
        \x20 sitekit sites\n\
        \x20 sitekit completions bash > /usr/share/bash-completion/completions/sitekit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Provision a configured site end to end.
    #[command(
        visible_alias = "p",
        about = "Provision a site",
        after_help = "EXAMPLES:\n\
            \x20 sitekit provision mysite\n\
            \x20 sitekit provision mysite --vm-dir /srv/www/mysite\n\
            \x20 sitekit provision mysite -c sites.toml -vv"
    )]
    Provision(ProvisionArgs),

    /// List the sites declared in the configuration file.
    #[command(
        visible_alias = "ls",
        about = "List configured sites",
        after_help = "EXAMPLES:\n\
            \x20 sitekit sites\n\
            \x20 sitekit sites -c sites.toml"
    )]
    Sites(SitesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sitekit completions bash > ~/.local/share/bash-completion/completions/sitekit\n\
            \x20 sitekit completions zsh  > ~/.zfunc/_sitekit\n\
            \x20 sitekit completions fish > ~/.config/fish/completions/sitekit.fish"
    )]
    Completions(CompletionsArgs),
}

// ── provision ─────────────────────────────────────────────────────────────────

/// Arguments for `sitekit provision`.
#[derive(Debug, Args)]
pub struct ProvisionArgs {
    /// Site name; must match a `[sites.<name>]` entry in the config file.
    #[arg(value_name = "SITE", help = "Site name from the configuration file")]
    pub site: String,

    /// Root directory for the site.
    #[arg(
        long = "vm-dir",
        value_name = "DIR",
        help = "Site root directory (default: <www-root>/<site>)"
    )]
    pub vm_dir: Option<PathBuf>,

    /// Location of the generated nginx virtual-host config.
    #[arg(
        long = "nginx-config",
        value_name = "FILE",
        help = "Nginx config path (default: <vm-dir>/provision/nginx.conf)"
    )]
    pub nginx_config: Option<PathBuf>,
}

// ── sites ─────────────────────────────────────────────────────────────────────

/// Arguments for `sitekit sites`.
#[derive(Debug, Args)]
pub struct SitesArgs {
    /// One name per line instead of the table.
    #[arg(long = "names-only", help = "Print bare site names")]
    pub names_only: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sitekit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
