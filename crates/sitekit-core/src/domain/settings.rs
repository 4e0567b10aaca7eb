//! The `SiteSettings` aggregate and its resolver.
//!
//! A `SiteSettings` is the fully-resolved, read-only description of the site
//! the operator wants to provision. Resolution is *total*: any well-typed
//! [`RawSiteConfig`] produces a valid `SiteSettings`, with computed defaults
//! filling whatever the source config omits.
//!
//! # Resolution order
//!
//! 1. Hosts: taken verbatim from the raw config when non-empty (first entry
//!    becomes the main host), otherwise a single `"{site}.local"` host is
//!    synthesized.
//! 2. Custom fields overlay the computed defaults — custom always wins.
//! 3. Legacy alias keys (`wp-content`, `prefix`, `dbprefix`) fill the
//!    canonical field only while it is still unset. Alias checks run in
//!    declared order, so `dbprefix` overwrites a value that the `prefix`
//!    check supplied. The canonical key always beats both.

use std::collections::HashSet;

use serde::Deserialize;

// ── Raw input ─────────────────────────────────────────────────────────────────

/// One site entry as it appears in the (already schema-validated) config
/// document: a host list plus the free-form `custom` settings table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSiteConfig {
    /// Hostnames for the site. May be empty; a default is synthesized.
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Site-specific settings.
    #[serde(default)]
    pub custom: RawSiteSettings,
}

/// Site-specific settings before resolution.
///
/// Every field is optional; [`SiteSettings::resolve`] supplies the defaults.
/// The legacy alias keys are kept as distinct fields so their precedence can
/// be applied explicitly instead of through a lookup chain.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSiteSettings {
    /// Whether this site runs WordPress at all.
    pub wp: Option<bool>,

    /// Repository to clone as the whole htdocs directory.
    pub htdocs: Option<String>,

    /// Repository to clone as the wp-content directory.
    pub wp_content: Option<String>,
    /// Legacy spelling of `wp_content`.
    #[serde(rename = "wp-content")]
    pub wp_content_legacy: Option<String>,

    /// Database table prefix.
    pub db_prefix: Option<String>,
    /// Legacy spellings of `db_prefix`, applied in this order.
    pub prefix: Option<String>,
    pub dbprefix: Option<String>,

    pub locale: Option<String>,
    pub version: Option<String>,
    pub title: Option<String>,
    pub admin_user: Option<String>,
    pub admin_password: Option<String>,
    pub admin_email: Option<String>,

    pub multisite: Option<MultisiteMode>,
    pub xipio: Option<bool>,
    pub download_wp: Option<bool>,

    pub delete_default_plugins: Option<bool>,
    pub delete_default_themes: Option<bool>,

    pub plugins: Vec<RawItemSpec>,
    pub themes: Vec<RawItemSpec>,
    pub skip_plugins: Vec<String>,
}

/// One plugin or theme entry before resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItemSpec {
    /// Item slug. The legacy format keyed this by the item type.
    #[serde(alias = "plugin", alias = "theme")]
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub activate: bool,
    /// Plugins only; ignored for themes at command-build time.
    #[serde(default, rename = "activate-network")]
    pub activate_network: bool,
}

// ── Resolved values ───────────────────────────────────────────────────────────

/// WordPress multisite mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultisiteMode {
    #[default]
    None,
    Subdomain,
    Subdirectory,
}

impl MultisiteMode {
    pub const fn enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// A plugin or theme to install, with its command flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub name: String,
    pub version: Option<String>,
    pub force: bool,
    pub activate: bool,
    pub activate_network: bool,
}

impl ItemSpec {
    /// An item with no install flags set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            force: false,
            activate: false,
            activate_network: false,
        }
    }
}

impl From<RawItemSpec> for ItemSpec {
    fn from(raw: RawItemSpec) -> Self {
        Self {
            name: raw.name,
            version: raw.version,
            force: raw.force,
            activate: raw.activate,
            activate_network: raw.activate_network,
        }
    }
}

/// Which kind of installable content an [`ItemSpec`] describes.
///
/// Determines the install-command prefix and which flags are allowed
/// (`activate-network` is plugin-only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Plugin,
    Theme,
}

impl ItemKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plugin => "plugin",
            Self::Theme => "theme",
        }
    }
}

/// Database connection parameters for the development environment.
#[derive(Debug, Clone, Deserialize)]
pub struct DbCredentials {
    pub host: String,
    pub user: String,
    pub pass: String,
}

impl Default for DbCredentials {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            user: "wp".into(),
            pass: "wp".into(),
        }
    }
}

/// Process-wide settings independent of any one site.
///
/// Plugin/theme lists here are *merged* with (not replaced by) the site's own
/// lists: override items first, site items appended, no deduplication.
#[derive(Debug, Clone, Default)]
pub struct GlobalOverrides {
    pub plugins: Vec<ItemSpec>,
    pub themes: Vec<ItemSpec>,
    pub db: DbCredentials,
}

// ── SiteSettings ──────────────────────────────────────────────────────────────

/// Fully-resolved, immutable view of one site's configuration.
///
/// Invariant: `hosts` is never empty and `main_host` is always its first
/// element (or the synthesized default when the source config had no hosts).
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub site_name: String,
    pub main_host: String,
    pub hosts: Vec<String>,

    pub htdocs_repo: Option<String>,
    pub wp_content_repo: Option<String>,
    pub db_prefix: Option<String>,

    pub locale: String,
    pub version: String,
    pub title: String,
    pub admin_user: String,
    pub admin_password: String,
    pub admin_email: String,

    pub multisite: MultisiteMode,
    pub wordpress: bool,
    pub xipio: bool,
    pub download_wp: bool,

    pub delete_default_plugins: bool,
    pub delete_default_themes: bool,

    pub plugins: Vec<ItemSpec>,
    pub themes: Vec<ItemSpec>,
    pub skip_plugins: HashSet<String>,
}

impl SiteSettings {
    /// Resolve raw site config into a canonical settings view.
    ///
    /// Total over any well-typed input; never fails.
    pub fn resolve(site_name: &str, raw: RawSiteConfig) -> Self {
        // 1. Hosts: verbatim when declared, otherwise one synthesized host.
        let (main_host, hosts) = if raw.hosts.is_empty() {
            let host = format!("{site_name}.local");
            (host.clone(), vec![host])
        } else {
            (raw.hosts[0].clone(), raw.hosts)
        };

        let custom = raw.custom;

        // 3. Legacy aliases. Each check fills the canonical slot only while it
        //    is unset in the *custom* config; the checks run in declared order
        //    so `dbprefix` replaces what the `prefix` check supplied.
        let wp_content_repo = custom.wp_content.or(custom.wp_content_legacy);
        let db_prefix = match custom.db_prefix {
            Some(p) => Some(p),
            None => custom.dbprefix.or(custom.prefix),
        };

        Self {
            site_name: site_name.to_string(),
            admin_email: custom
                .admin_email
                .unwrap_or_else(|| format!("admin@{main_host}")),
            main_host,
            hosts,
            htdocs_repo: custom.htdocs,
            wp_content_repo,
            db_prefix,
            locale: custom.locale.unwrap_or_else(|| "en_US".into()),
            version: custom.version.unwrap_or_else(|| "latest".into()),
            title: custom.title.unwrap_or_else(|| site_name.to_string()),
            admin_user: custom.admin_user.unwrap_or_else(|| "admin".into()),
            admin_password: custom.admin_password.unwrap_or_else(|| "password".into()),
            multisite: custom.multisite.unwrap_or_default(),
            wordpress: custom.wp.unwrap_or(true),
            xipio: custom.xipio.unwrap_or(true),
            download_wp: custom.download_wp.unwrap_or(true),
            delete_default_plugins: custom.delete_default_plugins.unwrap_or(false),
            delete_default_themes: custom.delete_default_themes.unwrap_or(false),
            plugins: custom.plugins.into_iter().map(ItemSpec::from).collect(),
            themes: custom.themes.into_iter().map(ItemSpec::from).collect(),
            skip_plugins: custom.skip_plugins.into_iter().collect(),
        }
    }

    /// Whether the whole htdocs directory comes from a custom repository.
    pub fn has_htdocs_repo(&self) -> bool {
        self.htdocs_repo.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// Whether wp-content comes from a custom repository.
    pub fn has_wp_content_repo(&self) -> bool {
        self.wp_content_repo
            .as_deref()
            .is_some_and(|r| !r.is_empty())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
