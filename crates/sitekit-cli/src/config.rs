//! Sites configuration.
//!
//! [`SitesConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the already-parsed
//! raw site entries.
//!
//! # File format
//!
//! ```toml
//! www_root = "/srv/www"
//!
//! [sites.mysite]
//! hosts = ["mysite.test", "www.mysite.test"]
//!
//! [sites.mysite.custom]
//! wp_content = "git@example.org:content.git"
//! plugins = [{ name = "akismet", activate = true }]
//!
//! [overrides]
//! plugins = [{ name = "query-monitor" }]
//!
//! [overrides.db]
//! host = "localhost"
//! user = "wp"
//! pass = "wp"
//! ```
//!
//! # Resolution order
//!
//! 1. `--config <FILE>` — must exist, otherwise a configuration error.
//! 2. `sitekit.toml` in the current directory.
//! 3. The platform config directory (`~/.config/sitekit/sitekit.toml` on
//!    Linux).
//! 4. Built-in empty defaults when no file is found.

use std::{collections::BTreeMap, path::PathBuf};

use serde::Deserialize;

use sitekit_core::domain::{DbCredentials, GlobalOverrides, ItemSpec, RawItemSpec, RawSiteConfig};

use crate::error::{CliError, CliResult};

/// Default root under which site directories live.
const DEFAULT_WWW_ROOT: &str = "/srv/www";

/// Top-level sites configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SitesConfig {
    /// Root directory under which each site gets `<www_root>/<name>`.
    pub www_root: Option<PathBuf>,

    /// Site entries keyed by name.  `BTreeMap` keeps listing output stable.
    pub sites: BTreeMap<String, RawSiteConfig>,

    /// Process-wide overrides applied to every site.
    pub overrides: RawOverrides,
}

/// Raw `[overrides]` table before conversion to domain types.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOverrides {
    pub plugins: Vec<RawItemSpec>,
    pub themes: Vec<RawItemSpec>,
    pub db: DbCredentials,
}

impl RawOverrides {
    /// Convert to the domain-level overrides struct.
    pub fn into_overrides(self) -> GlobalOverrides {
        GlobalOverrides {
            plugins: self.plugins.into_iter().map(ItemSpec::from).collect(),
            themes: self.themes.into_iter().map(ItemSpec::from).collect(),
            db: self.db,
        }
    }
}

impl SitesConfig {
    /// Load configuration.
    ///
    /// An explicitly passed `--config` path must exist.  When no path is
    /// passed and no file is found at the default locations, the built-in
    /// empty config is returned so commands like `completions` still work.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let path = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::ConfigError {
                        message: format!("config file not found: {}", path.display()),
                        source: None,
                    });
                }
                path.clone()
            }
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| CliError::ConfigError {
            message: format!("failed to read {}", path.display()),
            source: Some(Box::new(e)),
        })?;

        toml::from_str(&contents).map_err(|e| CliError::ConfigError {
            message: format!("failed to parse {}", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Resolved root directory for site checkouts.
    pub fn www_root(&self) -> PathBuf {
        self.www_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WWW_ROOT))
    }

    /// First existing default config location, if any.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    fn default_path() -> Option<PathBuf> {
        let local = PathBuf::from("sitekit.toml");
        if local.exists() {
            return Some(local);
        }

        directories::ProjectDirs::from("dev", "sitekit", "sitekit")
            .map(|d| d.config_dir().join("sitekit.toml"))
            .filter(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_parses_to_defaults() {
        let cfg: SitesConfig = toml::from_str("").unwrap();
        assert!(cfg.sites.is_empty());
        assert!(cfg.overrides.plugins.is_empty());
        assert_eq!(cfg.www_root(), PathBuf::from("/srv/www"));
    }

    #[test]
    fn parses_sites_and_custom_settings() {
        let cfg: SitesConfig = toml::from_str(
            r#"
            www_root = "/var/www"

            [sites.mysite]
            hosts = ["mysite.test"]

            [sites.mysite.custom]
            wp_content = "git@example.org:content.git"
            plugins = [{ name = "akismet", activate = true }]

            [sites.plain]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.www_root(), PathBuf::from("/var/www"));
        assert_eq!(cfg.sites.len(), 2);

        let mysite = &cfg.sites["mysite"];
        assert_eq!(mysite.hosts, ["mysite.test"]);
        assert_eq!(
            mysite.custom.wp_content.as_deref(),
            Some("git@example.org:content.git")
        );
        assert!(mysite.custom.plugins[0].activate);

        assert!(cfg.sites["plain"].hosts.is_empty());
    }

    #[test]
    fn parses_overrides_table() {
        let cfg: SitesConfig = toml::from_str(
            r#"
            [overrides]
            plugins = [{ name = "query-monitor" }]
            themes = [{ name = "astra" }]

            [overrides.db]
            host = "127.0.0.1"
            user = "root"
            pass = "secret"
            "#,
        )
        .unwrap();

        let overrides = cfg.overrides.into_overrides();
        assert_eq!(overrides.plugins[0].name, "query-monitor");
        assert_eq!(overrides.themes[0].name, "astra");
        assert_eq!(overrides.db.host, "127.0.0.1");
        assert_eq!(overrides.db.user, "root");
    }

    #[test]
    fn legacy_spellings_are_accepted() {
        let cfg: SitesConfig = toml::from_str(
            r#"
            [sites.legacy.custom]
            "wp-content" = "git@example.org:old.git"
            dbprefix = "old_"
            "#,
        )
        .unwrap();

        let custom = &cfg.sites["legacy"].custom;
        assert_eq!(
            custom.wp_content_legacy.as_deref(),
            Some("git@example.org:old.git")
        );
        assert_eq!(custom.dbprefix.as_deref(), Some("old_"));
    }

    #[test]
    fn explicit_missing_file_is_a_config_error() {
        let missing = PathBuf::from("/definitely/not/here.toml");
        let err = SitesConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
    }
}
