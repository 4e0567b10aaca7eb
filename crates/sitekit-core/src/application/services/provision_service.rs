//! Provision Service - the pipeline orchestrator.
//!
//! This service drives a site from "unprovisioned" to "ready" through a
//! fixed linear step order with two conditional branch points:
//!
//! ```text
//! create_db → create_logs → create_base_dir → create_nginx_config
//!    → [wordpress? no → DONE]
//!    → download_wordpress → create_wp_config → install_wordpress
//!    → [htdocs repo? yes → DONE]
//!    → provision_content
//!         → clone_wp_content (if configured)
//!         → [wp-content repo? yes → DONE]
//!         → install_plugins → install_themes → delete_default_content
//! ```
//!
//! Every step is idempotent, so a failed run can simply be re-invoked and it
//! resumes from wherever it left off. Required steps abort the run on
//! failure; best-effort steps log the captured output and continue. There
//! are no retries and no rollback.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Database, Filesystem, ProcessRunner},
    },
    domain::{
        CommandBuilder, CommandSpec, FlagValue, GlobalOverrides, ItemKind, ItemSpec,
        MultisiteMode, NginxConfigPatcher, PatchOutcome, SiteSettings,
    },
    error::SitekitResult,
};

/// Default plugins WordPress ships with.
const DEFAULT_PLUGINS: [&str; 2] = ["akismet", "hello"];

/// Default theme slug suffixes; each becomes `twenty{suffix}`.
const DEFAULT_THEMES: [&str; 6] = [
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
];

/// PHP constants injected into wp-config.php for development debugging.
const EXTRA_PHP: &str = "\
define( 'WP_DEBUG', true );
define( 'WP_DEBUG_DISPLAY', false );
define( 'WP_DEBUG_LOG', true );
define( 'SCRIPT_DEBUG', true );
define( 'JETPACK_DEV_DEBUG', true );
define( 'JETPACK_STAGING_MODE', true );";

// ── Site paths ────────────────────────────────────────────────────────────────

/// Filesystem layout of one site under its root directory.
#[derive(Debug, Clone)]
pub struct SitePaths {
    /// Root directory for the site.
    pub vm_dir: PathBuf,
    /// Location of the generated nginx virtual-host config.
    pub nginx_config: PathBuf,
}

impl SitePaths {
    pub fn new(vm_dir: impl Into<PathBuf>, nginx_config: impl Into<PathBuf>) -> Self {
        Self {
            vm_dir: vm_dir.into(),
            nginx_config: nginx_config.into(),
        }
    }

    /// Base content directory.
    pub fn htdocs(&self) -> PathBuf {
        self.vm_dir.join("htdocs")
    }

    /// wp-content directory inside htdocs.
    pub fn wp_content(&self) -> PathBuf {
        self.htdocs().join("wp-content")
    }

    /// Web-server log directory.
    pub fn log_dir(&self) -> PathBuf {
        self.vm_dir.join("log")
    }
}

// ── Service ───────────────────────────────────────────────────────────────────

/// Main provisioning service.
///
/// Consumes a resolved [`SiteSettings`], the process-wide
/// [`GlobalOverrides`], and injected port implementations, and drives the
/// step order above. Single-threaded and fully sequential; at most one
/// provisioning run per site at a time is assumed.
pub struct ProvisionService {
    runner: Box<dyn ProcessRunner>,
    db: Box<dyn Database>,
    fs: Box<dyn Filesystem>,
    paths: SitePaths,
    site: SiteSettings,
    overrides: GlobalOverrides,
    /// Pristine virtual-host template, used when no generated config exists.
    nginx_template: String,
    patcher: NginxConfigPatcher,
}

impl ProvisionService {
    pub fn new(
        runner: Box<dyn ProcessRunner>,
        db: Box<dyn Database>,
        fs: Box<dyn Filesystem>,
        paths: SitePaths,
        site: SiteSettings,
        overrides: GlobalOverrides,
        nginx_template: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            db,
            fs,
            paths,
            site,
            overrides,
            nginx_template: nginx_template.into(),
            patcher: NginxConfigPatcher::new(),
        }
    }

    /// Provision the site.
    ///
    /// This is the main use case - runs the fixed step order to completion
    /// or to the first required-step failure.
    #[instrument(skip_all, fields(site = %self.site.site_name))]
    pub fn provision(&self) -> SitekitResult<()> {
        self.create_db()?;
        self.create_logs()?;
        self.create_base_dir()?;
        self.create_nginx_config()?;

        if !self.site.wordpress {
            info!("Skipping WordPress setup");
            return Ok(());
        }

        self.download_wordpress()?;
        self.create_wp_config()?;
        self.install_wordpress()?;

        if self.site.has_htdocs_repo() {
            return Ok(());
        }

        self.provision_content()
    }

    /// Provision the content within the site.
    ///
    /// Either clones the wp-content repository, or installs/deletes plugins
    /// and themes per the settings — never both, so curated content is not
    /// overwritten.
    fn provision_content(&self) -> SitekitResult<()> {
        self.clone_wp_content()?;

        if !self.site.has_wp_content_repo() {
            self.install_plugins()?;
            self.install_themes()?;
            self.delete_default_content()?;
        }

        Ok(())
    }

    // ── Steps ─────────────────────────────────────────────────────────────────

    /// Create the site database and grant privileges, if absent.
    fn create_db(&self) -> SitekitResult<()> {
        info!("Checking database for site...");
        let name = &self.site.site_name;
        let existing = self
            .db
            .query(&format!("SHOW DATABASES LIKE '{name}'"))?;

        if existing.row_count() == 0 {
            info!("Creating DB for {name}");
            self.db.query(&format!("CREATE DATABASE `{name}`;"))?;
            info!("Granting privileges on DB...");
            self.db.query(&format!(
                "GRANT ALL PRIVILEGES ON `{name}`.* TO wp@localhost IDENTIFIED BY 'wp'"
            ))?;
            info!("DB setup complete.");
        }

        Ok(())
    }

    /// Create the log directory and empty log files, if absent.
    ///
    /// Existing files are never truncated.
    fn create_logs(&self) -> SitekitResult<()> {
        let log_dir = self.paths.log_dir();
        if !self.fs.exists(&log_dir) {
            info!("Creating {} directory...", log_dir.display());
            self.fs.create_dir_all(&log_dir)?;
        }

        for logfile in ["error.log", "access.log"] {
            let file = log_dir.join(logfile);
            if !self.fs.exists(&file) {
                self.fs.write_file(&file, "")?;
            }
        }

        Ok(())
    }

    /// Create the base htdocs directory, or clone the custom repo into it.
    fn create_base_dir(&self) -> SitekitResult<()> {
        let base_dir = self.paths.htdocs();
        if self.site.has_htdocs_repo() {
            self.clone_htdocs()
        } else if !self.fs.exists(&base_dir) {
            self.fs.create_dir_all(&base_dir)?;
            Ok(())
        } else {
            // Existing non-repo directory: leave it alone.
            Ok(())
        }
    }

    /// Create or update the nginx virtual-host config.
    fn create_nginx_config(&self) -> SitekitResult<()> {
        info!("Setting up Nginx config");
        let config = &self.paths.nginx_config;
        let contents = if self.fs.exists(config) {
            self.fs.read_to_string(config)?
        } else {
            self.nginx_template.clone()
        };

        match self.patcher.patch(
            &contents,
            &self.site.hosts,
            &self.site.main_host,
            self.site.xipio,
        ) {
            PatchOutcome::Unchanged => {
                info!("Nginx config already up to date");
                Ok(())
            }
            PatchOutcome::Patched(text) => self.fs.write_file(config, &text),
        }
    }

    /// Download WordPress core files.
    ///
    /// Skipped when the install already has its wp-admin directory or when
    /// downloads are disabled in settings.
    fn download_wordpress(&self) -> SitekitResult<()> {
        if self.fs.exists(&self.paths.htdocs().join("wp-admin")) || !self.site.download_wp {
            return Ok(());
        }

        let spec = self.cmd(
            ["wp", "core", "download"],
            &[
                ("locale", self.site.locale.as_str().into()),
                ("version", self.site.version.as_str().into()),
            ],
        );
        self.run_required(spec)?;
        Ok(())
    }

    /// Create the wp-config.php file via the management CLI.
    ///
    /// Uses the fixed development database credentials (`wp`/`wp` at
    /// `localhost`) and a block of debug-oriented PHP constants.
    fn create_wp_config(&self) -> SitekitResult<()> {
        if self.fs.exists(&self.paths.htdocs().join("wp-config.php")) {
            info!("wp-config.php file found");
            return Ok(());
        }

        let spec = self.cmd(
            ["wp", "config", "create"],
            &[
                ("dbname", self.site.site_name.as_str().into()),
                ("dbuser", "wp".into()),
                ("dbpass", "wp".into()),
                ("dbhost", "localhost".into()),
                ("dbprefix", self.site.db_prefix.clone().into()),
                ("locale", self.site.locale.as_str().into()),
                ("extra-php", EXTRA_PHP.into()),
            ],
        );
        self.run_required(spec)?;
        Ok(())
    }

    /// Install WordPress in the database, unless already installed.
    fn install_wordpress(&self) -> SitekitResult<()> {
        // Non-fatal probe: a non-zero status just means "not installed".
        let installed = self
            .run_best_effort(self.cmd(["wp", "core", "is-installed"], &[]))
            .is_some_and(|out| out.success());
        if installed {
            return Ok(());
        }

        info!("Installing WordPress...");
        let install_command = if self.site.multisite.enabled() {
            "multisite-install"
        } else {
            "install"
        };

        let mut flags: Vec<(&str, FlagValue)> = vec![
            ("url", self.site.main_host.as_str().into()),
            ("title", self.site.title.as_str().into()),
            ("admin_user", self.site.admin_user.as_str().into()),
            ("admin_password", self.site.admin_password.as_str().into()),
            ("admin_email", self.site.admin_email.as_str().into()),
            ("skip-plugins", FlagValue::Bare),
            ("skip-themes", FlagValue::Bare),
        ];
        if self.site.multisite == MultisiteMode::Subdomain {
            flags.push(("subdomains", FlagValue::Bare));
        }

        let output = self.run_required(self.cmd(["wp", "core", install_command], &flags))?;
        info!("{output}");
        Ok(())
    }

    // ── Clone routines ────────────────────────────────────────────────────────

    /// Clone the custom repo into the htdocs directory.
    fn clone_htdocs(&self) -> SitekitResult<()> {
        let base_dir = self.paths.htdocs();
        // A .git directory means "already cloned" — no remote comparison.
        let marker = base_dir.join(".git");
        if self.fs.exists(&marker) && self.fs.is_dir(&marker) {
            return Ok(());
        }

        self.remove_default_dir(&base_dir, "htdocs");

        let repo = self.site.htdocs_repo.as_deref().unwrap_or_default();
        let dest = base_dir.to_string_lossy();
        info!("Cloning [{}] into {}...", repo, base_dir.display());
        let output = self.run_required(self.cmd(
            ["git", "clone", repo, dest.as_ref()],
            &[("recursive", FlagValue::Bare)],
        ))?;
        info!("{output}");
        Ok(())
    }

    /// Clone the custom repo into the wp-content directory.
    fn clone_wp_content(&self) -> SitekitResult<()> {
        let wp_content = self.paths.wp_content();
        if !self.site.has_wp_content_repo() || self.fs.exists(&wp_content.join(".git")) {
            return Ok(());
        }

        self.remove_default_dir(&wp_content, "wp-content");

        let repo = self.site.wp_content_repo.as_deref().unwrap_or_default();
        let dest = wp_content.to_string_lossy();
        info!("Cloning [{}] into wp-content...", repo);
        let output = self.run_required(self.cmd(
            ["git", "clone", repo, dest.as_ref()],
            &[("recursive", FlagValue::Bare)],
        ))?;
        info!("{output}");
        Ok(())
    }

    /// Best-effort removal of a default directory before cloning over it.
    fn remove_default_dir(&self, dir: &std::path::Path, what: &str) {
        if self.fs.exists(dir) {
            info!("Removing default {what} directory...");
            let target = dir.to_string_lossy();
            self.run_best_effort(self.cmd(["rm", "-rf", target.as_ref()], &[]));
        }
    }

    // ── Plugins & themes ──────────────────────────────────────────────────────

    /// Install plugins: global override list first, then the site's own.
    fn install_plugins(&self) -> SitekitResult<()> {
        let plugins = merge_items(&self.overrides.plugins, &self.site.plugins);
        if plugins.is_empty() {
            return Ok(());
        }

        self.install_items(ItemKind::Plugin, &plugins);
        Ok(())
    }

    /// Install themes: global override list first, then the site's own.
    fn install_themes(&self) -> SitekitResult<()> {
        let themes = merge_items(&self.overrides.themes, &self.site.themes);
        if themes.is_empty() {
            return Ok(());
        }

        self.install_items(ItemKind::Theme, &themes);
        Ok(())
    }

    /// Helper to install plugins or themes, best-effort per item.
    fn install_items(&self, kind: ItemKind, items: &[ItemSpec]) {
        let mut builder = CommandBuilder::new();
        builder.set_prefix(["wp", kind.as_str(), "install"]);

        info!("Installing {}s...", kind.as_str());
        for item in items {
            // The skip list applies to plugins only.
            if kind == ItemKind::Plugin && self.site.skip_plugins.contains(&item.name) {
                info!("Found {} in skip list, skipping...", item.name);
                continue;
            }

            // Per-item flags restricted to the fixed allow-list.
            let mut flags: Vec<(&str, FlagValue)> = Vec::new();
            if let Some(version) = &item.version {
                flags.push(("version", version.as_str().into()));
            }
            flags.push(("force", item.force.into()));
            flags.push(("activate", item.activate.into()));
            if kind == ItemKind::Plugin {
                flags.push(("activate-network", item.activate_network.into()));
            }

            self.run_best_effort(builder.build([item.name.as_str()], &flags));
        }
    }

    /// Delete the fixed default plugin and theme sets, best-effort.
    fn delete_default_content(&self) -> SitekitResult<()> {
        if self.site.delete_default_plugins {
            info!("Removing default plugins...");
            for plugin in DEFAULT_PLUGINS {
                self.run_best_effort(self.cmd(["wp", "plugin", "delete", plugin], &[]));
            }
        }

        if self.site.delete_default_themes {
            info!("Removing default themes...");
            for theme in DEFAULT_THEMES {
                let slug = format!("twenty{theme}");
                self.run_best_effort(self.cmd(["wp", "theme", "delete", &slug], &[]));
            }
        }

        Ok(())
    }

    // ── Command execution ─────────────────────────────────────────────────────

    fn cmd<'a, I>(&self, positional: I, flags: &[(&str, FlagValue)]) -> CommandSpec
    where
        I: IntoIterator<Item = &'a str>,
    {
        CommandBuilder::new().build(positional, flags)
    }

    /// Required mode: a non-zero exit aborts the whole pipeline, surfacing
    /// the captured output in the error.
    fn run_required(&self, spec: CommandSpec) -> SitekitResult<String> {
        let output = self.runner.run(&spec)?;
        if !output.success() {
            return Err(ApplicationError::CommandFailed {
                command: spec.to_string(),
                status: output.status,
                output: output.stdout,
            }
            .into());
        }
        Ok(output.stdout)
    }

    /// Best-effort mode: run, log the output, continue regardless of the
    /// exit code. Returns the output when the command could be spawned.
    fn run_best_effort(
        &self,
        spec: CommandSpec,
    ) -> Option<crate::application::ports::CommandOutput> {
        match self.runner.run(&spec) {
            Ok(output) => {
                if output.success() {
                    info!("{}", output.stdout);
                } else {
                    warn!(command = %spec, status = output.status, "{}", output.stdout);
                }
                Some(output)
            }
            Err(e) => {
                warn!(command = %spec, "command could not be run: {e}");
                None
            }
        }
    }
}

/// Merge the override list with the site's own list.
///
/// Override items first, site items appended; duplicates are kept.
fn merge_items(overrides: &[ItemSpec], site: &[ItemSpec]) -> Vec<ItemSpec> {
    overrides.iter().chain(site.iter()).cloned().collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        CommandOutput, MockDatabase, MockFilesystem, MockProcessRunner, QueryResult,
    };
    use crate::domain::{RawSiteConfig, RawSiteSettings};
    use std::sync::{Arc, Mutex};

    fn settings(f: impl FnOnce(&mut RawSiteSettings)) -> SiteSettings {
        let mut custom = RawSiteSettings::default();
        f(&mut custom);
        SiteSettings::resolve(
            "mysite",
            RawSiteConfig {
                hosts: Vec::new(),
                custom,
            },
        )
    }

    fn paths() -> SitePaths {
        SitePaths::new("/srv/www/mysite", "/srv/www/mysite/nginx.conf")
    }

    fn service(
        runner: MockProcessRunner,
        db: MockDatabase,
        fs: MockFilesystem,
        site: SiteSettings,
    ) -> ProvisionService {
        ProvisionService::new(
            Box::new(runner),
            Box::new(db),
            Box::new(fs),
            paths(),
            site,
            GlobalOverrides::default(),
            "server_name {wp_main_host};",
        )
    }

    // ── create_db ─────────────────────────────────────────────────────────────

    #[test]
    fn create_db_is_noop_when_database_exists() {
        let mut db = MockDatabase::new();
        db.expect_query()
            .withf(|sql| sql == "SHOW DATABASES LIKE 'mysite'")
            .times(1)
            .returning(|_| Ok(QueryResult::with_rows(1)));
        // No CREATE / GRANT expectations: any further query panics the mock.

        let svc = service(
            MockProcessRunner::new(),
            db,
            MockFilesystem::new(),
            settings(|_| {}),
        );
        svc.create_db().unwrap();
    }

    #[test]
    fn create_db_creates_and_grants_when_absent() {
        let issued = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&issued);

        let mut db = MockDatabase::new();
        db.expect_query().times(3).returning(move |sql| {
            log.lock().unwrap().push(sql.to_string());
            Ok(QueryResult::with_rows(0))
        });

        let svc = service(
            MockProcessRunner::new(),
            db,
            MockFilesystem::new(),
            settings(|_| {}),
        );
        svc.create_db().unwrap();

        let issued = issued.lock().unwrap();
        assert_eq!(issued[0], "SHOW DATABASES LIKE 'mysite'");
        assert_eq!(issued[1], "CREATE DATABASE `mysite`;");
        assert!(issued[2].starts_with("GRANT ALL PRIVILEGES ON `mysite`.*"));
        assert!(issued[2].contains("wp@localhost"));
    }

    // ── create_logs ───────────────────────────────────────────────────────────

    #[test]
    fn create_logs_never_truncates_existing_files() {
        let mut fs = MockFilesystem::new();
        // Directory and both files already exist: no writes expected.
        fs.expect_exists().returning(|_| true);

        let svc = service(
            MockProcessRunner::new(),
            MockDatabase::new(),
            fs,
            settings(|_| {}),
        );
        svc.create_logs().unwrap();
    }

    #[test]
    fn create_logs_creates_missing_files() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .withf(|p| p.ends_with("log"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, content| {
                content.is_empty()
                    && (p.ends_with("error.log") || p.ends_with("access.log"))
            })
            .times(2)
            .returning(|_, _| Ok(()));

        let svc = service(
            MockProcessRunner::new(),
            MockDatabase::new(),
            fs,
            settings(|_| {}),
        );
        svc.create_logs().unwrap();
    }

    // ── download / required failure ───────────────────────────────────────────

    #[test]
    fn download_skipped_when_wp_admin_present() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p| p.ends_with("wp-admin"))
            .returning(|_| true);

        let svc = service(
            MockProcessRunner::new(),
            MockDatabase::new(),
            fs,
            settings(|_| {}),
        );
        svc.download_wordpress().unwrap();
    }

    #[test]
    fn download_skipped_when_disabled() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let svc = service(
            MockProcessRunner::new(),
            MockDatabase::new(),
            fs,
            settings(|c| c.download_wp = Some(false)),
        );
        svc.download_wordpress().unwrap();
    }

    #[test]
    fn required_command_failure_aborts_with_output() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(1).returning(|_| {
            Ok(CommandOutput {
                status: 1,
                stdout: "Error: no network".into(),
            })
        });

        let svc = service(runner, MockDatabase::new(), fs, settings(|_| {}));
        let err = svc.download_wordpress().unwrap_err();
        assert!(err.to_string().contains("wp core download"));
        assert!(err
            .suggestions()
            .iter()
            .any(|s| s.contains("no network")));
    }

    #[test]
    fn download_passes_locale_and_version_flags() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|spec| {
                spec.args
                    == [
                        "wp",
                        "core",
                        "download",
                        "--locale=de_DE",
                        "--version=6.4",
                    ]
            })
            .times(1)
            .returning(|_| Ok(CommandOutput { status: 0, stdout: String::new() }));

        let svc = service(
            runner,
            MockDatabase::new(),
            fs,
            settings(|c| {
                c.locale = Some("de_DE".into());
                c.version = Some("6.4".into());
            }),
        );
        svc.download_wordpress().unwrap();
    }

    // ── wp-config ─────────────────────────────────────────────────────────────

    #[test]
    fn wp_config_skipped_when_file_exists() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p| p.ends_with("wp-config.php"))
            .returning(|_| true);

        let svc = service(
            MockProcessRunner::new(),
            MockDatabase::new(),
            fs,
            settings(|_| {}),
        );
        svc.create_wp_config().unwrap();
    }

    #[test]
    fn wp_config_uses_fixed_dev_credentials() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);

        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|spec| {
                let args = &spec.args;
                args[..3] == ["wp", "config", "create"]
                    && args.contains(&"--dbname=mysite".to_string())
                    && args.contains(&"--dbuser=wp".to_string())
                    && args.contains(&"--dbpass=wp".to_string())
                    && args.contains(&"--dbhost=localhost".to_string())
                    && args.iter().any(|a| a.starts_with("--extra-php="))
            })
            .times(1)
            .returning(|_| Ok(CommandOutput { status: 0, stdout: String::new() }));

        let svc = service(runner, MockDatabase::new(), fs, settings(|_| {}));
        svc.create_wp_config().unwrap();
    }

    // ── install_wordpress ─────────────────────────────────────────────────────

    #[test]
    fn install_skipped_when_probe_reports_installed() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|spec| spec.args == ["wp", "core", "is-installed"])
            .times(1)
            .returning(|_| Ok(CommandOutput { status: 0, stdout: String::new() }));

        let svc = service(
            runner,
            MockDatabase::new(),
            MockFilesystem::new(),
            settings(|_| {}),
        );
        svc.install_wordpress().unwrap();
    }

    #[test]
    fn subdomain_multisite_adds_subdomains_flag() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|spec| spec.args == ["wp", "core", "is-installed"])
            .times(1)
            .returning(|_| Ok(CommandOutput { status: 1, stdout: String::new() }));
        runner
            .expect_run()
            .withf(|spec| {
                spec.args[..3] == ["wp", "core", "multisite-install"]
                    && spec.args.contains(&"--subdomains".to_string())
                    && spec.args.contains(&"--skip-plugins".to_string())
                    && spec.args.contains(&"--skip-themes".to_string())
            })
            .times(1)
            .returning(|_| Ok(CommandOutput { status: 0, stdout: String::new() }));

        let svc = service(
            runner,
            MockDatabase::new(),
            MockFilesystem::new(),
            settings(|c| c.multisite = Some(MultisiteMode::Subdomain)),
        );
        svc.install_wordpress().unwrap();
    }

    // ── plugins / themes ──────────────────────────────────────────────────────

    #[test]
    fn merged_lists_keep_order_and_duplicates() {
        let overrides = vec![ItemSpec::named("akismet"), ItemSpec::named("jetpack")];
        let site = vec![ItemSpec::named("akismet")];
        let merged = merge_items(&overrides, &site);
        let names: Vec<_> = merged.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["akismet", "jetpack", "akismet"]);
    }

    #[test]
    fn skip_listed_plugin_never_reaches_the_runner() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|spec| spec.args == ["wp", "plugin", "install", "jetpack"])
            .times(1)
            .returning(|_| Ok(CommandOutput { status: 0, stdout: String::new() }));

        let svc = service(
            runner,
            MockDatabase::new(),
            MockFilesystem::new(),
            settings(|c| {
                c.plugins = vec![
                    crate::domain::RawItemSpec {
                        name: "akismet".into(),
                        version: None,
                        force: false,
                        activate: false,
                        activate_network: false,
                    },
                    crate::domain::RawItemSpec {
                        name: "jetpack".into(),
                        version: None,
                        force: false,
                        activate: false,
                        activate_network: false,
                    },
                ];
                c.skip_plugins = vec!["akismet".into()];
            }),
        );
        svc.install_plugins().unwrap();
    }

    #[test]
    fn item_flags_respect_the_allow_list() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|spec| {
                spec.args
                    == [
                        "wp",
                        "plugin",
                        "install",
                        "jetpack",
                        "--version=1.2",
                        "--activate",
                        "--activate-network",
                    ]
            })
            .times(1)
            .returning(|_| Ok(CommandOutput { status: 0, stdout: String::new() }));

        let svc = service(
            runner,
            MockDatabase::new(),
            MockFilesystem::new(),
            settings(|c| {
                c.plugins = vec![crate::domain::RawItemSpec {
                    name: "jetpack".into(),
                    version: Some("1.2".into()),
                    force: false,
                    activate: true,
                    activate_network: true,
                }];
            }),
        );
        svc.install_plugins().unwrap();
    }

    #[test]
    fn theme_install_never_emits_activate_network() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|spec| {
                spec.args == ["wp", "theme", "install", "astra", "--activate"]
            })
            .times(1)
            .returning(|_| Ok(CommandOutput { status: 0, stdout: String::new() }));

        let svc = service(
            runner,
            MockDatabase::new(),
            MockFilesystem::new(),
            settings(|c| {
                c.themes = vec![crate::domain::RawItemSpec {
                    name: "astra".into(),
                    version: None,
                    force: false,
                    activate: true,
                    activate_network: true,
                }];
            }),
        );
        svc.install_themes().unwrap();
    }

    #[test]
    fn best_effort_install_failure_does_not_abort() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(2).returning(|_| {
            Ok(CommandOutput {
                status: 1,
                stdout: "Warning: not found".into(),
            })
        });

        let svc = service(
            runner,
            MockDatabase::new(),
            MockFilesystem::new(),
            settings(|c| {
                c.plugins = vec![
                    crate::domain::RawItemSpec {
                        name: "a".into(),
                        version: None,
                        force: false,
                        activate: false,
                        activate_network: false,
                    },
                    crate::domain::RawItemSpec {
                        name: "b".into(),
                        version: None,
                        force: false,
                        activate: false,
                        activate_network: false,
                    },
                ];
            }),
        );
        svc.install_plugins().unwrap();
    }

    // ── delete default content ────────────────────────────────────────────────

    #[test]
    fn delete_defaults_issues_fixed_lists() {
        let deleted = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&deleted);

        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(8).returning(move |spec| {
            log.lock().unwrap().push(spec.to_string());
            Ok(CommandOutput { status: 0, stdout: String::new() })
        });

        let svc = service(
            runner,
            MockDatabase::new(),
            MockFilesystem::new(),
            settings(|c| {
                c.delete_default_plugins = Some(true);
                c.delete_default_themes = Some(true);
            }),
        );
        svc.delete_default_content().unwrap();

        let deleted = deleted.lock().unwrap();
        assert_eq!(deleted[0], "wp plugin delete akismet");
        assert_eq!(deleted[1], "wp plugin delete hello");
        assert_eq!(deleted[2], "wp theme delete twentytwelve");
        assert_eq!(deleted[7], "wp theme delete twentyseventeen");
    }

    #[test]
    fn delete_defaults_noop_when_disabled() {
        let svc = service(
            MockProcessRunner::new(),
            MockDatabase::new(),
            MockFilesystem::new(),
            settings(|_| {}),
        );
        svc.delete_default_content().unwrap();
    }
}
