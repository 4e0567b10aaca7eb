//! Implementation of the `sitekit provision` command.
//!
//! Wires the real adapters (system process runner, mysql shell client, local
//! filesystem) into the core provisioning service and runs it for one site.

use std::path::PathBuf;

use tracing::debug;

use sitekit_adapters::{DEFAULT_NGINX_TEMPLATE, LocalFilesystem, MysqlShell, SystemRunner};
use sitekit_core::{
    application::{ProvisionService, SitePaths},
    domain::SiteSettings,
};

use crate::{
    cli::ProvisionArgs,
    config::SitesConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ProvisionArgs, config: SitesConfig, output: OutputManager) -> CliResult<()> {
    let raw = config
        .sites
        .get(&args.site)
        .cloned()
        .ok_or_else(|| CliError::SiteNotFound {
            name: args.site.clone(),
        })?;

    let settings = SiteSettings::resolve(&args.site, raw);
    let overrides = config.overrides.clone().into_overrides();

    let vm_dir: PathBuf = args
        .vm_dir
        .unwrap_or_else(|| config.www_root().join(&args.site));
    let nginx_config = args
        .nginx_config
        .unwrap_or_else(|| vm_dir.join("provision").join("nginx.conf"));
    let paths = SitePaths::new(&vm_dir, &nginx_config);

    debug!(
        site = %args.site,
        vm_dir = %vm_dir.display(),
        nginx_config = %nginx_config.display(),
        "resolved provisioning paths"
    );

    output.header(&format!("Provisioning site '{}'", args.site))?;
    output.print(&format!("  hosts: {}", settings.hosts.join(" ")))?;

    // Connect up front so a bad database config fails before any state is
    // touched.
    let db = MysqlShell::connect(overrides.db.clone())?;

    // Management-CLI commands must run from the site's htdocs directory.
    let runner = SystemRunner::in_dir(paths.htdocs());

    let service = ProvisionService::new(
        Box::new(runner),
        Box::new(db),
        Box::new(LocalFilesystem::new()),
        paths,
        settings,
        overrides,
        DEFAULT_NGINX_TEMPLATE,
    );
    service.provision()?;

    output.success(&format!("Site '{}' provisioned", args.site))?;
    Ok(())
}
