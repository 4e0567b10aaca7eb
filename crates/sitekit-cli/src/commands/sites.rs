//! Implementation of the `sitekit sites` command.

use sitekit_core::domain::SiteSettings;

use crate::{cli::SitesArgs, config::SitesConfig, error::CliResult, output::OutputManager};

pub fn execute(args: SitesArgs, config: SitesConfig, output: OutputManager) -> CliResult<()> {
    if config.sites.is_empty() {
        output.warning("No sites configured")?;
        return Ok(());
    }

    if args.names_only {
        for name in config.sites.keys() {
            println!("{name}");
        }
        return Ok(());
    }

    output.header("Configured sites:")?;
    for (name, raw) in &config.sites {
        let settings = SiteSettings::resolve(name, raw.clone());
        let kind = if settings.wordpress {
            "wordpress"
        } else {
            "static"
        };
        output.print(&format!(
            "  {} ({}) @ {}",
            name,
            kind,
            settings.hosts.join(" ")
        ))?;
    }

    Ok(())
}
