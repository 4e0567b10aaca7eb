//! Idempotent nginx virtual-host config rewriting.
//!
//! The patcher operates on text: given the current config (or the pristine
//! template on first run), it computes the `server_name` directive value from
//! the site's hosts and rewrites the first such directive, substituting the
//! `{wp_main_host}` placeholder along the way.
//!
//! # Idempotence guard
//!
//! Convergence is governed by a raw substring search: if the computed host
//! string already appears anywhere in the text, the patcher reports
//! [`PatchOutcome::Unchanged`]. This is a known approximation carried over
//! from the legacy tool — the string could match inside a comment and the
//! patch would be skipped even though no real directive was updated. The
//! optional strict mode inspects the current directive value instead.

use regex::Regex;

/// Result of a patch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The target host directive is already present; leave the file alone.
    Unchanged,
    /// New config text to be written.
    Patched(String),
}

/// Rewrites the `server_name` directive of a virtual-host config.
#[derive(Debug, Clone)]
pub struct NginxConfigPatcher {
    server_name: Regex,
    tld: Regex,
    strict: bool,
}

impl NginxConfigPatcher {
    /// Patcher with the legacy substring idempotence guard.
    pub fn new() -> Self {
        Self {
            // Unwraps are fine: both patterns are compile-time constants.
            server_name: Regex::new(r"(server_name\s*)[^;]*;").unwrap(),
            tld: Regex::new(r"(.*)\.[a-zA-Z0-9_]+$").unwrap(),
            strict: false,
        }
    }

    /// Patcher whose idempotence guard matches only the current directive
    /// value, not arbitrary text elsewhere in the file.
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::new()
        }
    }

    /// Compute the new config text, or report that nothing needs to change.
    pub fn patch(
        &self,
        contents: &str,
        hosts: &[String],
        main_host: &str,
        use_xipio: bool,
    ) -> PatchOutcome {
        let mut nginx_hosts = hosts.join(" ");
        if use_xipio {
            nginx_hosts.push(' ');
            nginx_hosts.push_str(&self.xipio_pattern(main_host));
        }

        if self.already_applied(contents, &nginx_hosts) {
            return PatchOutcome::Unchanged;
        }

        let replaced = self
            .server_name
            .replace(contents, format!("${{1}}{nginx_hosts};"))
            .replace("{wp_main_host}", main_host);

        PatchOutcome::Patched(replaced)
    }

    fn already_applied(&self, contents: &str, nginx_hosts: &str) -> bool {
        if self.strict {
            // Structural check: compare against the current directive value.
            self.current_directive(contents)
                .is_some_and(|current| current == nginx_hosts)
        } else {
            contents.contains(nginx_hosts)
        }
    }

    fn current_directive(&self, contents: &str) -> Option<String> {
        let m = self.server_name.find(contents)?;
        let directive = m.as_str();
        let value = directive
            .strip_prefix("server_name")?
            .trim_start()
            .strip_suffix(';')?;
        Some(value.to_string())
    }

    /// The xip.io wildcard pattern for a main host.
    ///
    /// The base is the main host with its top-level domain segment stripped
    /// (rightmost dot-delimited label removed), dots escaped for the target
    /// directive syntax:
    /// - `example.com` → `example`
    /// - `foo.bar.local` → `foo\.bar`
    fn xipio_pattern(&self, main_host: &str) -> String {
        let base = self.tld.replace(main_host, "$1");
        let escaped = base.replace('.', r"\.");
        format!(r"{escaped}\\.\\d+\\.\\d+\\.\\d+\\.\\d+\\.xip\\.io$")
    }
}

impl Default for NginxConfigPatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
