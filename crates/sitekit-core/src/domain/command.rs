//! Typed external-command construction.
//!
//! The legacy provisioner built shell commands from strings with ad hoc flag
//! rules. Here the flag value is a proper sum type, consumed by a single
//! rendering function, so there are no stringly-typed edge cases:
//!
//! | [`FlagValue`]      | Rendered as   |
//! |--------------------|---------------|
//! | `Omit`             | (nothing)     |
//! | `Bare`             | `--name`      |
//! | `Value(v)`         | `--name=v`    |
//!
//! `Omit` exists so a caller can *explicitly* opt out of a flag that is
//! usually present, mirroring the `false` sentinel of the original tool.

use std::fmt;

// ── Flag values ───────────────────────────────────────────────────────────────

/// The value attached to a `--flag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Flag is omitted entirely (explicit opt-out).
    Omit,
    /// Flag is emitted as `--name` with no value.
    Bare,
    /// Flag is emitted as `--name=value`.
    Value(String),
}

impl From<bool> for FlagValue {
    /// `true` → bare flag, `false` → omitted.
    fn from(v: bool) -> Self {
        if v { Self::Bare } else { Self::Omit }
    }
}

impl From<&str> for FlagValue {
    fn from(v: &str) -> Self {
        Self::Value(v.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(v: String) -> Self {
        Self::Value(v)
    }
}

impl From<Option<String>> for FlagValue {
    /// `None` → bare flag. This reproduces the legacy behavior where an unset
    /// value still emitted the flag name without `=value`.
    fn from(v: Option<String>) -> Self {
        match v {
            Some(v) => Self::Value(v),
            None => Self::Bare,
        }
    }
}

// ── Command spec ──────────────────────────────────────────────────────────────

/// A fully-rendered external command: program plus arguments, in order.
///
/// Created per execution and discarded; the executor port consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub args: Vec<String>,
}

impl CommandSpec {
    /// The program to execute (first argument).
    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Arguments after the program name.
    pub fn tail(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(" "))
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builds [`CommandSpec`]s, optionally under a shared command prefix.
///
/// The prefix (e.g. `["wp", "plugin", "install"]`) is set once and reused
/// across multiple `build` calls until [`CommandBuilder::clear_prefix`].
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    prefix: Vec<String>,
}

impl CommandBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shared prefix for subsequent builds.
    pub fn set_prefix<I, S>(&mut self, prefix: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix = prefix.into_iter().map(Into::into).collect();
    }

    /// Restore the empty prefix.
    pub fn clear_prefix(&mut self) {
        self.prefix.clear();
    }

    /// Render positional arguments plus ordered flags into a [`CommandSpec`].
    pub fn build<I, S>(&self, positional: I, flags: &[(&str, FlagValue)]) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: Vec<String> = self.prefix.clone();
        args.extend(positional.into_iter().map(Into::into));

        for (name, value) in flags {
            match value {
                FlagValue::Omit => continue,
                FlagValue::Bare => args.push(format!("--{name}")),
                FlagValue::Value(v) => args.push(format!("--{name}={v}")),
            }
        }

        CommandSpec { args }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_only() {
        let spec = CommandBuilder::new().build(["git", "status"], &[]);
        assert_eq!(spec.args, ["git", "status"]);
        assert_eq!(spec.program(), Some("git"));
        assert_eq!(spec.tail(), ["status"]);
    }

    #[test]
    fn omit_flag_never_appears() {
        let spec = CommandBuilder::new().build(["wp"], &[("activate", FlagValue::Omit)]);
        assert_eq!(spec.args, ["wp"]);
        assert!(!spec.to_string().contains("activate"));
    }

    #[test]
    fn bare_flag_has_no_equals() {
        let spec = CommandBuilder::new().build(["wp"], &[("recursive", FlagValue::Bare)]);
        assert_eq!(spec.args, ["wp", "--recursive"]);
    }

    #[test]
    fn valued_flag_renders_name_equals_value() {
        let spec = CommandBuilder::new().build(["wp"], &[("locale", "de_DE".into())]);
        assert_eq!(spec.args, ["wp", "--locale=de_DE"]);
    }

    #[test]
    fn flag_order_is_preserved() {
        let spec = CommandBuilder::new().build(
            ["wp", "core", "install"],
            &[
                ("url", "example.com".into()),
                ("skip-plugins", FlagValue::Bare),
                ("skip-themes", FlagValue::Bare),
            ],
        );
        assert_eq!(
            spec.args,
            [
                "wp",
                "core",
                "install",
                "--url=example.com",
                "--skip-plugins",
                "--skip-themes"
            ]
        );
    }

    #[test]
    fn bool_conversion_matches_legacy_semantics() {
        assert_eq!(FlagValue::from(true), FlagValue::Bare);
        assert_eq!(FlagValue::from(false), FlagValue::Omit);
    }

    #[test]
    fn option_conversion_none_is_bare() {
        assert_eq!(FlagValue::from(None::<String>), FlagValue::Bare);
        assert_eq!(
            FlagValue::from(Some("wp_".to_string())),
            FlagValue::Value("wp_".into())
        );
    }

    #[test]
    fn prefix_reused_until_cleared() {
        let mut builder = CommandBuilder::new();
        builder.set_prefix(["wp", "plugin", "install"]);

        let first = builder.build(["akismet"], &[("activate", FlagValue::Bare)]);
        assert_eq!(first.args, ["wp", "plugin", "install", "akismet", "--activate"]);

        let second = builder.build(["jetpack"], &[]);
        assert_eq!(second.args, ["wp", "plugin", "install", "jetpack"]);

        builder.clear_prefix();
        let third = builder.build(["wp", "core", "download"], &[]);
        assert_eq!(third.args, ["wp", "core", "download"]);
    }

    #[test]
    fn display_joins_with_spaces() {
        let spec = CommandBuilder::new().build(["wp", "core", "download"], &[("version", "6.4".into())]);
        assert_eq!(spec.to_string(), "wp core download --version=6.4");
    }
}
