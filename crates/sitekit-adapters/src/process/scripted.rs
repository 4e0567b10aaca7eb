//! Scripted process runner for testing.

use std::sync::{Arc, Mutex};

use sitekit_core::{
    application::ports::{CommandOutput, ProcessRunner},
    domain::CommandSpec,
    error::SitekitResult,
};

/// Test runner that records every command and replays scripted responses.
///
/// Commands are matched by prefix against their rendered form (for example
/// `"wp core download"`). Unmatched commands succeed with empty output, so a
/// test only scripts the responses it cares about.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    responses: Vec<(String, CommandOutput)>,
    recorded: Vec<String>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for commands whose rendered form starts with
    /// `prefix`. Later entries do not shadow earlier ones.
    pub fn respond(&self, prefix: impl Into<String>, status: i32, stdout: impl Into<String>) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.push((
            prefix.into(),
            CommandOutput {
                status,
                stdout: stdout.into(),
            },
        ));
    }

    /// Every command run so far, in order, rendered as strings.
    pub fn recorded(&self) -> Vec<String> {
        self.inner.lock().unwrap().recorded.clone()
    }

    /// Whether any recorded command starts with `prefix`.
    pub fn ran(&self, prefix: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .recorded
            .iter()
            .any(|c| c.starts_with(prefix))
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> SitekitResult<CommandOutput> {
        let rendered = spec.to_string();
        let mut inner = self.inner.lock().unwrap();
        inner.recorded.push(rendered.clone());

        let response = inner
            .responses
            .iter()
            .find(|(prefix, _)| rendered.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or(CommandOutput {
                status: 0,
                stdout: String::new(),
            });

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_core::domain::CommandBuilder;

    fn spec(args: &[&str]) -> CommandSpec {
        CommandBuilder::new().build(args.iter().copied(), &[])
    }

    #[test]
    fn records_commands_in_order() {
        let runner = ScriptedRunner::new();
        runner.run(&spec(&["wp", "core", "download"])).unwrap();
        runner.run(&spec(&["git", "clone", "repo"])).unwrap();
        assert_eq!(
            runner.recorded(),
            vec!["wp core download".to_string(), "git clone repo".to_string()]
        );
    }

    #[test]
    fn scripted_response_matches_by_prefix() {
        let runner = ScriptedRunner::new();
        runner.respond("wp core is-installed", 1, "not installed");

        let out = runner.run(&spec(&["wp", "core", "is-installed"])).unwrap();
        assert_eq!(out.status, 1);
        assert_eq!(out.stdout, "not installed");
    }

    #[test]
    fn unscripted_commands_succeed() {
        let runner = ScriptedRunner::new();
        let out = runner.run(&spec(&["anything"])).unwrap();
        assert!(out.success());
    }
}
