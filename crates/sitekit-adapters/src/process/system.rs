//! Subprocess runner using std::process.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use sitekit_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, ProcessRunner},
    },
    domain::CommandSpec,
    error::SitekitResult,
};

/// Production process runner.
///
/// Blocks until the subprocess exits; there is no timeout and no
/// cancellation, matching the pipeline's sequential model. Stderr is folded
/// into the captured output so failures carry the tool's own diagnostics.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    /// Working directory for every spawned command, when set.
    cwd: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all commands from the given directory.
    pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> SitekitResult<CommandOutput> {
        let Some(program) = spec.program() else {
            return Err(ApplicationError::CommandSpawn {
                command: String::new(),
                reason: "empty command".into(),
            }
            .into());
        };

        debug!(command = %spec, "running external command");

        let mut command = Command::new(program);
        command.args(spec.tail());
        // Early pipeline steps may run before the directory exists (it is
        // the pipeline that creates it); until then commands inherit the
        // parent working directory.
        if let Some(cwd) = &self.cwd {
            if cwd.is_dir() {
                command.current_dir(cwd);
            }
        }

        let output = command.output().map_err(|e| ApplicationError::CommandSpawn {
            command: spec.to_string(),
            reason: e.to_string(),
        })?;

        let mut stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !stdout.is_empty() {
                stdout.push('\n');
            }
            stdout.push_str(&stderr);
        }

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout,
        })
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
    fn captures_stdout_and_zero_status() {
        let runner = SystemRunner::new();
        let out = runner.run(&spec(&["echo", "hello"])).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn nonzero_exit_is_data_not_error() {
        let runner = SystemRunner::new();
        let out = runner.run(&spec(&["false"])).unwrap();
        assert!(!out.success());
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let runner = SystemRunner::new();
        let err = runner
            .run(&spec(&["definitely-not-a-real-binary-xyz"]))
            .unwrap_err();
        assert!(err.to_string().contains("failed to spawn"));
    }

    #[test]
    fn missing_cwd_falls_back_to_inherited_dir() {
        let runner = SystemRunner::in_dir("/definitely/not/a/real/dir");
        let out = runner.run(&spec(&["echo", "ok"])).unwrap();
        assert!(out.success());
    }

    #[test]
    fn cwd_applied_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let runner = SystemRunner::in_dir(dir.path());
        let out = runner.run(&spec(&["pwd"])).unwrap();
        let reported = std::fs::canonicalize(out.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn empty_command_rejected() {
        let runner = SystemRunner::new();
        assert!(runner.run(&CommandSpec { args: vec![] }).is_err());
    }
}
