use assert_cmd::Command;
use tempfile::TempDir;

/// Test harness running the CLI inside an isolated working directory
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    /// Create a new test harness with an empty working directory
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Create a harness whose working directory holds the given config.toml
    pub fn with_config(contents: &str) -> Self {
        let harness = Self::new();
        std::fs::write(harness.temp_dir.path().join("config.toml"), contents)
            .expect("Failed to write config.toml");
        harness
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("repeat").expect("Failed to find repeat binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("REPEAT_OUTPUT");
        cmd.env("REPEAT_TIMEZONE", "UTC");
        cmd
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check for error messages
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error")
            .or(predicate::str::contains("error"))
    }

    /// Predicate matching a JSON line exactly (ignoring the trailing newline)
    pub fn json_line(expected: &str) -> impl Predicate<str> {
        predicate::str::diff(format!("{}\n", expected))
    }
}
