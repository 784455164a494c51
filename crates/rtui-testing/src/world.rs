//! Isolated environment for running the `rtui` binary in tests.

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp directory holding the config file and log file of one test.
///
/// Every run is pointed at an in-memory store, so no Redis server is needed.
///
/// # Example
/// ```no_run
/// use rtui_testing::TestWorld;
///
/// let world = TestWorld::new().with_samples();
/// let result = world.run(&["keys", "--pattern", "user:*"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
    log_path: PathBuf,
    samples: bool,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        let log_path = temp_dir.path().join("rtui.log");

        Self {
            temp_dir,
            config_path,
            log_path,
            samples: false,
        }
    }

    /// Seed the in-memory store with the demo data before each run.
    pub fn with_samples(mut self) -> Self {
        self.samples = true;
        self
    }

    /// Write a config file for the CLI to pick up.
    pub fn with_config(self, contents: &str) -> Self {
        std::fs::write(&self.config_path, contents).expect("Failed to write config");
        self
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Contents of the log file, empty when nothing was logged.
    pub fn log_contents(&self) -> String {
        std::fs::read_to_string(&self.log_path).unwrap_or_default()
    }

    /// Apply the isolated locations and store flags to a command.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--memory")
            .arg("--config")
            .arg(&self.config_path)
            .arg("--log-file")
            .arg(&self.log_path)
            .env("NO_COLOR", "1");
        if self.samples {
            cmd.arg("--samples");
        }
        cmd
    }

    /// Run `rtui` with the given arguments.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("rtui")
            .map_err(|e| anyhow::anyhow!("Failed to find rtui binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run with `--format json` and parse stdout.
    pub fn run_json(&self, args: &[&str]) -> Result<serde_json::Value> {
        let mut full = vec!["--format", "json"];
        full.extend_from_slice(args);
        let result = self.run(&full)?;
        if !result.success() {
            anyhow::bail!("rtui {:?} failed: {}", args, result.stderr);
        }
        result.json()
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
