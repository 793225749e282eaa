//! TestWorld pattern for CLI integration tests.
//!
//! Each world is a temp directory holding a `config.toml` and one pair of
//! feed files per cloud; `run` executes the `cloudboard` binary against it.

use anyhow::Result;
use assert_cmd::Command;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::SampleFeeds;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use cloudboard_testing::{SampleFeeds, TestWorld};
///
/// let world = TestWorld::new().with_feeds("aws", SampleFeeds::aws());
///
/// let result = world.run(&["--format", "json", "status"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
    clouds: BTreeMap<String, (PathBuf, PathBuf)>,
    env_vars: BTreeMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");

        let world = Self {
            temp_dir,
            config_path,
            clouds: BTreeMap::new(),
            env_vars: BTreeMap::new(),
        };
        world.write_config();
        world
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Status and cost feed paths for a configured cloud.
    pub fn feed_paths(&self, cloud: &str) -> Option<(&Path, &Path)> {
        self.clouds
            .get(cloud)
            .map(|(status, cost)| (status.as_path(), cost.as_path()))
    }

    /// Write a pair of feeds for `cloud` and register them in the config.
    pub fn with_feeds(self, cloud: &str, feeds: SampleFeeds) -> Self {
        self.with_raw_feeds(cloud, &feeds.status.to_json(), &feeds.costs.to_json())
    }

    /// Write feed documents verbatim (for malformed-input tests).
    pub fn with_raw_feeds(mut self, cloud: &str, status_json: &str, cost_json: &str) -> Self {
        let dir = self.temp_dir.path().join("feeds").join(cloud);
        std::fs::create_dir_all(&dir).expect("Failed to create feed dir");

        let status_path = dir.join("status.json");
        let cost_path = dir.join("costs.json");
        std::fs::write(&status_path, status_json).expect("Failed to write status feed");
        std::fs::write(&cost_path, cost_json).expect("Failed to write cost feed");

        self.clouds
            .insert(cloud.to_string(), (status_path, cost_path));
        self.write_config();
        self
    }

    /// Replace a cloud's status feed in place (simulates a refresh upstream).
    pub fn replace_status_feed(&self, cloud: &str, status_json: &str) -> Result<()> {
        let (status_path, _) = self
            .clouds
            .get(cloud)
            .ok_or_else(|| anyhow::anyhow!("cloud '{}' has no feeds", cloud))?;
        std::fs::write(status_path, status_json)?;
        Ok(())
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    fn write_config(&self) {
        let mut toml = String::from("refresh_interval_secs = 1\ncurrency_symbol = \"$\"\n");
        if let Some(first) = self.clouds.keys().next() {
            toml.push_str(&format!("default_cloud = \"{}\"\n", first));
        }
        for (cloud, (status, cost)) in &self.clouds {
            toml.push_str(&format!(
                "\n[clouds.{}]\nstatus_feed = {:?}\ncost_feed = {:?}\n",
                cloud,
                status.display().to_string(),
                cost.display().to_string()
            ));
        }
        std::fs::write(&self.config_path, toml).expect("Failed to write config");
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--config")
            .arg(&self.config_path)
            .arg("--no-color")
            .current_dir(self.temp_dir.path())
            .env_remove("CLOUDBOARD_CONFIG")
            .env_remove("CLOUDBOARD_LOG")
            .env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `cloudboard` binary and capture its output.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("cloudboard")
            .map_err(|e| anyhow::anyhow!("Failed to find cloudboard binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
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

    /// Parse stdout as JSON.
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
