//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated HOME holding the Codex, Claude and Gemini log stores
//! - Managing working directories
//! - Writing sample data and controlling file modification times
//! - Executing the CLI with that HOME and cwd

use anyhow::Result;
use assert_cmd::Command;
use filetime::{FileTime, set_file_mtime};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::{PlacedSample, SampleFiles, append_creating_dirs, write_creating_dirs};
use crate::providers::TestProvider;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use agresume_testing::{TestProvider, TestWorld};
///
/// let world = TestWorld::new().enter_dir("project-a");
/// world.place_sample(TestProvider::Codex, "rollout-1.jsonl").unwrap();
///
/// let result = world.run(&["--list", "--format", "json"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    _temp_dir: TempDir,
    root: PathBuf,
    home: PathBuf,
    cwd: PathBuf,
    env_vars: HashMap<String, String>,
    samples: SampleFiles,
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
        // Canonical so recorded cwds match what the binary sees (/var vs /private/var)
        let root = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        let home = root.join("home");
        std::fs::create_dir_all(&home).expect("Failed to create home dir");

        Self {
            cwd: root.clone(),
            root,
            home,
            _temp_dir: temp_dir,
            env_vars: HashMap::new(),
            samples: SampleFiles::new(),
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the (canonicalized) temp directory root.
    pub fn temp_dir(&self) -> &Path {
        &self.root
    }

    /// Default log root of `provider` inside this world's HOME.
    pub fn log_root(&self, provider: TestProvider) -> PathBuf {
        provider.log_root_in(&self.home)
    }

    /// Config file the CLI is pointed at through `AGRESUME_CONFIG`.
    pub fn config_path(&self) -> PathBuf {
        self.home.join(".config").join("agresume").join("config.toml")
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Change the current working directory (relative to temp root).
    ///
    /// This method consumes `self` for use in builder pattern chains.
    /// For changing directory multiple times in a test, use `set_cwd()` instead.
    pub fn enter_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.set_cwd(path);
        self
    }

    /// Set the current working directory without consuming self.
    pub fn set_cwd<P: AsRef<Path>>(&mut self, path: P) {
        let new_cwd = self.resolve(path.as_ref());
        std::fs::create_dir_all(&new_cwd).expect("Failed to create directory");
        self.cwd = new_cwd;
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Create a project directory structure.
    pub fn with_project(self, project_name: &str) -> Self {
        self.project_dir(project_name);
        self
    }

    /// Absolute path of a project directory under the temp root, created on demand.
    pub fn project_dir(&self, project_name: &str) -> PathBuf {
        let project_dir = self.root.join(project_name);
        std::fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        project_dir
    }

    /// Place a provider's sample as if it was recorded in the current directory.
    pub fn place_sample(&self, provider: TestProvider, dest_name: &str) -> Result<PlacedSample> {
        self.samples.place(provider, dest_name, &self.cwd, &self.home)
    }

    /// Place a provider's sample as if it was recorded in `project_dir`.
    pub fn place_sample_in<P: AsRef<Path>>(
        &self,
        provider: TestProvider,
        dest_name: &str,
        project_dir: P,
    ) -> Result<PlacedSample> {
        let project_dir = self.resolve(project_dir.as_ref());
        std::fs::create_dir_all(&project_dir)?;
        self.samples.place(provider, dest_name, &project_dir, &self.home)
    }

    /// Write a Codex rollout file relative to the Codex sessions root.
    pub fn write_codex_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.log_root(TestProvider::Codex).join(relative);
        write_creating_dirs(&path, content)?;
        Ok(path)
    }

    /// Append records to Claude's history file.
    pub fn append_claude_history(&self, lines: &[String]) -> Result<PathBuf> {
        let path = self.log_root(TestProvider::Claude);
        for line in lines {
            append_creating_dirs(&path, line)?;
        }
        Ok(path)
    }

    /// Write a Gemini chat document into the hash directory of `project_dir`.
    pub fn write_gemini_file(
        &self,
        project_dir: &Path,
        file_name: &str,
        content: &str,
    ) -> Result<PathBuf> {
        let hash = agresume_core::project_hash_from_root(project_dir);
        let path = self
            .log_root(TestProvider::Gemini)
            .join(hash)
            .join("chats")
            .join(file_name);
        write_creating_dirs(&path, content)?;
        Ok(path)
    }

    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.config_path();
        write_creating_dirs(&path, content)?;
        Ok(path)
    }

    /// Set a file's modification time to `unix_secs`.
    pub fn set_mtime(&self, path: &Path, unix_secs: i64) -> Result<()> {
        set_file_mtime(path, FileTime::from_unix_time(unix_secs, 0))?;
        Ok(())
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(&self.cwd)
            .env("HOME", &self.home)
            .env("AGRESUME_CONFIG", self.config_path())
            .env_remove("AGRESUME_PROJECT_ROOT")
            .env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `agresume` binary with the given arguments.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built and the `CARGO_BIN_EXE_` environment variable to be set (which
    /// cargo test does automatically).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("agresume")
            .map_err(|e| anyhow::anyhow!("Failed to find agresume binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Execute a command in a specific directory temporarily.
    pub fn run_in_dir<P: AsRef<Path>>(&mut self, args: &[&str], dir: P) -> Result<CliResult> {
        let original_cwd = self.cwd.clone();
        self.set_cwd(dir);
        let result = self.run(args);
        self.cwd = original_cwd;
        result
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
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
