//! Provider definitions for testing logic.
//!
//! Keeps knowledge of each tool's on-disk layout in one place so tests only
//! name the provider they want.

use std::path::{Path, PathBuf};

/// Supported test providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestProvider {
    Codex,
    Claude,
    Gemini,
}

impl TestProvider {
    /// Provider id as used in config.toml and event ids.
    ///
    /// # Example
    /// ```
    /// # use agresume_testing::providers::TestProvider;
    /// assert_eq!(TestProvider::Claude.id(), "claude");
    /// assert_eq!(TestProvider::Gemini.id(), "gemini");
    /// ```
    pub fn id(&self) -> &'static str {
        match self {
            TestProvider::Codex => "codex",
            TestProvider::Claude => "claude",
            TestProvider::Gemini => "gemini",
        }
    }

    /// Default log root of this provider under `home`.
    pub fn log_root_in(&self, home: &Path) -> PathBuf {
        match self {
            TestProvider::Codex => home.join(".codex").join("sessions"),
            TestProvider::Claude => home.join(".claude").join("history.jsonl"),
            TestProvider::Gemini => home.join(".gemini").join("tmp"),
        }
    }

    /// Sample file for this provider in `agresume-providers/tests/samples`.
    pub fn sample_filename(&self) -> &'static str {
        match self {
            TestProvider::Codex => "codex_session.jsonl",
            TestProvider::Claude => "claude_history.jsonl",
            TestProvider::Gemini => "gemini_session.json",
        }
    }

    /// Session id embedded in the sample file.
    pub fn sample_session_id(&self) -> &'static str {
        match self {
            TestProvider::Codex => "0195a3b2-7c41-7d20-9a0e-2f1c8b6d4e11",
            TestProvider::Claude => "7f2abd2d-7cfc-4447-9ddd-3ca8d14e02e9",
            TestProvider::Gemini => "f0a689a6-b0ac-407f-afcc-4fafa9e14e8a",
        }
    }

    pub fn all() -> &'static [TestProvider] {
        &[TestProvider::Codex, TestProvider::Claude, TestProvider::Gemini]
    }
}

impl std::fmt::Display for TestProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
