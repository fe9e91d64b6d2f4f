//! Testing infrastructure for agresume integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for an isolated HOME with all three log stores
//! - `assertions`: Checks over the `--list --format json` output
//! - `fixtures`: Sample data placement and log record builders
//! - `providers`: Provider-specific layout knowledge for tests

pub mod assertions;
pub mod fixtures;
pub mod providers;
pub mod world;

pub use providers::TestProvider;
pub use world::{CliResult, TestWorld};
