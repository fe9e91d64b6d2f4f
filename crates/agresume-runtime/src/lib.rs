pub mod config;
pub mod error;
pub mod launch;
pub mod scan;

pub use config::{Config, DEFAULT_SCAN_LIMIT, ProviderConfig, ProviderSettings, ScanConfig, resolve_config_path};
pub use error::{Error, Result};
pub use launch::{CapturedOutput, launch_interactive, run_captured};
pub use scan::{ScanOptions, ScanResult, scan_providers};
