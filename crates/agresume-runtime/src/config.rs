use crate::{Error, Result};
use agresume_core::expand_tilde;
use agresume_providers::{SessionProvider, create_provider, get_all_providers, get_provider_metadata};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Result cap used when neither the flag nor the config file sets one
pub const DEFAULT_SCAN_LIMIT: usize = 50;

/// Resolve the config file path based on priority:
/// 1. Explicit path (--config flag, with tilde expansion)
/// 2. AGRESUME_CONFIG environment variable (with tilde expansion)
/// 3. `<config dir>/agresume/config.toml`
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("AGRESUME_CONFIG")
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("agresume").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no config directory found".to_string(),
    ))
}

fn default_limit() -> usize {
    DEFAULT_SCAN_LIMIT
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Per-source time budget in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SCAN_LIMIT,
            timeout_ms: None,
        }
    }
}

impl ScanConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Falls back to the registry default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_root: Option<PathBuf>,
}

/// Effective settings of one registered provider after merging the file
/// with registry defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub id: &'static str,
    pub label: &'static str,
    pub command: &'static str,
    pub enabled: bool,
    pub log_root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    /// A missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|err| Error::Config(format!("{}: {}", path.display(), err)))?;
        config.warn_unknown_providers();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        resolve_config_path(None)
    }

    fn warn_unknown_providers(&self) {
        for id in self.providers.keys() {
            if get_provider_metadata(id).is_none() {
                warn!(provider = %id, "ignoring unknown provider in config");
            }
        }
    }

    /// Every registered provider with file settings merged over defaults
    pub fn provider_settings(&self) -> Vec<ProviderSettings> {
        get_all_providers()
            .iter()
            .map(|meta| {
                let configured = self.providers.get(meta.id);
                let log_root = configured
                    .and_then(|c| c.log_root.as_ref())
                    .map(|root| expand_tilde(&root.to_string_lossy()))
                    .unwrap_or_else(|| meta.default_log_root());
                ProviderSettings {
                    id: meta.id,
                    label: meta.label,
                    command: meta.command,
                    enabled: configured.is_none_or(|c| c.enabled),
                    log_root,
                }
            })
            .collect()
    }

    pub fn enabled_providers(&self) -> Vec<ProviderSettings> {
        self.provider_settings()
            .into_iter()
            .filter(|settings| settings.enabled)
            .collect()
    }

    pub fn set_provider(&mut self, id: String, config: ProviderConfig) {
        self.providers.insert(id, config);
    }

    /// Instantiate the enabled providers, scoped to `cwd`
    pub fn build_providers(&self, cwd: &Path) -> Result<Vec<Arc<dyn SessionProvider>>> {
        self.enabled_providers()
            .into_iter()
            .map(|settings| create_provider(settings.id, settings.log_root, cwd).map_err(Error::from))
            .collect()
    }
}
