use agresume_core::discover_project_root;
use agresume_providers::SessionProvider;
use agresume_runtime::{Config, ScanOptions, ScanResult, resolve_config_path, scan_providers};
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct ExecutionContext {
    config_path: PathBuf,
    config: OnceCell<Config>,
    pub project_root: PathBuf,
    pub all_projects: bool,
    pub limit: Option<usize>,
}

impl ExecutionContext {
    pub fn new(
        config_path: Option<&str>,
        project_root: Option<&str>,
        all_projects: bool,
        limit: Option<usize>,
    ) -> Result<Self> {
        let config_path = resolve_config_path(config_path)?;
        let project_root =
            discover_project_root(project_root).context("Failed to determine project root")?;

        Ok(Self {
            config_path,
            config: OnceCell::new(),
            project_root,
            all_projects,
            limit,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> Result<&Config> {
        self.config
            .get_or_try_init(|| Config::load_from(&self.config_path))
            .map_err(Into::into)
    }

    /// `--limit` wins over the config file
    pub fn scan_options(&self) -> Result<ScanOptions> {
        let config = self.config()?;
        Ok(ScanOptions {
            limit: Some(self.limit.unwrap_or(config.scan.limit)),
            include_all: self.all_projects,
            timeout: config.scan.timeout(),
        })
    }

    pub fn providers(&self) -> Result<Vec<Arc<dyn SessionProvider>>> {
        Ok(self.config()?.build_providers(&self.project_root)?)
    }

    pub async fn scan(&self) -> Result<ScanResult> {
        let providers = self.providers()?;
        let options = self.scan_options()?;
        Ok(scan_providers(&providers, &options).await)
    }
}
