use crate::context::ExecutionContext;
use crate::types::OutputFormat;
use agresume_core::path_exists;
use agresume_runtime::{ProviderSettings, run_captured};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const VERSION_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Serialize)]
struct ProviderCheck {
    id: &'static str,
    label: &'static str,
    enabled: bool,
    log_root: String,
    log_root_exists: bool,
    command: &'static str,
    /// First line of `<command> --version`, if the tool answered
    version: Option<String>,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    config_path: String,
    project_root: String,
    providers: Vec<ProviderCheck>,
}

pub async fn handle(ctx: &ExecutionContext, format: OutputFormat) -> Result<i32> {
    let config = ctx.config()?;

    let mut providers = Vec::new();
    for settings in config.provider_settings() {
        providers.push(check_provider(settings).await);
    }

    let report = DoctorReport {
        config_path: ctx.config_path().display().to_string(),
        project_root: ctx.project_root.display().to_string(),
        providers,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => print_report(&report),
    }

    Ok(0)
}

async fn check_provider(settings: ProviderSettings) -> ProviderCheck {
    let version = match run_captured(settings.command, ["--version"], Some(VERSION_TIMEOUT)).await {
        Ok(output) if output.success() => output
            .stdout
            .lines()
            .next()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty()),
        Ok(output) => {
            debug!(provider = settings.id, timed_out = output.timed_out, "version check failed");
            None
        }
        Err(err) => {
            debug!(provider = settings.id, error = %err, "tool not available");
            None
        }
    };

    ProviderCheck {
        id: settings.id,
        label: settings.label,
        enabled: settings.enabled,
        log_root_exists: path_exists(&settings.log_root),
        log_root: settings.log_root.display().to_string(),
        command: settings.command,
        version,
    }
}

fn print_report(report: &DoctorReport) {
    println!("Config:       {}", report.config_path);
    println!("Project root: {}", report.project_root);
    println!();

    for check in &report.providers {
        let status = if check.enabled {
            format!("{}", "enabled".green())
        } else {
            format!("{}", "disabled".yellow())
        };
        println!("{} ({})", check.label.bold(), status);

        let root_state = if check.log_root_exists {
            format!("{}", "found".green())
        } else {
            format!("{}", "missing".red())
        };
        println!("  logs:    {} [{}]", check.log_root, root_state);

        match &check.version {
            Some(version) => println!("  command: {} ({})", check.command, version.cyan()),
            None => println!("  command: {} ({})", check.command, "not found".dimmed()),
        }
    }
}
