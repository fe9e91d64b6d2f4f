use crate::{Error, Result};
use agresume_types::ResumeDescriptor;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tracing::{debug, info};

/// Output of a non-interactive run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Exit code; `None` when killed by a signal or on timeout
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Run a resume command attached to the terminal and wait for it
pub fn launch_interactive(descriptor: &ResumeDescriptor, cwd: &Path) -> Result<ExitStatus> {
    info!(command = %descriptor.command_line(), cwd = %cwd.display(), "launching");

    std::process::Command::new(&descriptor.command)
        .args(&descriptor.args)
        .current_dir(cwd)
        .status()
        .map_err(|err| Error::Launch(format!("failed to start `{}`: {}", descriptor.command, err)))
}

/// Run a command with captured output; on timeout the child is killed.
pub async fn run_captured<I, S>(
    command: &str,
    args: I,
    timeout: Option<Duration>,
) -> Result<CapturedOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let child = tokio::process::Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|err| Error::Launch(format!("failed to start `{}`: {}", command, err)))?;

    // Dropping the future drops the child, which kills it
    let output = child.wait_with_output();
    let output = match timeout {
        Some(budget) => match tokio::time::timeout(budget, output).await {
            Ok(output) => output?,
            Err(_) => {
                debug!(command, timeout_ms = budget.as_millis() as u64, "command timed out");
                return Ok(CapturedOutput {
                    timed_out: true,
                    ..CapturedOutput::default()
                });
            }
        },
        None => output.await?,
    };

    Ok(CapturedOutput {
        status: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        timed_out: false,
    })
}
