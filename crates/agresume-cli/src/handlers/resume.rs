use crate::context::ExecutionContext;
use agresume_runtime::launch_interactive;
use agresume_types::ToolEvent;
use anyhow::Result;
use tracing::info;

/// Launch (or print, for `--dry-run`) the resume command of `event`.
///
/// Returns the exit code to propagate. An event without a resume descriptor
/// prints a message and yields 1.
pub fn resume_event(ctx: &ExecutionContext, event: &ToolEvent, dry_run: bool) -> Result<i32> {
    let Some(descriptor) = event.resume.as_ref() else {
        eprintln!("{} session {} cannot be resumed", event.label, event.id);
        return Ok(1);
    };

    if dry_run {
        println!("{}", descriptor.command_line());
        return Ok(0);
    }

    info!(id = %event.id, "resuming session");
    let status = launch_interactive(descriptor, &ctx.project_root)?;
    Ok(status.code().unwrap_or(1))
}
