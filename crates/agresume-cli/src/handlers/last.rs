use super::resume::resume_event;
use crate::context::ExecutionContext;
use anyhow::{Result, bail};

pub async fn handle(ctx: &ExecutionContext, dry_run: bool) -> Result<i32> {
    let result = ctx.scan().await?;

    let Some(latest) = result.latest else {
        bail!("No sessions found for {}", ctx.project_root.display());
    };
    if !latest.can_resume() {
        bail!("{} session {} cannot be resumed", latest.label, latest.id);
    }

    resume_event(ctx, &latest, dry_run)
}
