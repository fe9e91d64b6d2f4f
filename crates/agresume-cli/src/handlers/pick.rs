use super::resume::resume_event;
use crate::context::ExecutionContext;
use crate::presentation::picker::{PickerOutcome, run_picker};
use crate::presentation::rows::{EMPTY_STATE, print_json, print_plain};
use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use tracing::debug;

pub async fn handle(ctx: &ExecutionContext, format: OutputFormat, dry_run: bool) -> Result<i32> {
    let result = ctx.scan().await?;

    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    if !interactive {
        debug!("not a terminal, printing list");
        match format {
            OutputFormat::Json => print_json(&result)?,
            OutputFormat::Plain => print_plain(&result.events, false),
        }
        return Ok(0);
    }

    if result.is_empty() {
        println!("{}", EMPTY_STATE);
        return Ok(0);
    }

    match run_picker(&result.events)? {
        PickerOutcome::Selected(index) => resume_event(ctx, &result.events[index], dry_run),
        PickerOutcome::Cancelled => Ok(0),
    }
}
