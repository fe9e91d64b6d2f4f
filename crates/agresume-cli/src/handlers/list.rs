use crate::context::ExecutionContext;
use crate::presentation::rows::{print_json, print_plain};
use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;

pub async fn handle(ctx: &ExecutionContext, format: OutputFormat) -> Result<i32> {
    let result = ctx.scan().await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Plain => print_plain(&result.events, std::io::stdout().is_terminal()),
    }

    Ok(0)
}
