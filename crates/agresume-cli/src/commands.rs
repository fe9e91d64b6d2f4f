use crate::args::{Cli, Commands};
use crate::context::ExecutionContext;
use crate::handlers;
use crate::logging;
use anyhow::Result;

/// Dispatch the parsed command line; returns the process exit code
pub async fn run(cli: Cli) -> Result<i32> {
    logging::init(cli.log_level);

    let ctx = ExecutionContext::new(
        cli.config.as_deref(),
        cli.project_root.as_deref(),
        cli.all,
        cli.limit,
    )?;

    if let Some(Commands::Doctor) = cli.command {
        return handlers::doctor::handle(&ctx, cli.format).await;
    }

    if cli.list {
        return handlers::list::handle(&ctx, cli.format).await;
    }

    if cli.last {
        return handlers::last::handle(&ctx, cli.dry_run).await;
    }

    handlers::pick::handle(&ctx, cli.format, cli.dry_run).await
}
