use anyhow::Result;

use super::{CommandResult, CommandSummary, ExtractSummary, resolve_config};
use crate::{cli::args::ExtractArgs, core::extract::run_extract};

pub fn extract(args: ExtractArgs) -> Result<CommandResult> {
    let config = resolve_config(&args.common)?;
    let run = run_extract(&config)?;

    Ok(CommandResult {
        summary: CommandSummary::Extract(ExtractSummary {
            run,
            base_dir: config.base_dir(),
        }),
        finding_count: 0,
        exit_on_findings: false,
    })
}
