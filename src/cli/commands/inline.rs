use anyhow::Result;

use super::{CommandResult, CommandSummary, InlineSummary, resolve_config};
use crate::{cli::args::InlineArgs, core::inline::run_inline};

pub fn inline(args: InlineArgs) -> Result<CommandResult> {
    let mut config = resolve_config(&args.common)?;
    if let Some(out_dir) = args.out_dir {
        config.out_dir = out_dir;
    }

    let run = run_inline(&config)?;
    let finding_count = run.diagnostics.missing_count();

    Ok(CommandResult {
        summary: CommandSummary::Inline(InlineSummary {
            run,
            base_dir: config.base_dir(),
            log_path: config.log_path(),
        }),
        finding_count,
        exit_on_findings: args.deny_missing,
    })
}
