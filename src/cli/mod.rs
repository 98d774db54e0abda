//! Command-line interface layer.
//!
//! Parses arguments, runs the requested pass through [`crate::core`] and
//! prints the outcome. Nothing in `core` prints.

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

use std::process::ExitCode;

use anyhow::Result;

pub use args::{Arguments, Command, CommonArgs, ExtractArgs, InlineArgs};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(result.exit_status().into())
}
