//! Dispatch of a parsed command line to its command handler.

use std::env;

use anyhow::{Context, Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, extract::extract, init::init, inline::inline},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(args)) => extract(args),
        Some(Command::Inline(args)) => inline(args),
        Some(Command::Init) => {
            let dir = env::current_dir().context("Failed to determine current directory")?;
            init(&dir)
        }
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
