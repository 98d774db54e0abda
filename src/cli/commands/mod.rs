mod command_result;
pub mod extract;
pub mod init;
pub mod inline;

use std::{env, path::PathBuf};

use anyhow::{Context, Result};

pub use command_result::*;

use super::args::CommonArgs;
use crate::config::{CONFIG_FILE_NAME, Config, ConfigLoadResult, load_config};

/// Load the configuration for a command: config file (or defaults), then
/// command-line overrides, then validation.
pub fn resolve_config(args: &CommonArgs) -> Result<Config> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => env::current_dir().context("Failed to determine current directory")?,
    };
    let root: PathBuf = root
        .canonicalize()
        .with_context(|| format!("Invalid root directory: {}", root.display()))?;

    let ConfigLoadResult { mut config, from_file } = load_config(&root)?;
    if args.verbose && !from_file {
        eprintln!(
            "Note: No {} found, using default configuration",
            CONFIG_FILE_NAME
        );
    }

    args.apply(&mut config);
    config.resolve_base_path(&root);
    config.validate()?;
    Ok(config)
}
