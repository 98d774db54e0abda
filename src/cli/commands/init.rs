use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default configuration to `dir`. Never overwrites.
pub fn init(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    let content = format!("{}\n", default_config_json()?);
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write file: {}", config_path.display()))?;

    Ok(CommandResult {
        summary: CommandSummary::Init(InitSummary { created: true }),
        finding_count: 0,
        exit_on_findings: false,
    })
}
