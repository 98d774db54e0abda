use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::core::{extract::ExtractRun, inline::InlineRun};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Inline(InlineSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub run: ExtractRun,
    /// Written paths are reported relative to this directory.
    pub base_dir: PathBuf,
}

#[derive(Debug)]
pub struct InlineSummary {
    pub run: InlineRun,
    pub base_dir: PathBuf,
    pub log_path: PathBuf,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running tolk commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Findings that may fail the run (missing values for `inline`).
    pub finding_count: usize,
    /// If true, exit code 1 is returned when finding_count > 0.
    pub exit_on_findings: bool,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_findings && self.finding_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
