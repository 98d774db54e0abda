//! Report formatting and printing utilities.
//!
//! Separate from core logic so tolk can be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary, InlineSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::InlineDiagnostics;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    match &result.summary {
        CommandSummary::Extract(summary) => print_extract_to(summary, verbose, &mut stdout),
        CommandSummary::Inline(summary) => {
            print_inline_to(summary, result, verbose, &mut stdout);
            if !result.exit_on_findings {
                print_inline_warning_to(summary, verbose, &mut io::stderr().lock());
            }
        }
        CommandSummary::Init(summary) => print_init_to(summary, &mut stdout),
    }
}

/// Print the written asset files and the extraction counters.
pub fn print_extract_to<W: Write>(summary: &ExtractSummary, verbose: bool, writer: &mut W) {
    let run = &summary.run;
    for path in &run.written {
        let _ = writeln!(
            writer,
            "{} {}",
            "Wrote".green(),
            relative(path, &summary.base_dir)
        );
    }
    if verbose {
        let _ = writeln!(writer, "scanned source files: {}", run.stats.files_scanned);
    }
    for line in run.stats.summary_lines() {
        let _ = writeln!(writer, "{}", line);
    }

    let files = run.stats.files_scanned;
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} from {} source {}",
            run.stats.unique_keys,
            if run.stats.unique_keys == 1 { "key" } else { "keys" },
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print the inlining outcome. With `verbose`, also every written chunk and
/// every log line, with chunk names aligned.
pub fn print_inline_to<W: Write>(
    summary: &InlineSummary,
    result: &CommandResult,
    verbose: bool,
    writer: &mut W,
) {
    let run = &summary.run;
    if verbose {
        for path in &run.written {
            let _ = writeln!(
                writer,
                "{} {}",
                "Wrote".green(),
                relative(path, &summary.base_dir)
            );
        }
        print_findings_to(&run.diagnostics, writer);
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Inlined {} {} for {} {}",
            run.chunks,
            if run.chunks == 1 { "chunk" } else { "chunks" },
            run.locales,
            if run.locales == 1 { "locale" } else { "locales" }
        )
        .green()
    );

    if result.exit_on_findings && result.finding_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} missing translation {} (see {})",
            FAILURE_MARK.red(),
            result.finding_count,
            if result.finding_count == 1 { "value" } else { "values" },
            relative(&summary.log_path, &summary.base_dir)
        );
    }
}

/// Warn about logged findings that do not fail the run.
pub fn print_inline_warning_to<W: Write>(summary: &InlineSummary, verbose: bool, writer: &mut W) {
    let diagnostics = &summary.run.diagnostics;
    if !diagnostics.has_findings() {
        return;
    }
    let _ = writeln!(
        writer,
        "{} {} missing {}, {} dynamic {} skipped (see {}{})",
        "warning:".bold().yellow(),
        diagnostics.missing_count(),
        if diagnostics.missing_count() == 1 { "value" } else { "values" },
        diagnostics.dynamic_count(),
        if diagnostics.dynamic_count() == 1 { "call" } else { "calls" },
        relative(&summary.log_path, &summary.base_dir),
        if verbose { "" } else { " or use -v" }
    );
}

fn print_findings_to<W: Write>(diagnostics: &InlineDiagnostics, writer: &mut W) {
    let width = diagnostics
        .chunks
        .iter()
        .filter(|(_, d)| !d.is_empty())
        .map(|(name, _)| name.width())
        .max()
        .unwrap_or(0);

    for (name, chunk) in diagnostics.chunks.iter().filter(|(_, d)| !d.is_empty()) {
        let padding = " ".repeat(width - name.width());
        for line in chunk.lines() {
            let _ = writeln!(writer, "{}{}  {}", name.cyan(), padding, line);
        }
    }
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ============================================================
// Tests
// ============================================================
