//! Counters and log lines produced by both passes.
//!
//! Workers never write here concurrently: each pass collects these records
//! from its workers and merges them on the controlling thread.

use std::{fs::OpenOptions, io::Write, path::Path};

use anyhow::{Context, Result};

/// Counters of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub files_scanned: usize,
    pub unique_keys: usize,
    /// Translate calls skipped because of a dynamic key, params or lang.
    pub dynamic_keys: usize,
    /// Plural calls skipped because of a dynamic key, params, options or lang.
    pub dynamic_plurals: usize,
}

impl ExtractStats {
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("extracted keys: {}", self.unique_keys),
            format!("translations skipped due to dynamic keys: {}", self.dynamic_keys),
            format!("plurals skipped due to dynamic keys/options: {}", self.dynamic_plurals),
        ]
    }
}

/// Findings of inlining one chunk, across all locales.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkDiagnostics {
    pub missing_values: Vec<String>,
    pub dynamic_keys: Vec<String>,
    pub dynamic_params: Vec<String>,
}

impl ChunkDiagnostics {
    /// Record a missing value. Repeats for the same locale and key are dropped.
    pub fn missing_value(&mut self, lang: &str, key: &str) {
        let line = format!("{} - missing value for key: {}", lang, key);
        if !self.missing_values.contains(&line) {
            self.missing_values.push(line);
        }
    }

    pub fn dynamic_key(&mut self, call: &str) {
        self.dynamic_keys.push(format!("dynamic key: {} - skip", call));
    }

    pub fn dynamic_params(&mut self, call: &str) {
        self.dynamic_params.push(format!("dynamic params: {} - skip", call));
    }

    pub fn dynamic_plural(&mut self, call: &str) {
        self.dynamic_params.push(format!("dynamic plural: {} - skip", call));
    }

    /// Fold another record for the same chunk into this one.
    pub fn merge(&mut self, other: ChunkDiagnostics) {
        for line in other.missing_values {
            if !self.missing_values.contains(&line) {
                self.missing_values.push(line);
            }
        }
        self.dynamic_keys.extend(other.dynamic_keys);
        self.dynamic_params.extend(other.dynamic_params);
    }

    pub fn is_empty(&self) -> bool {
        self.missing_values.is_empty() && self.dynamic_keys.is_empty() && self.dynamic_params.is_empty()
    }

    /// Log lines: missing values, then dynamic keys, then dynamic params.
    pub fn lines(&self) -> impl Iterator<Item = &String> {
        self.missing_values
            .iter()
            .chain(&self.dynamic_keys)
            .chain(&self.dynamic_params)
    }
}

/// Findings of one inlining run, per chunk in chunk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineDiagnostics {
    pub chunks: Vec<(String, ChunkDiagnostics)>,
}

impl InlineDiagnostics {
    pub fn missing_count(&self) -> usize {
        self.chunks.iter().map(|(_, d)| d.missing_values.len()).sum()
    }

    pub fn dynamic_count(&self) -> usize {
        self.chunks
            .iter()
            .map(|(_, d)| d.dynamic_keys.len() + d.dynamic_params.len())
            .sum()
    }

    pub fn has_findings(&self) -> bool {
        self.chunks.iter().any(|(_, d)| !d.is_empty())
    }

    /// Render the log block for this run. Chunks without findings are omitted.
    pub fn render_log(&self, header: &str, footer: &str) -> String {
        let mut out = format!("{}\n", header);
        for (chunk, diagnostics) in &self.chunks {
            if diagnostics.is_empty() {
                continue;
            }
            out.push_str(&format!("{}:\n", chunk));
            for line in diagnostics.lines() {
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str(footer);
        out.push('\n');
        out
    }

    /// Append the log block to `path`, creating the file if needed.
    pub fn append_log(&self, path: &Path, header: &str, footer: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        file.write_all(self.render_log(header, footer).as_bytes())
            .with_context(|| format!("Failed to write log file: {}", path.display()))
    }
}
