//! Key extraction pass.
//!
//! Pipeline: scan source roots, read and scan every file, deduplicate keys,
//! seed one tree per locale with the keys' default values, deep-merge the
//! on-disk assets over it, sort, and write the assets back.
//!
//! [`extract`] is the pure core; [`run_extract`] adds the file system.

mod keys;


use std::{
    collections::{HashMap, HashSet},
    fs,
    path::PathBuf,
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde_json::Value;

use crate::config::Config;

use super::{
    assets::{read_all_assets, write_assets},
    diagnostics::ExtractStats,
    file_scanner::scan_source_files,
    tree::{Translation, deep_clone, deep_merge, deep_set, key_path, sort_target},
};

pub use keys::{FileKeys, collect_keys, default_value, plural_key, split_key};

/// A source file and its text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub code: String,
}

/// Result of [`extract`]: one sorted tree per supported locale, in
/// configuration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractOutput {
    pub translations: Vec<(String, Translation)>,
    pub stats: ExtractStats,
}

/// Result of [`run_extract`].
#[derive(Debug, Clone, Default)]
pub struct ExtractRun {
    pub stats: ExtractStats,
    /// Asset files written, sorted.
    pub written: Vec<PathBuf>,
}

/// Build the translation trees for `sources`, merged with `assets`.
///
/// Fails only on a malformed structured default value.
pub fn extract(
    sources: &[SourceFile],
    assets: &HashMap<String, Translation>,
    config: &Config,
) -> Result<ExtractOutput> {
    let per_file: Vec<FileKeys> = sources
        .par_iter()
        .map(|source| collect_keys(&source.code, config))
        .collect();

    let mut stats = ExtractStats {
        files_scanned: sources.len(),
        ..Default::default()
    };
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = Vec::new();
    for file in per_file {
        stats.dynamic_keys += file.dynamic_keys;
        stats.dynamic_plurals += file.dynamic_plurals;
        for key in file.keys {
            if seen.insert(key.clone()) {
                unique.push(key);
            }
        }
    }
    stats.unique_keys = unique.len();

    let mut entries: Vec<(Vec<&str>, Value)> = Vec::with_capacity(unique.len());
    for raw in &unique {
        let (key, default) = split_key(raw, &config.key_value_separator);
        entries.push((
            key_path(key, &config.key_separator),
            default_value(key, default)?,
        ));
    }

    let translations = config
        .langs()
        .into_iter()
        .map(|lang| {
            let mut tree = Translation::new();
            for (path, value) in &entries {
                deep_set(&mut tree, path, deep_clone(value));
            }
            if let Some(data) = assets.get(&lang) {
                deep_merge(&mut tree, data);
            }
            (lang, sort_target(&tree))
        })
        .collect();

    Ok(ExtractOutput {
        translations,
        stats,
    })
}

/// Run extraction against the file system described by `config`.
pub fn run_extract(config: &Config) -> Result<ExtractRun> {
    let base_dir = config.base_dir();
    let files = scan_source_files(
        &base_dir,
        &config.source_files_paths,
        &config.excluded_paths,
    )?;

    let langs = config.langs();
    let assets_dir = config.assets_dir();
    let (sources, assets) = rayon::join(
        || read_sources(&files),
        || read_all_assets(&assets_dir, &langs, &config.format, false),
    );
    let (sources, assets) = (sources?, assets?);

    let output = extract(&sources, &assets, config)?;

    let written: Vec<Vec<PathBuf>> = output
        .translations
        .par_iter()
        .map(|(lang, tree)| {
            write_assets(&assets_dir.join(lang), tree, &config.filename, &config.format)
        })
        .collect::<Result<_>>()?;
    let mut written: Vec<PathBuf> = written.into_iter().flatten().collect();
    written.sort();

    Ok(ExtractRun {
        stats: output.stats,
        written,
    })
}

fn read_sources(files: &[PathBuf]) -> Result<Vec<SourceFile>> {
    files
        .par_iter()
        .map(|path| {
            let code = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            Ok(SourceFile {
                path: path.clone(),
                code,
            })
        })
        .collect()
}
