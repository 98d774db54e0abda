//! Per-locale asset files.
//!
//! Layout on disk: `<assets>/<lang>/<name>.<format>`. Every file of a locale
//! directory is read and shallow-merged in file-name order, so a later file
//! wins on a top-level key collision.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde_json::Value;

use super::tree::{Translation, min_depth};

/// Parse one asset file. The root must be an object.
pub fn parse_asset(path: &Path, content: &str) -> Result<Translation> {
    let value: Value = serde_json::from_str(content)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("Root of JSON file must be an object: {}", path.display()),
    }
}

/// Asset files of one locale directory, sorted by file name.
fn asset_files(dir: &Path, format: &str) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(format) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read and shallow-merge every asset file of one locale.
///
/// A missing directory yields an empty tree unless `required` is set.
pub fn read_locale_assets(dir: &Path, format: &str, required: bool) -> Result<Translation> {
    if !dir.is_dir() {
        if required {
            bail!("Assets directory does not exist: {}", dir.display());
        }
        return Ok(Translation::new());
    }

    let parsed: Vec<Translation> = asset_files(dir, format)?
        .par_iter()
        .map(|path| {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            parse_asset(path, &content)
        })
        .collect::<Result<_>>()?;

    let mut merged = Translation::new();
    for data in parsed {
        merged.extend(data);
    }
    Ok(merged)
}

/// Read the assets of every locale under `assets_dir`.
pub fn read_all_assets(
    assets_dir: &Path,
    locales: &[String],
    format: &str,
    required: bool,
) -> Result<HashMap<String, Translation>> {
    locales
        .par_iter()
        .map(|lang| {
            let data = read_locale_assets(&assets_dir.join(lang), format, required)?;
            Ok((lang.clone(), data))
        })
        .collect()
}

/// Split a locale tree into asset files.
///
/// Flat keys (minimum depth 0), together with a top-level key named like the
/// default file, go into `filename`. Every other top-level key gets a file
/// of its own. The default file comes first when present.
pub fn split_asset_files(tree: &Translation, filename: &str) -> Vec<(String, Translation)> {
    let mut default_file = Translation::new();
    let mut own_files = Vec::new();

    for (key, value) in tree {
        if key == filename || min_depth(value) == 0 {
            default_file.insert(key.clone(), value.clone());
        } else {
            let mut single = Translation::new();
            single.insert(key.clone(), value.clone());
            own_files.push((key.clone(), single));
        }
    }

    let mut files = Vec::with_capacity(own_files.len() + 1);
    if !default_file.is_empty() {
        files.push((filename.to_string(), default_file));
    }
    files.extend(own_files);
    files
}

/// Pretty JSON with two-space indentation and a trailing newline.
pub fn to_json_string(tree: &Translation) -> Result<String> {
    let content = serde_json::to_string_pretty(tree).context("Failed to serialize JSON")?;
    Ok(format!("{}\n", content))
}

/// Write one locale tree to `dir`, returning the written paths.
pub fn write_assets(
    dir: &Path,
    tree: &Translation,
    filename: &str,
    format: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    split_asset_files(tree, filename)
        .par_iter()
        .map(|(name, data)| {
            let path = dir.join(format!("{}.{}", name, format));
            fs::write(&path, to_json_string(data)?)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            Ok(path)
        })
        .collect()
}
