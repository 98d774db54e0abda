use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Source file extensions scanned for marker calls.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// A file name with one of these dot-separated parts is a test file, e.g.
/// `home.test.tsx`.
const TEST_FILE_MARKERS: &[&str] = &["test", "spec"];

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Paths excluded from the walk.
///
/// Glob patterns match the path relative to the base directory, or the full
/// path for patterns written as absolute paths.
struct Exclusions {
    base_dir: PathBuf,
    literal: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl Exclusions {
    fn new(base_dir: &Path, patterns: &[String]) -> Result<Self> {
        let mut literal = Vec::new();
        let mut globs = Vec::new();
        for p in patterns {
            if is_glob_pattern(p) {
                let pattern =
                    Pattern::new(p).with_context(|| format!("Invalid excluded pattern '{}'", p))?;
                globs.push(pattern);
            } else {
                literal.push(base_dir.join(p));
            }
        }
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            literal,
            globs,
        })
    }

    fn matches(&self, path: &Path) -> bool {
        if self.literal.iter().any(|excluded| path.starts_with(excluded)) {
            return true;
        }
        let full = path.to_string_lossy();
        let relative = path
            .strip_prefix(&self.base_dir)
            .map(|p| p.to_string_lossy().replace('\\', "/"));
        self.globs.iter().any(|p| {
            p.matches(&full) || relative.as_deref().is_ok_and(|rel| p.matches(rel))
        })
    }
}

/// Collect source files under `roots` (relative to `base_dir`), sorted.
///
/// Roots may be literal directories or glob patterns expanding to
/// directories. A missing literal root or an unreadable directory entry
/// fails the scan.
pub fn scan_source_files(
    base_dir: &Path,
    roots: &[String],
    excluded: &[String],
) -> Result<Vec<PathBuf>> {
    let exclusions = Exclusions::new(base_dir, excluded)?;
    let mut files = BTreeSet::new();

    for root in resolve_roots(base_dir, roots)? {
        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !exclusions.matches(entry.path()));
        for entry in walker {
            let entry =
                entry.with_context(|| format!("Failed to read directory: {}", root.display()))?;
            let path = entry.path();
            if entry.file_type().is_file() && is_source_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    Ok(files.into_iter().collect())
}

fn resolve_roots(base_dir: &Path, roots: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for root in roots {
        if is_glob_pattern(root) {
            let full_pattern = base_dir.join(root);
            let entries = glob(&full_pattern.to_string_lossy())
                .with_context(|| format!("Invalid source pattern '{}'", root))?;
            for entry in entries {
                let entry = entry.with_context(|| format!("Failed to expand '{}'", root))?;
                if entry.is_dir() {
                    paths.push(entry);
                }
            }
        } else {
            let path = base_dir.join(root);
            if !path.is_dir() {
                bail!("Source path does not exist: {}", path.display());
            }
            paths.push(path);
        }
    }
    Ok(paths)
}

fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
    has_extension && !name.split('.').any(|part| TEST_FILE_MARKERS.contains(&part))
}
