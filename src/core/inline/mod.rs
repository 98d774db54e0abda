//! Build-time inlining pass.
//!
//! Every marker call in a compiled chunk is replaced, once per supported
//! locale, by the literal value it would resolve to at runtime. Calls are
//! classified once per chunk: calls with runtime-only keys or arguments are
//! left untouched and logged, the rest become replacement sites. Rendering a
//! chunk for a locale then splices all sites in one pass from the end of
//! the text, so earlier byte offsets stay valid.
//!
//! Plural sites expand to a runtime-guarded chain whose terms are resolved
//! like plain translate calls (see [`plural`]).

mod plural;
mod render;


use std::{
    cmp::Reverse,
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use regex::{Captures, Regex};

use crate::config::Config;

use super::{
    assets::read_all_assets,
    diagnostics::{ChunkDiagnostics, InlineDiagnostics},
    extract::split_key,
    scanner::{Argument, Literal, MarkerCall, MarkerFamily, Property, scan_calls},
    tree::{Translation, get_path, key_path},
};

use plural::{PendingCall, expand_plural, join_terms};
use render::{EMPTY_LITERAL, render_array, render_value};

/// File extensions of compiled chunks.
const CHUNK_EXTENSIONS: [&str; 3] = ["js", "mjs", "cjs"];

/// Identifiers the runtime library itself passes as keys; skipped silently.
const LIBRARY_KEY_NAMES: [&str; 2] = ["key", "keys"];

/// A compiled chunk to inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// File name, used for output paths and diagnostics.
    pub name: String,
    pub code: String,
}

/// A chunk rendered for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinedChunk {
    pub name: String,
    pub lang: String,
    pub code: String,
}

/// Result of [`inline_chunks`]: chunks in input order, each followed by its
/// locales in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineOutput {
    pub chunks: Vec<InlinedChunk>,
    pub diagnostics: InlineDiagnostics,
}

/// Result of [`run_inline`].
#[derive(Debug, Clone, Default)]
pub struct InlineRun {
    pub chunks: usize,
    pub locales: usize,
    /// Chunk files written, sorted.
    pub written: Vec<PathBuf>,
    pub diagnostics: InlineDiagnostics,
}

// ============================================================
// Classification
// ============================================================

#[derive(Debug)]
enum SiteKind {
    /// Raw key, possibly carrying a default after the key-value separator.
    Key(String),
    Keys(Vec<String>),
    Plural,
}

#[derive(Debug)]
struct Site {
    call: MarkerCall,
    kind: SiteKind,
    /// Replaceable calls inside this call's arguments, sorted by offset.
    nested: Vec<Site>,
}

impl Site {
    /// Add `site`, which starts at or after every site added so far.
    fn insert(sites: &mut Vec<Site>, site: Site) {
        match sites.last_mut() {
            Some(outer) if site.call.span.start < outer.call.span.end => {
                Site::insert(&mut outer.nested, site)
            }
            _ => sites.push(site),
        }
    }
}

/// A chunk's replacement sites, shared by every locale.
struct PreparedChunk<'a> {
    code: &'a str,
    /// Outermost sites, sorted by offset and non-overlapping.
    sites: Vec<Site>,
    diagnostics: ChunkDiagnostics,
}

impl<'a> PreparedChunk<'a> {
    fn new(code: &'a str, config: &Config) -> Self {
        let mut calls: Vec<MarkerCall> = MarkerFamily::ALL
            .into_iter()
            .flat_map(|family| scan_calls(code, family, config.markers.name(family)))
            .collect();
        calls.sort_by_key(|call| call.span.start);

        let mut diagnostics = ChunkDiagnostics::default();
        let mut sites: Vec<Site> = Vec::new();
        for call in calls {
            if call.arguments.is_empty() {
                continue;
            }
            let kind = match call.family {
                MarkerFamily::Plural => classify_plural(&call, &mut diagnostics),
                _ => classify_plain(&call, &mut diagnostics),
            };
            let Some(kind) = kind else {
                continue;
            };
            Site::insert(
                &mut sites,
                Site {
                    call,
                    kind,
                    nested: Vec::new(),
                },
            );
        }

        Self {
            code,
            sites,
            diagnostics,
        }
    }

    /// Render the chunk for `lang`. The returned record holds only the
    /// missing values met on the way.
    fn render(
        &self,
        lang: &str,
        translations: &HashMap<String, Translation>,
        config: &Config,
    ) -> (String, ChunkDiagnostics) {
        let mut resolver = Resolver {
            translations,
            config,
            langs: config.langs(),
            diagnostics: ChunkDiagnostics::default(),
        };

        let mut code = self.code.to_string();
        for site in self.sites.iter().rev() {
            let replacement = resolver.site(site, lang);
            code.replace_range(site.call.span.clone(), &replacement);
        }
        (code, resolver.diagnostics)
    }
}

fn is_dynamic(arg: Option<&Argument>) -> bool {
    arg.is_some_and(Argument::is_dynamic)
}

fn classify_plain(call: &MarkerCall, diagnostics: &mut ChunkDiagnostics) -> Option<SiteKind> {
    let key = call.key_arg()?;
    let dynamic_key = match key {
        Argument::Array(elements) => elements
            .iter()
            .any(|element| element.is_dynamic() || element.has_interpolation()),
        _ => key.is_dynamic() || key.has_interpolation(),
    };
    if dynamic_key {
        let library_key =
            matches!(key, Argument::Identifier(name) if LIBRARY_KEY_NAMES.contains(&name.as_str()));
        if !library_key {
            diagnostics.dynamic_key(&call.display());
        }
        return None;
    }
    if is_dynamic(call.params_arg()) || is_dynamic(call.lang_arg()) {
        diagnostics.dynamic_params(&call.display());
        return None;
    }

    match key {
        Argument::Literal(Literal::String(raw)) => Some(SiteKind::Key(raw.clone())),
        Argument::Array(elements) => Some(SiteKind::Keys(
            elements
                .iter()
                .filter_map(Argument::as_str)
                .map(str::to_string)
                .collect(),
        )),
        _ => None,
    }
}

fn classify_plural(call: &MarkerCall, diagnostics: &mut ChunkDiagnostics) -> Option<SiteKind> {
    let dynamic = is_dynamic(call.key_arg())
        || call.key_arg().is_some_and(Argument::has_interpolation)
        || is_dynamic(call.params_arg())
        || is_dynamic(call.options_arg())
        || is_dynamic(call.lang_arg());
    if dynamic {
        diagnostics.dynamic_plural(&call.display());
        return None;
    }
    Some(SiteKind::Plural)
}

// ============================================================
// Resolution
// ============================================================

struct Resolver<'a> {
    translations: &'a HashMap<String, Translation>,
    config: &'a Config,
    langs: Vec<String>,
    diagnostics: ChunkDiagnostics,
}

impl Resolver<'_> {
    /// Replacement text for `site`. Nested calls whose text is carried into
    /// the replacement, such as a call inside an interpolated template
    /// parameter, are rendered in turn.
    fn site(&mut self, site: &Site, lang: &str) -> String {
        let rendered = self.render(site, lang);
        let inner: Vec<(&str, String)> = site
            .nested
            .iter()
            .filter(|nested| rendered.contains(nested.call.raw.as_str()))
            .map(|nested| (nested.call.raw.as_str(), self.site(nested, lang)))
            .collect();
        if inner.is_empty() {
            rendered
        } else {
            replace_calls(&rendered, &inner)
        }
    }

    fn render(&mut self, site: &Site, lang: &str) -> String {
        let lang = self.resolve_lang(site.call.lang_arg(), lang);
        let params = site.call.params_arg().and_then(Argument::properties);
        match &site.kind {
            SiteKind::Key(raw) => self.lookup(&lang, raw, params),
            SiteKind::Keys(raws) => {
                let values: Vec<String> = raws
                    .iter()
                    .map(|raw| self.lookup(&lang, raw, params))
                    .collect();
                render_array(&values)
            }
            SiteKind::Plural => {
                let terms: Vec<(Option<String>, String)> =
                    expand_plural(&site.call, &lang, self.config)
                        .into_iter()
                        .map(|term| {
                            let value = self.pending(&term.call);
                            (term.guard, value)
                        })
                        .collect();
                join_terms(&terms)
            }
        }
    }

    fn pending(&mut self, call: &PendingCall) -> String {
        self.lookup(&call.lang, &call.key, Some(call.params.as_slice()))
    }

    /// The call's own locale when it names a supported one, else `lang`.
    fn resolve_lang(&self, arg: Option<&Argument>, lang: &str) -> String {
        arg.and_then(Argument::as_str)
            .filter(|explicit| self.langs.iter().any(|l| l.as_str() == *explicit))
            .unwrap_or(lang)
            .to_string()
    }

    fn lookup(&mut self, lang: &str, raw: &str, params: Option<&[Property]>) -> String {
        let (key, _) = split_key(raw, &self.config.key_value_separator);
        let value = self
            .translations
            .get(lang)
            .and_then(|tree| get_path(tree, &key_path(key, &self.config.key_separator)));
        match render_value(value, params) {
            Some(rendered) => rendered,
            None => {
                self.diagnostics.missing_value(lang, key);
                EMPTY_LITERAL.to_string()
            }
        }
    }
}

/// Replace every occurrence of each raw call text in `text` in one pass, the
/// longest text first where they overlap.
fn replace_calls(text: &str, replacements: &[(&str, String)]) -> String {
    let mut raws: Vec<&str> = replacements.iter().map(|(raw, _)| *raw).collect();
    raws.sort_by_key(|raw| Reverse(raw.len()));
    let pattern = raws
        .iter()
        .map(|raw| regex::escape(raw))
        .collect::<Vec<_>>()
        .join("|");
    let Ok(re) = Regex::new(&pattern) else {
        return text.to_string();
    };

    re.replace_all(text, |caps: &Captures| {
        replacements
            .iter()
            .find(|(raw, _)| *raw == &caps[0])
            .map_or_else(|| caps[0].to_string(), |(_, rendered)| rendered.clone())
    })
    .into_owned()
}

// ============================================================
// Entry points
// ============================================================

/// Inline `code` for one locale.
///
/// The returned record holds the chunk's dynamic calls and the values
/// missing for `lang`.
pub fn inline_chunk(
    code: &str,
    lang: &str,
    translations: &HashMap<String, Translation>,
    config: &Config,
) -> (String, ChunkDiagnostics) {
    let prepared = PreparedChunk::new(code, config);
    let (inlined, missing) = prepared.render(lang, translations, config);
    let mut diagnostics = prepared.diagnostics;
    diagnostics.merge(missing);
    (inlined, diagnostics)
}

/// Inline every chunk for every supported locale.
pub fn inline_chunks(
    chunks: &[Chunk],
    translations: &HashMap<String, Translation>,
    config: &Config,
) -> InlineOutput {
    let langs = config.langs();
    let prepared: Vec<PreparedChunk> = chunks
        .par_iter()
        .map(|chunk| PreparedChunk::new(&chunk.code, config))
        .collect();

    let jobs: Vec<(usize, &str)> = (0..chunks.len())
        .flat_map(|index| langs.iter().map(move |lang| (index, lang.as_str())))
        .collect();
    let rendered: Vec<(usize, &str, String, ChunkDiagnostics)> = jobs
        .par_iter()
        .map(|&(index, lang)| {
            let (code, missing) = prepared[index].render(lang, translations, config);
            (index, lang, code, missing)
        })
        .collect();

    let mut per_chunk: Vec<ChunkDiagnostics> =
        prepared.iter().map(|p| p.diagnostics.clone()).collect();
    let mut inlined = Vec::with_capacity(rendered.len());
    for (index, lang, code, missing) in rendered {
        per_chunk[index].merge(missing);
        inlined.push(InlinedChunk {
            name: chunks[index].name.clone(),
            lang: lang.to_string(),
            code,
        });
    }

    InlineOutput {
        chunks: inlined,
        diagnostics: InlineDiagnostics {
            chunks: chunks
                .iter()
                .map(|chunk| chunk.name.clone())
                .zip(per_chunk)
                .collect(),
        },
    }
}

/// Run inlining against the file system described by `config`.
///
/// Each chunk is written to `<chunks dir>/<lang>/<name>`; the default
/// locale's output also replaces the original chunk. The run's findings are
/// appended to the log file.
pub fn run_inline(config: &Config) -> Result<InlineRun> {
    let chunks_dir = config.chunks_dir();
    let langs = config.langs();
    let (chunks, translations) = rayon::join(
        || read_chunks(&chunks_dir),
        || read_all_assets(&config.assets_dir(), &langs, &config.format, true),
    );
    let (chunks, translations) = (chunks?, translations?);

    let output = inline_chunks(&chunks, &translations, config);

    for lang in &langs {
        let dir = chunks_dir.join(lang);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let default_lang = config.default_lang();
    let targets: Vec<(PathBuf, &str)> = output
        .chunks
        .iter()
        .flat_map(|chunk| {
            let code = chunk.code.as_str();
            let mut paths = vec![(chunks_dir.join(&chunk.lang).join(&chunk.name), code)];
            if chunk.lang == default_lang {
                paths.push((chunks_dir.join(&chunk.name), code));
            }
            paths
        })
        .collect();
    targets
        .par_iter()
        .map(|(path, code)| {
            fs::write(path, code).with_context(|| format!("Failed to write file: {}", path.display()))
        })
        .collect::<Result<()>>()?;

    let mut written: Vec<PathBuf> = targets.into_iter().map(|(path, _)| path).collect();
    written.sort();

    let header = format!("tolk inline: {}", chunks_dir.display());
    let footer = format!(
        "tolk inline: done ({} chunks, {} locales)",
        chunks.len(),
        langs.len()
    );
    output
        .diagnostics
        .append_log(&config.log_path(), &header, &footer)?;

    Ok(InlineRun {
        chunks: chunks.len(),
        locales: langs.len(),
        written,
        diagnostics: output.diagnostics,
    })
}

/// Chunk files directly under `dir`, sorted by name.
fn read_chunks(dir: &Path) -> Result<Vec<Chunk>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read chunks directory: {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read chunks directory: {}", dir.display()))?
            .path();
        let is_chunk = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| CHUNK_EXTENSIONS.contains(&ext));
        if path.is_file() && is_chunk {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .par_iter()
        .map(|path| {
            let code = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(Chunk { name, code })
        })
        .collect()
}
