use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::core::{file_scanner::is_glob_pattern, scanner::MarkerFamily};

pub const CONFIG_FILE_NAME: &str = ".tolkrc.json";

/// A supported locale.
///
/// In the config file a locale is either a bare tag (`"en-US"`) or an object
/// carrying formatting details alongside the tag.
///
/// Only `lang` drives extraction and inlining. The formatting fields belong to
/// the runtime library that shares this config file; they are parsed so a
/// detailed entry validates, and written back unchanged whenever the config
/// is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "LocaleSpec", into = "LocaleSpec")]
pub struct Locale {
    pub lang: String,
    /// Numeric-format extension tag, e.g. `u-nu-latn`. Runtime only.
    pub extension: Option<String>,
    /// Runtime only.
    pub currency: Option<String>,
    /// Runtime only.
    pub time_zone: Option<String>,
    /// Unit display names keyed by unit. Runtime only.
    pub units: Option<BTreeMap<String, String>>,
}

impl Locale {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            ..Default::default()
        }
    }

    fn is_bare(&self) -> bool {
        self.extension.is_none()
            && self.currency.is_none()
            && self.time_zone.is_none()
            && self.units.is_none()
    }
}

#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum LocaleSpec {
    Tag(String),
    Detailed(LocaleFields),
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct LocaleFields {
    lang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    units: Option<BTreeMap<String, String>>,
}

impl From<LocaleSpec> for Locale {
    fn from(spec: LocaleSpec) -> Self {
        match spec {
            LocaleSpec::Tag(lang) => Locale::new(lang),
            LocaleSpec::Detailed(fields) => Locale {
                lang: fields.lang,
                extension: fields.extension,
                currency: fields.currency,
                time_zone: fields.time_zone,
                units: fields.units,
            },
        }
    }
}

impl From<Locale> for LocaleSpec {
    fn from(locale: Locale) -> Self {
        if locale.is_bare() {
            LocaleSpec::Tag(locale.lang)
        } else {
            LocaleSpec::Detailed(LocaleFields {
                lang: locale.lang,
                extension: locale.extension,
                currency: locale.currency,
                time_zone: locale.time_zone,
                units: locale.units,
            })
        }
    }
}

/// Call names of the four marker families.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Markers {
    #[serde(default = "default_translate_marker")]
    pub translate: String,
    #[serde(default = "default_inline_translate_marker")]
    pub inline_translate: String,
    #[serde(default = "default_plural_marker")]
    pub plural: String,
    #[serde(default = "default_use_translate_marker")]
    pub use_translate: String,
}

fn default_translate_marker() -> String {
    "$translate".to_string()
}

fn default_inline_translate_marker() -> String {
    "$inlineTranslate".to_string()
}

fn default_plural_marker() -> String {
    "$plural".to_string()
}

fn default_use_translate_marker() -> String {
    "useTranslate$".to_string()
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            translate: default_translate_marker(),
            inline_translate: default_inline_translate_marker(),
            plural: default_plural_marker(),
            use_translate: default_use_translate_marker(),
        }
    }
}

impl Markers {
    pub fn name(&self, family: MarkerFamily) -> &str {
        match family {
            MarkerFamily::Translate => &self.translate,
            MarkerFamily::InlineTranslate => &self.inline_translate,
            MarkerFamily::Plural => &self.plural,
            MarkerFamily::UseTranslate => &self.use_translate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_source_files_paths")]
    pub source_files_paths: Vec<String>,
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(default = "default_assets_path")]
    pub assets_path: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_filename")]
    pub filename: String,
    #[serde(default = "default_key_separator")]
    pub key_separator: String,
    #[serde(default = "default_key_value_separator")]
    pub key_value_separator: String,
    #[serde(default = "default_supported_locales")]
    pub supported_locales: Vec<Locale>,
    /// First supported locale when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    #[serde(default = "default_chunks_dir")]
    pub chunks_dir: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default)]
    pub markers: Markers,
}

fn default_base_path() -> String {
    "./".to_string()
}

fn default_source_files_paths() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_assets_path() -> String {
    "i18n".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

fn default_filename() -> String {
    "app".to_string()
}

fn default_key_separator() -> String {
    ".".to_string()
}

fn default_key_value_separator() -> String {
    "@@".to_string()
}

fn default_supported_locales() -> Vec<Locale> {
    vec![Locale::new("en-US")]
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_chunks_dir() -> String {
    "build".to_string()
}

fn default_log_file() -> String {
    "tolk-inline.log".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            source_files_paths: default_source_files_paths(),
            excluded_paths: Vec::new(),
            assets_path: default_assets_path(),
            format: default_format(),
            filename: default_filename(),
            key_separator: default_key_separator(),
            key_value_separator: default_key_value_separator(),
            supported_locales: default_supported_locales(),
            default_locale: None,
            out_dir: default_out_dir(),
            chunks_dir: default_chunks_dir(),
            log_file: default_log_file(),
            markers: Markers::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// The error names the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.supported_locales.is_empty() {
            bail!("'supportedLocales' must contain at least one locale");
        }
        for locale in &self.supported_locales {
            locale
                .lang
                .parse::<LanguageIdentifier>()
                .with_context(|| format!("Invalid locale in 'supportedLocales': \"{}\"", locale.lang))?;
        }
        let default_lang = self.default_lang();
        if !self.langs().iter().any(|lang| lang == default_lang) {
            bail!(
                "'defaultLocale' \"{}\" is not one of 'supportedLocales'",
                default_lang
            );
        }

        if self.key_separator.is_empty() {
            bail!("'keySeparator' must not be empty");
        }
        if self.key_value_separator.is_empty() {
            bail!("'keyValueSeparator' must not be empty");
        }
        if self.key_separator == self.key_value_separator {
            bail!(
                "'keySeparator' and 'keyValueSeparator' must differ (both \"{}\")",
                self.key_separator
            );
        }
        if self.format != "json" {
            bail!("Unsupported 'format': \"{}\" (only \"json\" is supported)", self.format);
        }

        for pattern in &self.excluded_paths {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'excludedPaths': \"{}\"", pattern)
                })?;
            }
        }

        Ok(())
    }

    /// Tags of all supported locales, in configuration order.
    pub fn langs(&self) -> Vec<String> {
        self.supported_locales
            .iter()
            .map(|locale| locale.lang.clone())
            .collect()
    }

    pub fn default_lang(&self) -> &str {
        match &self.default_locale {
            Some(lang) => lang,
            None => self
                .supported_locales
                .first()
                .map(|locale| locale.lang.as_str())
                .unwrap_or_default(),
        }
    }

    /// Make `base_path` absolute against `root`.
    pub fn resolve_base_path(&mut self, root: &Path) {
        self.base_path = root.join(&self.base_path).to_string_lossy().into_owned();
    }

    pub fn base_dir(&self) -> PathBuf {
        PathBuf::from(&self.base_path)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.base_dir().join(&self.assets_path)
    }

    pub fn chunks_dir(&self) -> PathBuf {
        self.base_dir().join(&self.out_dir).join(&self.chunks_dir)
    }

    pub fn log_path(&self) -> PathBuf {
        self.base_dir().join(&self.log_file)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

/// Load the configuration file found from `start_dir`, or the defaults.
///
/// Validation is left to the caller, after command-line overrides apply.
pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
