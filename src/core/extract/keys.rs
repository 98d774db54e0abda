//! Key collection from one source file.

use std::{collections::BTreeSet, sync::LazyLock};

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

use crate::{
    config::Config,
    core::{
        plural::{PluralCategory, get_options, get_rules},
        scanner::{Argument, Literal, MarkerCall, MarkerFamily, scan_calls},
    },
};

/// A default value shaped like a JSON array or object.
static STRUCTURED_DEFAULT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\[{].*[\]}]$").unwrap());

/// Marker families whose calls take a key (or array of keys) first.
const TRANSLATE_FAMILIES: [MarkerFamily; 3] = [
    MarkerFamily::Translate,
    MarkerFamily::InlineTranslate,
    MarkerFamily::UseTranslate,
];

/// Keys found in one file, in source order, plus dynamic-call counters.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileKeys {
    pub keys: Vec<String>,
    pub dynamic_keys: usize,
    pub dynamic_plurals: usize,
}

pub fn collect_keys(code: &str, config: &Config) -> FileKeys {
    let mut out = FileKeys::default();

    for family in TRANSLATE_FAMILIES {
        for call in scan_calls(code, family, config.markers.name(family)) {
            translate_call_keys(&call, &mut out);
        }
    }

    let plurals = scan_calls(code, MarkerFamily::Plural, config.markers.name(MarkerFamily::Plural));
    if !plurals.is_empty() {
        let langs = config.langs();
        for call in plurals {
            plural_call_keys(&call, &langs, config, &mut out);
        }
    }

    out
}

fn is_dynamic(arg: Option<&Argument>) -> bool {
    arg.is_some_and(Argument::is_dynamic)
}

fn translate_call_keys(call: &MarkerCall, out: &mut FileKeys) {
    let Some(key) = call.key_arg() else {
        return;
    };
    let params_dynamic = is_dynamic(call.params_arg()) || is_dynamic(call.lang_arg());

    match key {
        Argument::Array(elements) => {
            if params_dynamic {
                out.dynamic_keys += 1;
                return;
            }
            for element in elements {
                if element.is_dynamic() || element.has_interpolation() {
                    out.dynamic_keys += 1;
                } else if let Some(value) = element.as_str() {
                    out.keys.push(value.to_string());
                }
            }
        }
        Argument::Literal(Literal::String(value))
            if !key.has_interpolation() && !params_dynamic =>
        {
            out.keys.push(value.clone());
        }
        _ if key.is_dynamic() || key.has_interpolation() || params_dynamic => {
            out.dynamic_keys += 1;
        }
        _ => {}
    }
}

fn plural_call_keys(call: &MarkerCall, langs: &[String], config: &Config, out: &mut FileKeys) {
    if call.arguments.is_empty() {
        return;
    }
    let key = call.key_arg();
    let dynamic = is_dynamic(key)
        || key.is_some_and(Argument::has_interpolation)
        || is_dynamic(call.params_arg())
        || is_dynamic(call.options_arg())
        || is_dynamic(call.lang_arg());
    if dynamic {
        out.dynamic_plurals += 1;
        return;
    }

    let options = get_options(
        call.options_arg()
            .and_then(Argument::properties)
            .unwrap_or_default(),
    );
    let categories: BTreeSet<PluralCategory> = langs
        .iter()
        .flat_map(|lang| get_rules(lang, &options))
        .collect();

    let base = key
        .and_then(Argument::as_str)
        .map(|k| split_key(k, &config.key_value_separator).0);
    for category in categories {
        out.keys.push(plural_key(base, category, &config.key_separator));
    }
}

/// `<base><sep><category>`, or the bare category without a base key.
pub fn plural_key(base: Option<&str>, category: PluralCategory, key_separator: &str) -> String {
    match base {
        Some(base) if !base.is_empty() => format!("{}{}{}", base, key_separator, category),
        _ => category.to_string(),
    }
}

/// Split a raw key at the key-value separator into the key and its default.
///
/// Only the first two parts count; anything after a second separator is
/// dropped.
pub fn split_key<'a>(raw: &'a str, key_value_separator: &str) -> (&'a str, Option<&'a str>) {
    let mut parts = raw.split(key_value_separator);
    let key = parts.next().unwrap_or_default();
    (key, parts.next())
}

/// Default value for `key`.
///
/// Text shaped like a JSON array or object (and not a `{{param}}`
/// placeholder) is parsed as JSON; anything else is kept as a string. A
/// missing default is an empty string.
pub fn default_value(key: &str, raw: Option<&str>) -> Result<Value> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Ok(Value::String(String::new()));
    };
    if STRUCTURED_DEFAULT_REGEX.is_match(raw) && !raw.starts_with("{{") {
        return serde_json::from_str(raw)
            .with_context(|| format!("Invalid default value for key '{}': {}", key, raw));
    }
    Ok(Value::String(raw.to_string()))
}
