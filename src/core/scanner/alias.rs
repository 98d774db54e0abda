//! Marker families and call-site alias resolution.
//!
//! A marker function may be bound under a different local name, either by an
//! import rename (`import { $translate as t } from 'qwik-speak'`) or, for the
//! hook family, by assigning the hook's result (`const t = useTranslate$()`).
//! The alias is the name the scanner actually looks for.

use std::fmt;

use regex::Regex;

/// The four marker call families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerFamily {
    /// `$translate(key, params?, lang?)`
    Translate,
    /// `$inlineTranslate(key, ctx, params?, lang?)`
    InlineTranslate,
    /// `$plural(value, key?, params?, options?, lang?)`
    Plural,
    /// The function returned by `useTranslate$()`: `t(key, params?, lang?)`
    UseTranslate,
}

impl MarkerFamily {
    pub const ALL: [MarkerFamily; 4] = [
        MarkerFamily::Translate,
        MarkerFamily::InlineTranslate,
        MarkerFamily::Plural,
        MarkerFamily::UseTranslate,
    ];

    pub fn key_index(self) -> usize {
        match self {
            MarkerFamily::Plural => 1,
            _ => 0,
        }
    }

    pub fn params_index(self) -> usize {
        match self {
            MarkerFamily::Translate | MarkerFamily::UseTranslate => 1,
            MarkerFamily::InlineTranslate | MarkerFamily::Plural => 2,
        }
    }

    pub fn options_index(self) -> Option<usize> {
        match self {
            MarkerFamily::Plural => Some(3),
            _ => None,
        }
    }

    pub fn lang_index(self) -> usize {
        match self {
            MarkerFamily::Translate | MarkerFamily::UseTranslate => 2,
            MarkerFamily::InlineTranslate => 3,
            MarkerFamily::Plural => 4,
        }
    }
}

impl fmt::Display for MarkerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarkerFamily::Translate => "translate",
            MarkerFamily::InlineTranslate => "inline-translate",
            MarkerFamily::Plural => "plural",
            MarkerFamily::UseTranslate => "use-translate",
        };
        f.write_str(name)
    }
}

/// Local names under which `marker` is called in `code`.
///
/// Import-style families fall back to the marker name when it is not
/// renamed. The hook family has no call name of its own: without an
/// assignment from the hook, nothing can be scanned.
pub fn resolve_aliases(code: &str, family: MarkerFamily, marker: &str) -> Vec<String> {
    let escaped = regex::escape(marker);
    let pattern = match family {
        MarkerFamily::UseTranslate => format!(
            r"(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:await\s+)?{}\s*(?:<[^>]*>)?\s*\(",
            escaped
        ),
        _ => format!(r"[\s,{{]{}\s+as\s+([A-Za-z_$][\w$]*)", escaped),
    };
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let mut aliases: Vec<String> = Vec::new();
    for caps in re.captures_iter(code) {
        let alias = caps[1].to_string();
        if !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }

    if aliases.is_empty() && family != MarkerFamily::UseTranslate {
        aliases.push(marker.to_string());
    }
    aliases
}
