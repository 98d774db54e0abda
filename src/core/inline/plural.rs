//! Plural call expansion.
//!
//! A plural call becomes a short-circuit chain with one term per category
//! of the resolved locale:
//!
//! ```text
//! (new Intl.PluralRules(`en-US`).select(+(n)) === `one` && `1 item` || `${n} items`)
//! ```
//!
//! Each term's value comes from a [`PendingCall`], a plain lookup of the
//! category key that is resolved by the same code as a translate call.

use crate::config::Config;
use crate::core::{
    extract::{plural_key, split_key},
    plural::{PluralCategory, get_options, get_rules},
    scanner::{Argument, MarkerCall, Property, properties_to_source},
};

/// A plain lookup produced by plural expansion.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct PendingCall {
    pub key: String,
    /// `value` bound to the plural's value, then the call's own params.
    pub params: Vec<Property>,
    pub lang: String,
}

/// One term of the chain. The last term has no guard.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct PluralTerm {
    pub guard: Option<String>,
    pub call: PendingCall,
}

pub(super) fn expand_plural(call: &MarkerCall, lang: &str, config: &Config) -> Vec<PluralTerm> {
    let value = call
        .arg(0)
        .cloned()
        .unwrap_or_else(|| Argument::Unknown("undefined".to_string()));
    let option_props = call
        .options_arg()
        .and_then(Argument::properties)
        .unwrap_or_default();
    let categories = get_rules(lang, &get_options(option_props));

    let base = call
        .key_arg()
        .and_then(Argument::as_str)
        .map(|key| split_key(key, &config.key_value_separator).0);

    let mut params = vec![Property::new("value", value.clone())];
    if let Some(props) = call.params_arg().and_then(Argument::properties) {
        params.extend(props.iter().cloned());
    }

    let last = categories.len().saturating_sub(1);
    categories
        .iter()
        .enumerate()
        .map(|(index, category)| PluralTerm {
            guard: (index < last).then(|| guard(lang, &value, *category, option_props)),
            call: PendingCall {
                key: plural_key(base, *category, &config.key_separator),
                params: params.clone(),
                lang: lang.to_string(),
            },
        })
        .collect()
}

/// Runtime check that `value` selects `category` in `lang`.
fn guard(lang: &str, value: &Argument, category: PluralCategory, options: &[Property]) -> String {
    let options = if options.is_empty() {
        String::new()
    } else {
        format!(", {{{}}}", properties_to_source(options))
    };
    format!(
        "new Intl.PluralRules(`{}`{}).select(+({})) === `{}`",
        lang,
        options,
        value.to_source(),
        category
    )
}

/// Join rendered terms into the parenthesized chain.
pub(super) fn join_terms(terms: &[(Option<String>, String)]) -> String {
    let body: Vec<String> = terms
        .iter()
        .map(|(guard, value)| match guard {
            Some(guard) => format!("{} && {}", guard, value),
            None => value.clone(),
        })
        .collect();
    format!("({})", body.join(" || "))
}
