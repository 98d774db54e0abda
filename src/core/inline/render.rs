//! Rendering of looked-up translation values as JavaScript expressions.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::core::scanner::{Argument, Literal, Property, escape_template};

/// `{{ name }}` parameter token, with at most one space of padding.
static PARAM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s?([^{}\s]*)\s?\}\}").unwrap());

/// Replacement for a value that is missing.
pub(super) const EMPTY_LITERAL: &str = "``";

/// Expression for `value`, or `None` when the value counts as missing.
///
/// Strings become template literals with `params` interpolated, numbers
/// numeric literals, and objects or arrays JSON literals. Empty strings,
/// `null` and booleans are missing.
pub(super) fn render_value(value: Option<&Value>, params: Option<&[Property]>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(render_string(text, params)),
        Value::Number(number) => Some(number.to_string()),
        value @ (Value::Object(_) | Value::Array(_)) => Some(value.to_string()),
        _ => None,
    }
}

fn render_string(text: &str, params: Option<&[Property]>) -> String {
    let escaped = escape_template(text);
    let body = match params {
        Some(params) if !params.is_empty() => PARAM_REGEX
            .replace_all(&escaped, |caps: &Captures| {
                match params.iter().find(|p| p.key == caps[1]) {
                    Some(param) => interpolate(&param.value),
                    None => caps[0].to_string(),
                }
            })
            .into_owned(),
        _ => escaped,
    };
    format!("`{}`", body)
}

/// Text of one parameter inside a template literal: literals inline, any
/// other expression deferred to runtime. A literal that is itself a template
/// with substitutions is spliced as is.
fn interpolate(value: &Argument) -> String {
    match value {
        Argument::Literal(Literal::String(text)) if value.has_interpolation() => text.clone(),
        Argument::Literal(Literal::String(text)) => escape_template(text),
        Argument::Literal(Literal::Number(number)) => number.to_string(),
        other => format!("${{{}}}", other.to_source()),
    }
}

/// Array literal of already rendered elements.
pub(super) fn render_array(elements: &[String]) -> String {
    format!("[{}]", elements.join(","))
}
