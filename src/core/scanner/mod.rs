//! Lightweight call-expression scanner.
//!
//! Finds marker calls in source or compiled text without building an AST.
//! The scanner walks the text with a small state machine that skips strings,
//! template text and comments, matches the call-site alias on identifier
//! boundaries, strips generic type arguments and balances the argument list.
//!
//! It is best-effort: a call whose arguments cannot be balanced is treated as
//! absent rather than reported.

mod alias;
mod argument;
mod lexer;

#[cfg(test)]
mod tests;

use std::ops::Range;

pub use alias::{MarkerFamily, resolve_aliases};
pub use argument::{
    Argument, CallExpression, Literal, Property, escape_template, parse_arguments,
    properties_to_source,
};

use lexer::{find_closing, find_identifier, skip_type_arguments, skip_whitespace};

/// A marker call found in a file or chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCall {
    pub family: MarkerFamily,
    /// Byte range of the whole call, from the alias to the closing parenthesis.
    pub span: Range<usize>,
    /// Original call text (`&code[span]`).
    pub raw: String,
    pub arguments: Vec<Argument>,
}

impl MarkerCall {
    pub fn arg(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }

    pub fn key_arg(&self) -> Option<&Argument> {
        self.arg(self.family.key_index())
    }

    pub fn params_arg(&self) -> Option<&Argument> {
        self.arg(self.family.params_index())
    }

    pub fn lang_arg(&self) -> Option<&Argument> {
        self.arg(self.family.lang_index())
    }

    pub fn options_arg(&self) -> Option<&Argument> {
        self.family.options_index().and_then(|i| self.arg(i))
    }

    /// Call text with whitespace runs collapsed, for diagnostics.
    pub fn display(&self) -> String {
        self.raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Find every call of `family` in `code`, resolving its alias first.
///
/// Returns nothing when `marker` does not occur in the text at all, which
/// keeps the scan cheap for the common file without markers.
pub fn scan_calls(code: &str, family: MarkerFamily, marker: &str) -> Vec<MarkerCall> {
    if !code.contains(marker) {
        return Vec::new();
    }

    let mut calls: Vec<MarkerCall> = resolve_aliases(code, family, marker)
        .iter()
        .flat_map(|alias| scan_alias(code, family, alias))
        .collect();
    calls.sort_by_key(|call| call.span.start);
    calls
}

/// Find every call of `alias` in `code`.
pub fn scan_alias(code: &str, family: MarkerFamily, alias: &str) -> Vec<MarkerCall> {
    find_identifier(code, alias)
        .into_iter()
        .filter_map(|start| parse_call_at(code, start, alias.len()))
        .map(|(span, arguments)| MarkerCall {
            family,
            raw: code[span.clone()].to_string(),
            span,
            arguments,
        })
        .collect()
}

fn parse_call_at(code: &str, start: usize, alias_len: usize) -> Option<(Range<usize>, Vec<Argument>)> {
    let bytes = code.as_bytes();
    let mut open = start + alias_len;
    // Type arguments must hug both the alias and the opening parenthesis.
    if bytes.get(open) == Some(&b'<') {
        open = skip_type_arguments(bytes, open)?;
    } else {
        open = skip_whitespace(bytes, open);
    }
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let close = find_closing(bytes, open)?;
    let arguments = parse_arguments(&code[open + 1..close])?;
    Some((start..close + 1, arguments))
}
