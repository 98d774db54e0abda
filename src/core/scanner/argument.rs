//! Argument model for scanned calls.
//!
//! Arguments are classified from their source text after the enclosing call
//! has been balanced. Only a narrow grammar is recognized (literals, arrays,
//! objects, identifier paths and nested calls); everything else is kept as
//! [`Argument::Unknown`] with its raw text.

use std::{fmt, sync::LazyLock};

use regex::Regex;

use super::lexer::{
    find_closing, identifier_end, is_ident_start, skip_string, skip_type_arguments,
    skip_whitespace, split_top_level, strip_comments,
};

static IDENTIFIER_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][\w$]*(?:\s*\??\.\s*[A-Za-z_$][\w$]*)*$").unwrap()
});

static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap()
});

static INTERPOLATION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{.*\}").unwrap());

/// A literal scalar argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => f.write_str(s),
            Literal::Number(n) => write!(f, "{}", n),
        }
    }
}

/// One `key: value` entry of an object argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Argument,
}

impl Property {
    pub fn new(key: impl Into<String>, value: Argument) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A call expression nested inside another call's arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: String,
    pub arguments: Vec<Argument>,
    pub raw: String,
}

/// A parsed call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// String (quote or template without known shape) or number literal.
    Literal(Literal),
    /// Identifier or member path, e.g. `count` or `props.ctx`.
    Identifier(String),
    Array(Vec<Argument>),
    Object(Vec<Property>),
    Call(CallExpression),
    /// Any other expression, kept verbatim.
    Unknown(String),
}

impl Argument {
    pub fn string(value: impl Into<String>) -> Self {
        Argument::Literal(Literal::String(value.into()))
    }

    /// String value of a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Argument::Literal(Literal::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn properties(&self) -> Option<&[Property]> {
        match self {
            Argument::Object(props) => Some(props),
            _ => None,
        }
    }

    /// Whether the argument can only be known at runtime.
    ///
    /// Identifiers, nested calls and arbitrary expressions are dynamic;
    /// `undefined` and `null` placeholders are not.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Argument::Identifier(_) | Argument::Call(_) => true,
            Argument::Unknown(raw) => !matches!(raw.as_str(), "undefined" | "null"),
            _ => false,
        }
    }

    /// Whether a string literal carries template interpolation (`${...}`).
    pub fn has_interpolation(&self) -> bool {
        self.as_str()
            .is_some_and(|value| INTERPOLATION_REGEX.is_match(value))
    }

    /// JavaScript source for the argument.
    ///
    /// String literals are emitted as template literals so they can be
    /// spliced next to other template output.
    pub fn to_source(&self) -> String {
        match self {
            Argument::Literal(Literal::String(s)) => format!("`{}`", escape_template(s)),
            Argument::Literal(Literal::Number(n)) => n.to_string(),
            Argument::Identifier(raw) | Argument::Unknown(raw) => raw.clone(),
            Argument::Call(call) => call.raw.clone(),
            Argument::Array(elements) => {
                let items: Vec<String> = elements.iter().map(Argument::to_source).collect();
                format!("[{}]", items.join(", "))
            }
            Argument::Object(props) => format!("{{{}}}", properties_to_source(props)),
        }
    }
}

/// Render properties as the body of an object literal: `a: 1, b: x`.
pub fn properties_to_source(props: &[Property]) -> String {
    props
        .iter()
        .map(|p| format!("{}: {}", property_key_source(&p.key), p.value.to_source()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn property_key_source(key: &str) -> String {
    let bytes = key.as_bytes();
    if !bytes.is_empty() && is_ident_start(bytes[0]) && identifier_end(bytes, 0) == bytes.len() {
        key.to_string()
    } else {
        serde_json::Value::String(key.to_string()).to_string()
    }
}

/// Escape text for use inside a template literal.
pub fn escape_template(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Parse the text between a call's parentheses into arguments.
///
/// Returns `None` when the text cannot be balanced.
pub fn parse_arguments(src: &str) -> Option<Vec<Argument>> {
    let src = strip_comments(src);
    split_top_level(&src, b',')?
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_argument)
        .collect()
}

fn parse_argument(text: &str) -> Option<Argument> {
    let bytes = text.as_bytes();
    let last = bytes.len() - 1;

    match bytes[0] {
        b'\'' | b'"' | b'`' => {
            let end = skip_string(bytes, 0)?;
            if end == bytes.len() {
                return Some(Argument::Literal(Literal::String(unescape(
                    &text[1..text.len() - 1],
                ))));
            }
        }
        b'[' => {
            if find_closing(bytes, 0)? == last {
                return parse_arguments(&text[1..last]).map(Argument::Array);
            }
        }
        b'{' => {
            if find_closing(bytes, 0)? == last {
                return Some(
                    parse_properties(&text[1..last])
                        .map(Argument::Object)
                        .unwrap_or_else(|| Argument::Unknown(text.to_string())),
                );
            }
        }
        _ => {}
    }

    if NUMBER_REGEX.is_match(text)
        && let Ok(n) = text.parse::<f64>()
    {
        return Some(Argument::Literal(Literal::Number(n)));
    }

    if IDENTIFIER_PATH_REGEX.is_match(text) {
        return Some(match text {
            "undefined" | "null" | "true" | "false" => Argument::Unknown(text.to_string()),
            _ => Argument::Identifier(text.to_string()),
        });
    }

    if let Some(call) = parse_call_expression(text) {
        return Some(Argument::Call(call));
    }

    Some(Argument::Unknown(text.to_string()))
}

/// Recognize `callee(...)` or `callee<T>(...)` spanning all of `text`.
fn parse_call_expression(text: &str) -> Option<CallExpression> {
    let bytes = text.as_bytes();
    if !is_ident_start(bytes[0]) {
        return None;
    }

    let mut i = 0;
    loop {
        i = identifier_end(bytes, i);
        let next = skip_whitespace(bytes, i);
        match bytes.get(next).copied() {
            Some(b'.') => {
                i = skip_whitespace(bytes, next + 1);
                if !bytes.get(i).is_some_and(|b| is_ident_start(*b)) {
                    return None;
                }
            }
            Some(b'?') if bytes.get(next + 1) == Some(&b'.') => {
                i = skip_whitespace(bytes, next + 2);
                if !bytes.get(i).is_some_and(|b| is_ident_start(*b)) {
                    return None;
                }
            }
            _ => break,
        }
    }
    let callee = text[..i].trim().to_string();

    let mut open = skip_whitespace(bytes, i);
    if bytes.get(i) == Some(&b'<') {
        open = skip_type_arguments(bytes, i)?;
    }
    if bytes.get(open) != Some(&b'(') || find_closing(bytes, open)? != bytes.len() - 1 {
        return None;
    }

    Some(CallExpression {
        callee,
        arguments: parse_arguments(&text[open + 1..bytes.len() - 1])?,
        raw: text.to_string(),
    })
}

/// Parse object-literal properties. Spread entries and computed keys are not
/// statically known, so any of them makes the whole object unparseable.
fn parse_properties(src: &str) -> Option<Vec<Property>> {
    let mut props = Vec::new();
    for part in split_top_level(src, b',')? {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if part.starts_with("...") || part.starts_with('[') {
            return None;
        }

        let entry = split_top_level(part, b':')?;
        match entry.as_slice() {
            [shorthand] => {
                let name = shorthand.trim();
                if !IDENTIFIER_PATH_REGEX.is_match(name) || name.contains('.') {
                    return None;
                }
                props.push(Property::new(name, Argument::Identifier(name.to_string())));
            }
            [key, rest @ ..] => {
                let key = property_key(key.trim())?;
                let value = rest.join(":");
                let value = value.trim();
                if value.is_empty() {
                    return None;
                }
                props.push(Property::new(key, parse_argument(value)?));
            }
            [] => return None,
        }
    }
    Some(props)
}

fn property_key(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    match *bytes.first()? {
        b'\'' | b'"' => {
            (skip_string(bytes, 0)? == bytes.len()).then(|| unescape(&raw[1..raw.len() - 1]))
        }
        b if is_ident_start(b) && identifier_end(bytes, 0) == bytes.len() => Some(raw.to_string()),
        b if b.is_ascii_digit() => Some(raw.to_string()),
        _ => None,
    }
}

/// Resolve JavaScript escape sequences in the body of a string literal.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            Some('\n') => {}
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex);
            }
            Some('u') => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                push_code_point(&mut out, &hex);
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn push_code_point(out: &mut String, hex: &str) {
    if let Some(c) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        out.push(c);
    }
}
