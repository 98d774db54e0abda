//! Byte-level helpers for walking JavaScript/TypeScript text.
//!
//! Nothing here builds tokens. Each helper answers a single question such as
//! "where does the region opened at this byte end", which is all the call
//! scanner needs to recover balanced argument lists. All indices are byte
//! offsets and always land on ASCII bytes, so slicing the source `&str` at
//! them is safe.

/// Whether `b` can appear inside a JavaScript identifier (ASCII subset).
pub(crate) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Whether `b` can start a JavaScript identifier (ASCII subset).
pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

pub(crate) fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// End of the identifier starting at `start`.
pub(crate) fn identifier_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && is_ident_byte(bytes[i]) {
        i += 1;
    }
    i
}

/// Index just past the string or template literal whose opening quote is at `start`.
///
/// Returns `None` for an unterminated literal, or a single/double quoted
/// literal that runs into a raw newline.
pub(crate) fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return None,
            b'$' if quote == b'`' && bytes.get(i + 1) == Some(&b'{') => {
                i = find_closing(bytes, i + 1)? + 1;
            }
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Index just past the comment starting at `start`, if `start` opens one.
pub(crate) fn skip_comment(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start) != Some(&b'/') {
        return None;
    }
    match bytes.get(start + 1) {
        Some(b'/') => {
            let mut i = start + 2;
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            Some(i)
        }
        Some(b'*') => {
            let mut i = start + 2;
            while i + 1 < bytes.len() {
                if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                    return Some(i + 2);
                }
                i += 1;
            }
            Some(bytes.len())
        }
        _ => None,
    }
}

fn closer_for(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        _ => None,
    }
}

/// Index of the bracket matching the opener at `open`.
///
/// Strings, template literals (including nested `${}` expressions) and
/// comments are skipped. A mismatched or missing closer yields `None`.
pub(crate) fn find_closing(bytes: &[u8], open: usize) -> Option<usize> {
    let mut stack = vec![closer_for(bytes[open])?];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'/' => {
                if let Some(end) = skip_comment(bytes, i) {
                    i = end;
                    continue;
                }
            }
            b'(' | b'[' | b'{' => stack.push(closer_for(bytes[i])?),
            b')' | b']' | b'}' => {
                if stack.pop() != Some(bytes[i]) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index just past a generic type-argument list (`<...>`) opened at `open`.
///
/// Only type-like content is accepted; hitting a parenthesis, a semicolon,
/// an assignment or a newline means the `<` was a comparison, not a generic.
pub(crate) fn skip_type_arguments(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            b'\'' | b'"' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'(' | b')' | b';' | b'=' | b'\n' => return None,
            b'&' | b'|' if bytes.get(i + 1) == Some(&bytes[i]) => return None,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Split `src` at top-level occurrences of `separator`.
///
/// Nested brackets, strings and comments are kept intact. Returns `None`
/// when the text is not balanced.
pub(crate) fn split_top_level(src: &str, separator: u8) -> Option<Vec<&str>> {
    let bytes = src.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'/' => {
                if let Some(end) = skip_comment(bytes, i) {
                    i = end;
                    continue;
                }
            }
            b'(' | b'[' | b'{' => {
                i = find_closing(bytes, i)? + 1;
                continue;
            }
            b')' | b']' | b'}' => return None,
            b if b == separator => {
                parts.push(&src[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&src[start..]);
    Some(parts)
}

/// Remove comments from a fragment, keeping string contents untouched.
pub(crate) fn strip_comments(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = String::with_capacity(src.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => match skip_string(bytes, i) {
                Some(end) => i = end,
                None => break,
            },
            b'/' => match skip_comment(bytes, i) {
                Some(end) => {
                    out.push_str(&src[copied..i]);
                    out.push(' ');
                    copied = end;
                    i = end;
                }
                None => i += 1,
            },
            _ => i += 1,
        }
    }
    out.push_str(&src[copied..]);
    out
}

/// Where template-literal text stopped.
enum TemplateStop {
    /// Closing backtick consumed; continue after it.
    Closed(usize),
    /// `${` consumed; an expression starts here.
    Expression(usize),
}

fn scan_template_text(bytes: &[u8], mut i: usize) -> TemplateStop {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return TemplateStop::Closed(i + 1),
            b'$' if bytes.get(i + 1) == Some(&b'{') => return TemplateStop::Expression(i + 2),
            _ => i += 1,
        }
    }
    TemplateStop::Closed(bytes.len())
}

/// Where an open `{`, `${` or JSX element hands control back when it ends.
enum Frame {
    /// `{` in code.
    Block,
    /// `${` in a template literal; its `}` resumes template text.
    Template,
    /// `{` inside JSX; its `}` resumes the enclosing tag or text.
    JsxExpression,
    /// Attributes of `<tag ...`, up to `>` or `/>`.
    JsxTag,
    /// Children of an open JSX element.
    JsxText,
}

/// Keywords a string literal may follow without a space, as minifiers emit
/// (`return"a"`, `case"b":`).
const KEYWORDS_BEFORE_EXPRESSION: &[&[u8]] = &[
    b"await", b"case", b"default", b"delete", b"do", b"else", b"export", b"from", b"import",
    b"in", b"instanceof", b"new", b"of", b"return", b"throw", b"typeof", b"void", b"yield",
];

/// Byte offsets of every code-position occurrence of the identifier `name`.
///
/// Occurrences inside string literals, template text, comments and JSX text
/// are ignored; occurrences inside `${}` template expressions and JSX
/// `{}` expressions are reported. Member accesses (`obj.name`) and function
/// declarations (`function name(`) are not call sites and are skipped.
pub(crate) fn find_identifier(src: &str, name: &str) -> Vec<usize> {
    let bytes = src.as_bytes();
    let name = name.as_bytes();
    let mut hits = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match frames.last() {
            Some(Frame::JsxText) => {
                i = match b {
                    b'{' => {
                        frames.push(Frame::JsxExpression);
                        i + 1
                    }
                    b'<' => enter_jsx_tag(bytes, i, &mut frames),
                    _ => i + 1,
                };
                continue;
            }
            Some(Frame::JsxTag) => {
                i = match b {
                    b'\'' | b'"' => skip_string(bytes, i).unwrap_or(i + 1),
                    b'{' => {
                        frames.push(Frame::JsxExpression);
                        i + 1
                    }
                    b'/' if bytes.get(i + 1) == Some(&b'>') => {
                        frames.pop();
                        i + 2
                    }
                    b'>' => {
                        frames.pop();
                        frames.push(Frame::JsxText);
                        i + 1
                    }
                    _ => i + 1,
                };
                continue;
            }
            _ => {}
        }

        match b {
            b'\'' | b'"' => {
                i = if quote_opens_string(bytes, i) {
                    skip_string(bytes, i).unwrap_or(i + 1)
                } else {
                    i + 1
                };
            }
            b'`' => i = resume_template(bytes, i + 1, &mut frames),
            b'/' => i = skip_comment(bytes, i).unwrap_or(i + 1),
            b'<' if starts_jsx_element(bytes, i) => i = enter_jsx_tag(bytes, i, &mut frames),
            b'{' => {
                frames.push(Frame::Block);
                i += 1;
            }
            b'}' => {
                i = match frames.pop() {
                    Some(Frame::Template) => resume_template(bytes, i + 1, &mut frames),
                    _ => i + 1,
                };
            }
            _ if is_ident_start(b) => {
                let end = identifier_end(bytes, i);
                if &bytes[i..end] == name && is_call_position(bytes, i) {
                    hits.push(i);
                }
                i = end;
            }
            _ if b.is_ascii_digit() => i = identifier_end(bytes, i),
            _ => i += 1,
        }
    }

    hits
}

/// Scan template text from `i`; returns where code resumes.
fn resume_template(bytes: &[u8], i: usize, frames: &mut Vec<Frame>) -> usize {
    match scan_template_text(bytes, i) {
        TemplateStop::Closed(end) => end,
        TemplateStop::Expression(start) => {
            frames.push(Frame::Template);
            start
        }
    }
}

/// A quote glued to the end of a word (`Don't`) is an apostrophe, unless the
/// word is a keyword.
fn quote_opens_string(bytes: &[u8], i: usize) -> bool {
    if i == 0 || !is_ident_byte(bytes[i - 1]) {
        return true;
    }
    let mut start = i;
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    KEYWORDS_BEFORE_EXPRESSION.contains(&&bytes[start..i])
}

/// Whether the `<` at `i` opens a JSX element rather than a comparison or a
/// type-argument list.
fn starts_jsx_element(bytes: &[u8], i: usize) -> bool {
    match bytes.get(i + 1).copied() {
        Some(b'>') => {}
        Some(b) if is_ident_start(b) => {
            let after = skip_whitespace(bytes, identifier_end(bytes, i + 1));
            // `<T,>`, `<T extends U>` and `<T>(x: T) => x` are generics.
            if bytes.get(after) == Some(&b',') || bytes[after..].starts_with(b"extends ") {
                return false;
            }
            if bytes.get(after) == Some(&b'>')
                && bytes.get(after + 1) == Some(&b'(')
                && let Some(close) = find_closing(bytes, after + 1)
            {
                let next = skip_whitespace(bytes, close + 1);
                if bytes[next..].starts_with(b"=>") || bytes.get(next) == Some(&b':') {
                    return false;
                }
            }
        }
        _ => return false,
    }

    let mut j = i;
    while j > 0 && bytes[j - 1].is_ascii_whitespace() {
        j -= 1;
    }
    j == 0
        || matches!(
            bytes[j - 1],
            b'(' | b',' | b'=' | b':' | b'?' | b'{' | b'[' | b';' | b'!' | b'&' | b'|' | b'>'
        )
        || preceded_by_word(bytes, i, b"return")
}

/// Enter the JSX tag whose `<` is at `open`; returns where scanning resumes.
fn enter_jsx_tag(bytes: &[u8], open: usize, frames: &mut Vec<Frame>) -> usize {
    match bytes.get(open + 1).copied() {
        Some(b'/') => {
            if matches!(frames.last(), Some(Frame::JsxText)) {
                frames.pop();
            }
            bytes[open..]
                .iter()
                .position(|b| *b == b'>')
                .map_or(bytes.len(), |offset| open + offset + 1)
        }
        Some(b'>') => {
            frames.push(Frame::JsxText);
            open + 2
        }
        _ => {
            frames.push(Frame::JsxTag);
            open + 1
        }
    }
}

fn is_call_position(bytes: &[u8], start: usize) -> bool {
    if start > 0 && bytes[start - 1] == b'.' {
        let is_spread = start >= 3 && &bytes[start - 3..start] == b"...";
        if !is_spread {
            return false;
        }
    }
    !preceded_by_word(bytes, start, b"function")
}

fn preceded_by_word(bytes: &[u8], start: usize, word: &[u8]) -> bool {
    let mut end = start;
    while end > 0 && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    if end == start || end < word.len() {
        return false;
    }
    let begin = end - word.len();
    &bytes[begin..end] == word && (begin == 0 || !is_ident_byte(bytes[begin - 1]))
}
