//! Scalar classification, decoding and canonical encoding.
//!
//! A scalar token is exactly one of:
//!
//! - `null`
//! - `true` / `false`
//! - an integer: optional `-` followed by ASCII digits, within `i64`
//! - a quoted string: `"..."` with `\n \t \r \\ \"` escapes
//! - an identifier string: one or more of `[A-Za-z0-9_]`
//!
//! The checks run in that order, so the bare token `30` is an integer and the
//! bare token `true` a boolean. The encoder mirrors this: a string is written
//! bare only when decoding the bare form would give the same string back.
//!
//! ## Escape leniency
//!
//! An unrecognised escape such as `\q` decodes to the two characters `\q`
//! instead of failing.
//!
//! ```rust
//! use serde_dyaml::scalar::{classify, ScalarKind};
//!
//! assert_eq!(classify("30"), Some(ScalarKind::Int));
//! assert_eq!(classify("\"30\""), Some(ScalarKind::Quoted));
//! assert_eq!(classify("abc_1"), Some(ScalarKind::Identifier));
//! assert_eq!(classify("John Smith"), None);
//! ```

use crate::{Error, Result, Value};

/// The lexical kind of a scalar token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Null,
    Bool,
    Int,
    Quoted,
    Identifier,
}

/// Returns `true` if `s` is one or more of `[A-Za-z0-9_]`.
#[inline]
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Returns `true` if `s` matches `-?[0-9]+`.
///
/// This is the lexical pattern only; the value may still overflow `i64`.
#[inline]
#[must_use]
pub fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Returns the byte offset of the closing quote of a token that starts with `"`.
fn closing_quote(token: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, ch) in token.char_indices().skip(1) {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}

/// Classifies a bare token, or returns `None` if it is not a scalar.
#[must_use]
pub fn classify(token: &str) -> Option<ScalarKind> {
    match token {
        "null" => Some(ScalarKind::Null),
        "true" | "false" => Some(ScalarKind::Bool),
        _ if is_integer(token) => Some(ScalarKind::Int),
        _ if token.starts_with('"') => match closing_quote(token) {
            Some(end) if end == token.len() - 1 => Some(ScalarKind::Quoted),
            _ => None,
        },
        _ if is_identifier(token) => Some(ScalarKind::Identifier),
        _ => None,
    }
}

/// Decodes a scalar token into a [`Value`].
///
/// `line` and `col` locate the first character of the token and are used for
/// error reporting only.
///
/// # Errors
///
/// Returns [`Error::Scalar`] for unterminated quotes, characters after a
/// closing quote, integers outside `i64` and tokens that are not scalars.
pub fn decode(token: &str, line: usize, col: usize) -> Result<Value> {
    match token {
        "null" => Ok(Value::Null),
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ if is_integer(token) => token
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| Error::scalar(line, col, "integer out of range for a 64-bit value")),
        _ if token.starts_with('"') => decode_quoted(token, line, col).map(Value::Str),
        _ if is_identifier(token) => Ok(Value::Str(token.to_string())),
        _ => Err(Error::scalar(line, col, invalid_token_reason(token))),
    }
}

fn decode_quoted(token: &str, line: usize, col: usize) -> Result<String> {
    let mut result = String::with_capacity(token.len());
    let mut chars = token.char_indices().skip(1);

    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => {
                let rest = &token[i + 1..];
                if !rest.is_empty() {
                    let at = col + token[..=i].chars().count();
                    return Err(Error::scalar(
                        line,
                        at,
                        "unexpected characters after closing quote",
                    ));
                }
                return Ok(result);
            }
            '\\' => match chars.next() {
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, '"')) => result.push('"'),
                Some((_, other)) => {
                    // Unknown escape - preserve literally (lenient parsing)
                    result.push('\\');
                    result.push(other);
                }
                None => break,
            },
            other => result.push(other),
        }
    }

    Err(Error::scalar(line, col, "unterminated quoted string"))
}

/// Explains why a token is not a scalar of the grammar.
pub(crate) fn invalid_token_reason(token: &str) -> &'static str {
    if token.starts_with('"') {
        match closing_quote(token) {
            Some(_) => "unexpected characters after closing quote",
            None => "unterminated quoted string",
        }
    } else if token.starts_with('\'') {
        "single-quoted strings are not supported; use double quotes"
    } else if token.starts_with('|') || token.starts_with('>') {
        "block scalars are not supported; use a quoted string with \\n escapes"
    } else {
        "unquoted strings may only contain letters, digits and underscores; quote this value"
    }
}

/// Returns `true` if `s` must be quoted to round-trip as a string.
#[inline]
#[must_use]
pub fn needs_quotes(s: &str) -> bool {
    !is_identifier(s) || matches!(s, "null" | "true" | "false") || is_integer(s)
}

/// Appends the canonical token for the string `s`.
#[inline]
pub fn write_str(s: &str, output: &mut String) {
    if needs_quotes(s) {
        output.reserve(s.len() + 2);
        output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                _ => output.push(ch),
            }
        }
        output.push('"');
    } else {
        output.push_str(s);
    }
}

/// Appends the canonical token for a scalar value.
///
/// Returns `false`, writing nothing, if `value` is a mapping or sequence.
pub fn write_scalar(value: &Value, output: &mut String) -> bool {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => output.push_str(&i.to_string()),
        Value::Str(s) => write_str(s, output),
        Value::Mapping(_) | Value::Sequence(_) => return false,
    }
    true
}

/// Returns the canonical token for a scalar value.
#[must_use]
pub fn encode(value: &Value) -> Option<String> {
    let mut output = String::new();
    write_scalar(value, &mut output).then_some(output)
}
