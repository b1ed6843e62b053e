//! Deterministic YAML format reference.
//!
//! This module documents the restricted YAML subset accepted and produced by
//! this library, and owns the static constants every other module shares.
//!
//! # Overview
//!
//! Deterministic YAML trades expressiveness for unambiguous round-tripping:
//! every value has exactly one textual form, and that form parses back to the
//! same value.
//!
//! ```text
//! yaml          ::= element(0)
//! element(n)    ::= mapping(n) | sequence(n) | scalar
//! mapping(n)    ::= pair(n)+
//! pair(n)       ::= INDENT(n) key ":" (SP value | NL element(n + 1))
//! sequence(n)   ::= item(n)+
//! item(n)       ::= INDENT(n) "-" (SP value | NL element(n + 1))
//! value         ::= scalar | "{}" | "[]"
//! scalar        ::= NULL | BOOLEAN | INTEGER | QUOTED | IDENT
//! ```
//!
//! # Layout
//!
//! - Indentation is exactly 2 spaces per nesting level.
//! - Tabs are never allowed outside quoted strings.
//! - A key with a nested value ends its line with `:`; a sequence item with a
//!   nested value is a lone `-`.
//! - No line carries trailing whitespace, and the document ends with one newline.
//!
//! # Scalars
//!
//! | Kind | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `value: null` |
//! | Boolean | `true` or `false` | `active: true` |
//! | Integer | `-?[0-9]+` (fits in `i64`) | `port: 5432` |
//! | Identifier string | `[A-Za-z0-9_]+` | `host: localhost` |
//! | Quoted string | `"..."` with `\n \t \r \\ \"` escapes | `note: "Hello\nWorld"` |
//!
//! Classification order matters: `30` is an integer and `true` a boolean, so
//! the strings `"30"` and `"true"` are always quoted.
//!
//! # Keys
//!
//! Keys are identifiers. The single exception is the reserved annotation key
//! [`RESERVED_KEY`], which carries consolidated human context for its mapping
//! and is always written first. Its value is a string on the same line as the
//! key, never a nested block. All other keys are written in ascending byte
//! order.
//!
//! ```text
//! $human$: "Primary database | port: default postgres port"
//! host: localhost
//! port: 5432
//! ```
//!
//! # Empty collections
//!
//! The grammar has no block form for an empty collection, so the whole value
//! tokens `{}` and `[]` stand for an empty mapping and an empty sequence. They
//! are the only flow-looking tokens the grammar accepts.
//!
//! # Forbidden constructs
//!
//! Outside quoted strings: comments (`#`), flow collections (`{ } [ ] ,`),
//! anchors, aliases and tags (`& * !`), document markers (`---`, `...`),
//! directives (`%`), block scalars (`|`, `>`), single-quoted strings and tabs.

/// Number of spaces per nesting level.
pub const INDENT_UNIT: usize = 2;

/// The reserved mapping key that carries human annotations.
pub const RESERVED_KEY: &str = "$human$";

/// Separator used when several annotations are folded into one reserved value.
pub const ANNOTATION_DELIMITER: &str = " | ";

/// Value token for an empty mapping.
pub const EMPTY_MAPPING: &str = "{}";

/// Value token for an empty sequence.
pub const EMPTY_SEQUENCE: &str = "[]";

/// Default bound on parser nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Returns `true` if `key` can be written as a mapping key.
#[inline]
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    key == RESERVED_KEY || crate::scalar::is_identifier(key)
}

/// Splits a line into its leading-space count and the remaining content.
///
/// Only U+0020 counts as indentation; a tab ends the indentation run and is
/// left at the start of the content for the caller to reject.
#[inline]
pub(crate) fn split_indent(line: &str) -> (usize, &str) {
    let content = line.trim_start_matches(' ');
    (line.len() - content.len(), content)
}

/// Returns `true` if the line contains nothing but spaces and tabs.
///
/// The validator uses this to tell a tab on an empty line from a tab before
/// content; the parser treats only all-space lines as blank.
#[inline]
pub(crate) fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| b == b' ' || b == b'\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_indent() {
        assert_eq!(split_indent("    key: 1"), (4, "key: 1"));
        assert_eq!(split_indent("key"), (0, "key"));
        assert_eq!(split_indent("  \tkey"), (2, "\tkey"));
    }

    #[test]
    fn test_valid_keys() {
        assert!(is_valid_key("name"));
        assert!(is_valid_key("_0"));
        assert!(is_valid_key(RESERVED_KEY));
        assert!(!is_valid_key("user-id"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("$other$"));
    }
}
