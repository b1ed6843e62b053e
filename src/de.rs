//! Deterministic YAML parsing and deserialization.
//!
//! This module provides the [`Parser`], an indentation-driven recursive
//! descent parser that turns Deterministic YAML text into a [`Value`], and a
//! serde [`Deserializer`](serde::Deserializer) implementation for `Value` that
//! maps value trees onto Rust types.
//!
//! ## Overview
//!
//! - **Line-based**: the input is split into physical lines; blank lines are
//!   skipped wherever they appear and never separate data
//! - **Indentation levels**: every line must sit at a multiple of 2 spaces;
//!   tabs in indentation are rejected
//! - **All-or-nothing**: a parse either yields a complete value or an error
//!   naming the offending line
//! - **Bounded recursion**: nesting beyond [`Options::max_depth`] fails
//!
//! ## Usage
//!
//! ```rust
//! use serde_dyaml::{parse, Value};
//!
//! let value = parse("config:\n  host: localhost\n  port: 5432\n").unwrap();
//! let config = value.get("config").unwrap();
//! assert_eq!(config.get("host"), Some(&Value::from("localhost")));
//! assert_eq!(config.get("port"), Some(&Value::Int(5432)));
//! ```
//!
//! Typed access goes through serde:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { host: String, port: u16 }
//!
//! let config: Config = serde_dyaml::from_str("host: localhost\nport: 5432\n").unwrap();
//! assert_eq!(config, Config { host: "localhost".into(), port: 5432 });
//! ```

use crate::grammar::{self, EMPTY_MAPPING, EMPTY_SEQUENCE, INDENT_UNIT, RESERVED_KEY};
use crate::{scalar, Error, Mapping, Options, Result, Value};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// A content line with its indentation already measured.
#[derive(Clone, Copy, Debug)]
struct Line<'a> {
    number: usize,
    indent: usize,
    content: &'a str,
    raw: &'a str,
}

/// The Deterministic YAML parser.
///
/// Created via [`Parser::new`] or [`Parser::with_options`] and consumed by
/// [`Parser::parse`].
pub struct Parser<'a> {
    lines: Vec<&'a str>,
    position: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, &Options::default())
    }

    pub fn with_options(input: &'a str, options: &Options) -> Self {
        let lines = input
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        Parser {
            lines,
            position: 0,
            max_depth: options.max_depth,
        }
    }

    /// Parses the whole document.
    ///
    /// Empty or blank-only input parses to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns the first structural or scalar error encountered.
    pub fn parse(mut self) -> Result<Value> {
        let first = match self.peek(0)? {
            Some(line) => line,
            None => return Ok(Value::Null),
        };
        if first.indent != 0 {
            return Err(Error::indentation(
                first.number,
                0,
                &first.indent.to_string(),
                first.raw,
            ));
        }

        let value = self.parse_element(0)?;

        if let Some(extra) = self.peek(0)? {
            return Err(if extra.indent != 0 {
                Error::indentation(extra.number, 0, &extra.indent.to_string(), extra.raw)
            } else {
                Error::structure(
                    extra.number,
                    1,
                    "unexpected content after the top-level value",
                )
            });
        }

        debug!(kind = value.kind(), "parsed document");
        Ok(value)
    }

    /// Skips blank lines and returns the next content line without consuming it.
    ///
    /// Only lines made entirely of spaces count as blank; a whitespace line
    /// holding a tab is an indentation error like any other tab.
    ///
    /// `expected` is the indentation the caller is looking for and only feeds
    /// error messages.
    fn peek(&mut self, expected: usize) -> Result<Option<Line<'a>>> {
        while let Some(raw) = self.lines.get(self.position).copied() {
            if raw.bytes().all(|b| b == b' ') {
                self.position += 1;
                continue;
            }

            let number = self.position + 1;
            let (indent, content) = grammar::split_indent(raw);

            if content.starts_with('\t') {
                return Err(Error::indentation(number, expected, "a tab", raw));
            }
            if indent % INDENT_UNIT != 0 {
                return Err(Error::indentation(
                    number,
                    expected,
                    &indent.to_string(),
                    raw,
                ));
            }

            return Ok(Some(Line {
                number,
                indent,
                content: content.trim_end_matches(' '),
                raw,
            }));
        }
        Ok(None)
    }

    fn parse_element(&mut self, level: usize) -> Result<Value> {
        let indent = level * INDENT_UNIT;
        let line = match self.peek(indent)? {
            Some(line) => line,
            None => return Ok(Value::Null),
        };

        if level > self.max_depth {
            return Err(Error::depth_limit(line.number, self.max_depth));
        }

        trace!(line = line.number, level, "parsing element");

        if is_item(line.content) {
            self.parse_sequence(level)
        } else if split_key(line.content).is_some() {
            self.parse_mapping(level)
        } else {
            self.position += 1;
            decode_value(line.content, line.number, indent + 1)
        }
    }

    fn parse_mapping(&mut self, level: usize) -> Result<Value> {
        let indent = level * INDENT_UNIT;
        let mut map = Mapping::new();

        while let Some(line) = self.peek(indent)? {
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(Error::indentation(
                    line.number,
                    indent,
                    &line.indent.to_string(),
                    line.raw,
                ));
            }

            let (key, rest) = match split_key(line.content) {
                Some(pair) => pair,
                None if is_item(line.content) => {
                    return Err(Error::structure(
                        line.number,
                        indent + 1,
                        "sequence item inside a mapping; mappings and sequences cannot share a level",
                    ))
                }
                None => {
                    return Err(Error::structure(
                        line.number,
                        indent + 1,
                        "expected a 'key: value' pair",
                    ))
                }
            };

            if map.contains_key(key) {
                return Err(Error::structure(
                    line.number,
                    indent + 1,
                    &format!("duplicate key '{}'", key),
                ));
            }

            if key == RESERVED_KEY && rest.is_empty() {
                return Err(Error::structure(
                    line.number,
                    indent + RESERVED_KEY.len() + 2,
                    &format!(
                        "the reserved key {} must hold a string on the same line",
                        RESERVED_KEY
                    ),
                ));
            }

            self.position += 1;
            let value = self.parse_value(&line, rest, key.len() + 1, ':', level)?;

            if key == RESERVED_KEY && !value.is_str() {
                return Err(Error::structure(
                    line.number,
                    indent + 1,
                    &format!(
                        "the reserved key {} must hold a string, found {}",
                        RESERVED_KEY,
                        value.kind()
                    ),
                ));
            }

            map.insert(key.to_string(), value);
        }

        Ok(Value::Mapping(map))
    }

    fn parse_sequence(&mut self, level: usize) -> Result<Value> {
        let indent = level * INDENT_UNIT;
        let mut items = Vec::new();

        while let Some(line) = self.peek(indent)? {
            if line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(Error::indentation(
                    line.number,
                    indent,
                    &line.indent.to_string(),
                    line.raw,
                ));
            }
            if !is_item(line.content) {
                let msg = if split_key(line.content).is_some() {
                    "mapping entry inside a sequence; mappings and sequences cannot share a level"
                } else {
                    "expected a '- ' sequence item"
                };
                return Err(Error::structure(line.number, indent + 1, msg));
            }

            self.position += 1;
            let value = self.parse_value(&line, &line.content[1..], 1, '-', level)?;
            items.push(value);
        }

        Ok(Value::Sequence(items))
    }

    /// Parses whatever follows a `key:` or `-` marker.
    ///
    /// `rest` starts right after the marker, which itself ends `offset` bytes
    /// into the line content.
    fn parse_value(
        &mut self,
        line: &Line<'a>,
        rest: &str,
        offset: usize,
        marker: char,
        level: usize,
    ) -> Result<Value> {
        if rest.is_empty() {
            return self.parse_nested(level);
        }
        if !rest.starts_with(' ') {
            return Err(Error::structure(
                line.number,
                line.indent + offset + 1,
                &format!("expected a space after '{}'", marker),
            ));
        }

        let token = rest.trim_start_matches(' ');
        let col = line.indent + offset + (rest.len() - token.len()) + 1;
        decode_value(token, line.number, col)
    }

    /// Parses the nested block of a marker with no inline value.
    ///
    /// A missing block means the value is null.
    fn parse_nested(&mut self, level: usize) -> Result<Value> {
        let child = (level + 1) * INDENT_UNIT;
        match self.peek(child)? {
            Some(next) if next.indent == child => self.parse_element(level + 1),
            Some(next) if next.indent > child => Err(Error::indentation(
                next.number,
                child,
                &next.indent.to_string(),
                next.raw,
            )),
            _ => Ok(Value::Null),
        }
    }
}

/// Returns `true` if the line content is a sequence item.
#[inline]
pub(crate) fn is_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

/// Splits `key:rest` when the content starts with a key followed by a colon.
pub(crate) fn split_key(content: &str) -> Option<(&str, &str)> {
    let key_len = if content.starts_with(RESERVED_KEY) {
        RESERVED_KEY.len()
    } else {
        content
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count()
    };
    if key_len == 0 || content.as_bytes().get(key_len) != Some(&b':') {
        return None;
    }
    Some((&content[..key_len], &content[key_len + 1..]))
}

/// Decodes a whole value token, including the empty-collection markers.
pub(crate) fn decode_value(token: &str, line: usize, col: usize) -> Result<Value> {
    match token {
        EMPTY_MAPPING => Ok(Value::Mapping(Mapping::new())),
        EMPTY_SEQUENCE => Ok(Value::Sequence(Vec::new())),
        _ => scalar::decode(token, line, col),
    }
}

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Str(s) => visitor.visit_string(s),
            Value::Sequence(seq) => visitor.visit_seq(SeqDeserializer::new(seq)),
            Value::Mapping(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Str(variant) => visitor.visit_enum(EnumDeserializer::new(variant, None)),
            Value::Mapping(map) if map.len() == 1 => {
                let (variant, value) = map
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::custom("Expected enum variant"))?;
                visitor.visit_enum(EnumDeserializer::new(variant, Some(value)))
            }
            other => Err(Error::custom(format!(
                "Expected a string or a single-key mapping for an enum, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(value).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Mapping) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(value),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Option<Value>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Value::Str(self.variant))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(value),
            None => Err(Error::custom("Expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Sequence(seq)) => visitor.visit_seq(SeqDeserializer::new(seq)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Mapping(map)) => visitor.visit_map(MapDeserializer::new(map)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}
