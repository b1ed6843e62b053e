//! Canonical Deterministic YAML serialization.
//!
//! This module provides the [`Serializer`], which writes a [`Value`] tree as
//! its single canonical text form, and [`ValueSerializer`], a serde
//! serializer that turns any `T: Serialize` into a [`Value`].
//!
//! ## Canonical form
//!
//! - Mapping keys: the reserved annotation key first, then ascending byte order
//! - Sequence items: original order, never sorted
//! - Inline values follow `key: ` or `- `; nested blocks start on the next
//!   line, indented 2 more spaces, after a bare `key:` or `-`
//! - Empty collections are written as the tokens `{}` and `[]`
//! - Every line ends with `\n`; no trailing whitespace or blank lines
//!
//! ```rust
//! use serde_dyaml::{dyaml, serialize};
//!
//! let value = dyaml!({
//!     "tags": ["dev", "ops"],
//!     "config": {"port": 5432, "host": "localhost"}
//! });
//! assert_eq!(
//!     serialize(&value).unwrap(),
//!     "config:\n  host: localhost\n  port: 5432\ntags:\n  - dev\n  - ops\n"
//! );
//! ```
//!
//! ## From Rust types
//!
//! ```rust
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Server { name: String, port: u16, enabled: bool }
//!
//! let server = Server { name: "db primary".into(), port: 5432, enabled: true };
//! assert_eq!(
//!     serde_dyaml::to_string(&server).unwrap(),
//!     "enabled: true\nname: \"db primary\"\nport: 5432\n"
//! );
//! ```

use crate::grammar::{self, EMPTY_MAPPING, EMPTY_SEQUENCE, INDENT_UNIT, RESERVED_KEY};
use crate::{scalar, Error, Mapping, Result, Value};
use serde::{ser, Serialize};

/// The canonical text serializer.
///
/// Created via [`Serializer::new`]; feed it one document with
/// [`Serializer::write_value`] and take the text with
/// [`Serializer::into_inner`].
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(256),
        }
    }

    /// Appends the canonical form of `value` as a whole document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if a mapping holds a key the grammar
    /// cannot express, or a reserved key whose value is not a string.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        self.write_block(value, 0)
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_block(&mut self, value: &Value, level: usize) -> Result<()> {
        match value {
            Value::Mapping(map) if !map.is_empty() => self.write_mapping(map, level),
            Value::Sequence(seq) if !seq.is_empty() => self.write_sequence(seq, level),
            inline => {
                self.write_inline(inline);
                self.output.push('\n');
                Ok(())
            }
        }
    }

    fn write_mapping(&mut self, map: &Mapping, level: usize) -> Result<()> {
        for (key, value) in map.canonical_entries() {
            if !grammar::is_valid_key(key) {
                return Err(Error::invalid_key(
                    key,
                    "keys must be one or more of [A-Za-z0-9_]",
                ));
            }
            if key == RESERVED_KEY && !value.is_str() {
                return Err(Error::invalid_key(
                    key,
                    &format!("the reserved key must hold a string, found {}", value.kind()),
                ));
            }

            self.write_indent(level);
            self.output.push_str(key);
            self.output.push(':');
            self.write_child(value, level)?;
        }
        Ok(())
    }

    fn write_sequence(&mut self, seq: &[Value], level: usize) -> Result<()> {
        for item in seq {
            self.write_indent(level);
            self.output.push('-');
            self.write_child(item, level)?;
        }
        Ok(())
    }

    /// Writes the value that follows a `key:` or `-` marker.
    fn write_child(&mut self, value: &Value, level: usize) -> Result<()> {
        if value.is_inline() {
            self.output.push(' ');
            self.write_inline(value);
            self.output.push('\n');
            Ok(())
        } else {
            self.output.push('\n');
            self.write_block(value, level + 1)
        }
    }

    fn write_inline(&mut self, value: &Value) {
        match value {
            Value::Mapping(_) => self.output.push_str(EMPTY_MAPPING),
            Value::Sequence(_) => self.output.push_str(EMPTY_SEQUENCE),
            scalar => {
                scalar::write_scalar(scalar, &mut self.output);
            }
        }
    }

    #[inline]
    fn write_indent(&mut self, level: usize) {
        for _ in 0..level * INDENT_UNIT {
            self.output.push(' ');
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serde serializer that builds a [`Value`] from any `T: Serialize`.
///
/// Floats have no Deterministic YAML form and are rejected, as are unsigned
/// integers above `i64::MAX`. Enum variants carrying data become single-key
/// mappings keyed by the variant name.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Mapping,
    current_key: Option<String>,
}

/// Collects the fields of a tuple or struct enum variant.
pub struct SerializeVariant<T> {
    variant: &'static str,
    inner: T,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVariant<SerializeVec>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeVariant<SerializeMap>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| Error::unsupported_type(&format!("integer {} exceeds 64 bits", v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| Error::unsupported_type(&format!("integer {} exceeds i64::MAX", v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| Error::unsupported_type(&format!("integer {} exceeds i64::MAX", v)))
    }

    fn serialize_f32(self, _v: f32) -> Result<Value> {
        Err(Error::unsupported_type("floating point numbers"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Value> {
        Err(Error::unsupported_type("floating point numbers"))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v.iter().map(|&b| Value::Int(i64::from(b))).collect();
        Ok(Value::Sequence(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Str(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(single_entry(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVariant<SerializeVec>> {
        Ok(SerializeVariant {
            variant,
            inner: SerializeVec::new(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVariant<SerializeMap>> {
        Ok(SerializeVariant {
            variant,
            inner: SerializeMap::new(),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: Mapping::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeVariant<SerializeVec> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> Result<Value> {
        Ok(single_entry(self.variant, Value::Sequence(self.inner.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::Str(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            Value::Int(i) => {
                self.current_key = Some(i.to_string());
                Ok(())
            }
            other => Err(Error::custom(format!(
                "Map keys must be strings or integers, found {}",
                other.kind()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeVariant<SerializeMap> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(single_entry(self.variant, Value::Mapping(self.inner.map)))
    }
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut map = Mapping::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Mapping(map)
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for floats and out-of-range integers.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Writes the canonical text form of a [`Value`].
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if the tree holds a mapping key outside the
/// grammar, or a reserved key with a non-string value.
pub fn serialize(value: &Value) -> Result<String> {
    let mut serializer = Serializer::new();
    serializer.write_value(value)?;
    Ok(serializer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dyaml;
    use serde::Serialize;

    #[test]
    fn test_scalar_documents() {
        assert_eq!(serialize(&Value::Null).unwrap(), "null\n");
        assert_eq!(serialize(&Value::Bool(true)).unwrap(), "true\n");
        assert_eq!(serialize(&Value::Int(-5)).unwrap(), "-5\n");
        assert_eq!(serialize(&Value::from("30")).unwrap(), "\"30\"\n");
        assert_eq!(serialize(&Value::from("")).unwrap(), "\"\"\n");
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(serialize(&Value::Mapping(Mapping::new())).unwrap(), "{}\n");
        assert_eq!(serialize(&Value::Sequence(vec![])).unwrap(), "[]\n");

        let value = dyaml!({"a": {}, "b": [], "c": [{}, []]});
        assert_eq!(
            serialize(&value).unwrap(),
            "a: {}\nb: []\nc:\n  - {}\n  - []\n"
        );
    }

    #[test]
    fn test_keys_sorted_with_reserved_first() {
        let value = dyaml!({
            "zeta": 1,
            "Alpha": 2,
            "$human$": "note",
            "_x": 3,
            "10": 4
        });
        assert_eq!(
            serialize(&value).unwrap(),
            "$human$: note\n10: 4\nAlpha: 2\n_x: 3\nzeta: 1\n"
        );
    }

    #[test]
    fn test_nested_blocks() {
        let value = dyaml!({
            "servers": [
                {"name": "a", "ports": [80, 443]},
                [1, [2]]
            ]
        });
        let expected = "\
servers:
  -
    name: a
    ports:
      - 80
      - 443
  -
    - 1
    -
      - 2
";
        assert_eq!(serialize(&value).unwrap(), expected);
    }

    #[test]
    fn test_strings_are_quoted_when_needed() {
        let value = dyaml!({
            "a": "plain",
            "b": "two words",
            "c": "true",
            "d": "tab\there",
            "e": "back\\slash"
        });
        assert_eq!(
            serialize(&value).unwrap(),
            "a: plain\nb: \"two words\"\nc: \"true\"\nd: \"tab\\there\"\ne: \"back\\\\slash\"\n"
        );
    }

    #[test]
    fn test_invalid_keys_are_rejected() {
        let value = dyaml!({"user-id": 1});
        let err = serialize(&value).unwrap_err();
        assert!(matches!(err, Error::InvalidKey { ref key, .. } if key == "user-id"));

        let value = dyaml!({"$human$": 1});
        let err = serialize(&value).unwrap_err();
        assert!(err.to_string().contains("must hold a string"));
    }

    #[test]
    fn test_to_value_structs_and_enums() {
        #[derive(Serialize)]
        enum Shape {
            Empty,
            Circle(u32),
            Rect { w: u32, h: u32 },
            Pair(i8, i8),
        }

        assert_eq!(to_value(&Shape::Empty).unwrap(), Value::from("Empty"));
        assert_eq!(to_value(&Shape::Circle(3)).unwrap(), dyaml!({"Circle": 3}));
        assert_eq!(
            to_value(&Shape::Rect { w: 2, h: 1 }).unwrap(),
            dyaml!({"Rect": {"w": 2, "h": 1}})
        );
        assert_eq!(to_value(&Shape::Pair(1, -1)).unwrap(), dyaml!({"Pair": [1, -1]}));
    }

    #[test]
    fn test_to_value_rejects_floats_and_large_integers() {
        assert!(matches!(
            to_value(&1.5f64).unwrap_err(),
            Error::UnsupportedType(_)
        ));
        assert!(matches!(
            to_value(&u64::MAX).unwrap_err(),
            Error::UnsupportedType(_)
        ));
        assert_eq!(to_value(&(i64::MAX as u64)).unwrap(), Value::Int(i64::MAX));
    }

    #[test]
    fn test_integer_map_keys() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(2u32, "b");
        map.insert(10u32, "a");
        let value = to_value(&map).unwrap();
        assert_eq!(serialize(&value).unwrap(), "10: a\n2: b\n");
    }
}
