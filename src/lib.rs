//! # serde_dyaml
//!
//! A parser, canonical serializer and validator for Deterministic YAML, a
//! restricted subset of YAML in which every value has exactly one textual
//! form.
//!
//! ## What is Deterministic YAML?
//!
//! Plain YAML offers many spellings for the same data: flow or block
//! collections, several quoting styles, comments, anchors. Deterministic YAML
//! keeps only block mappings and sequences, five scalar kinds and 2-space
//! indentation, and fixes the key order. The result diffs cleanly, hashes
//! stably and round-trips without loss.
//!
//! ## Key Features
//!
//! - **Canonical output**: [`serialize`] is a pure function; equal values
//!   always give byte-identical text
//! - **Lossless round trips**: `parse(serialize(v)) == v` for every value
//! - **Diagnostics**: [`validate`] reports every grammar and style problem in
//!   a file in one pass, with line numbers
//! - **Human context as data**: comments are replaced by a reserved
//!   `$human$` field, managed by the [`annotate`] module
//! - **Serde Compatible**: works with `#[derive(Serialize, Deserialize)]`
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_dyaml::{parse, serialize, Value};
//!
//! let text = "port: 5432\nhost: localhost\n";
//! let value = parse(text).unwrap();
//! assert_eq!(value.get("port"), Some(&Value::Int(5432)));
//!
//! // Keys come out sorted
//! assert_eq!(serialize(&value).unwrap(), "host: localhost\nport: 5432\n");
//! ```
//!
//! ### Typed data
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_dyaml::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "active: true\nid: 123\nname: Alice\n");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ### Validation
//!
//! ```rust
//! use serde_dyaml::validate;
//!
//! let result = validate("# Comment\nname: John\n", false);
//! assert!(!result.valid);
//! assert_eq!(result.errors[0].line, 1);
//! ```
//!
//! ## Format Reference
//!
//! The accepted grammar, scalar table and reserved key are documented in the
//! [`grammar`] module.
//!
//! ## Logging
//!
//! With the `tracing` feature enabled the parser, validator and annotation
//! layer emit `tracing` events at debug and trace level.

#[macro_use]
mod tracing_macros;

pub mod annotate;
pub mod de;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod options;
pub mod scalar;
pub mod ser;
pub mod validate;
pub mod value;

pub use annotate::{merge_annotations, strip_annotations, Annotation, AnnotationKind, PathSegment};
pub use de::Parser;
pub use error::{Error, Result};
pub use grammar::{ANNOTATION_DELIMITER, INDENT_UNIT, RESERVED_KEY};
pub use map::Mapping;
pub use options::Options;
pub use ser::{serialize, to_value, Serializer, ValueSerializer};
pub use validate::{validate, validate_with_options, Finding, Rule, Severity, ValidationResult};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parse Deterministic YAML text into a [`Value`].
///
/// Empty input parses to [`Value::Null`].
///
/// # Examples
///
/// ```rust
/// use serde_dyaml::{dyaml, parse};
///
/// let value = parse("config:\n  host: localhost\n  port: 5432\n").unwrap();
/// assert_eq!(value, dyaml!({"config": {"host": "localhost", "port": 5432}}));
/// ```
///
/// # Errors
///
/// Returns the first indentation, structure or scalar error, with its line.
pub fn parse(text: &str) -> Result<Value> {
    Parser::new(text).parse()
}

/// Parse Deterministic YAML text with custom options.
///
/// # Errors
///
/// As [`parse`], plus [`Error::DepthLimitExceeded`] when nesting goes past
/// `options.max_depth`.
pub fn parse_with_options(text: &str, options: &Options) -> Result<Value> {
    Parser::with_options(text, options).parse()
}

/// Rewrite Deterministic YAML text into canonical form.
///
/// # Examples
///
/// ```rust
/// use serde_dyaml::normalize;
///
/// let text = "b:  \"x\"\na: 007\n";
/// assert_eq!(normalize(text).unwrap(), "a: 7\nb: x\n");
/// ```
///
/// # Errors
///
/// Returns an error if the text does not parse.
pub fn normalize(text: &str) -> Result<String> {
    serialize(&parse(text)?)
}

/// Returns `true` if `text` is already in canonical form.
///
/// # Examples
///
/// ```rust
/// use serde_dyaml::is_canonical;
///
/// assert!(is_canonical("a: 1\nb: 2\n").unwrap());
/// assert!(!is_canonical("b: 2\na: 1\n").unwrap());
/// ```
///
/// # Errors
///
/// Returns an error if the text does not parse.
pub fn is_canonical(text: &str) -> Result<bool> {
    Ok(normalize(text)? == text)
}

/// Serialize any `T: Serialize` to canonical Deterministic YAML.
///
/// # Examples
///
/// ```rust
/// use serde_dyaml::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { y: i32, x: i32 }
///
/// assert_eq!(to_string(&Point { y: 2, x: 1 }).unwrap(), "x: 1\ny: 2\n");
/// ```
///
/// # Errors
///
/// Returns an error for floats, integers outside `i64`, and map keys the
/// grammar cannot express.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    serialize(&to_value(value)?)
}

/// Serialize any `T: Serialize` to a writer in Deterministic YAML.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from Deterministic YAML text.
///
/// # Examples
///
/// ```rust
/// use serde_dyaml::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2\n").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text does not parse or does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse(s)?)
}

/// Deserialize an instance of type `T` from an I/O stream.
///
/// # Errors
///
/// Returns an error if reading fails, the text does not parse, or the data
/// does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, do not parse, or do
/// not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_dyaml::{dyaml, from_value};
///
/// let tags: Vec<String> = from_value(dyaml!(["dev", "ops"])).unwrap();
/// assert_eq!(tags, vec!["dev", "ops"]);
/// ```
///
/// # Errors
///
/// Returns an error if the value does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}
