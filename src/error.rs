//! Error types for Deterministic YAML parsing and serialization.
//!
//! Parsing is all-or-nothing: a document either produces a complete
//! [`Value`](crate::Value) or fails with one of these errors. Best-effort,
//! multi-problem reporting is the job of the [validator](crate::validate).
//!
//! ## Error Categories
//!
//! - **Structural errors**: indentation mismatches, malformed pairs or items,
//!   duplicate keys ([`Error::Indentation`], [`Error::Structure`])
//! - **Scalar errors**: unterminated quotes, out-of-range integers, tokens that
//!   are not scalars of the grammar ([`Error::Scalar`])
//! - **Serialization errors**: keys the grammar cannot express, Rust types
//!   with no Deterministic YAML form ([`Error::InvalidKey`], [`Error::UnsupportedType`])
//! - **I/O errors**: reader/writer failures
//!
//! ## Examples
//!
//! ```rust
//! use serde_dyaml::{parse, Error};
//!
//! let err = parse("name: John\n   age: 30\n").unwrap_err();
//! assert!(matches!(err, Error::Indentation { line: 2, .. }));
//! assert_eq!(err.line(), Some(2));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing
/// Deterministic YAML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Indentation that does not match the expected nesting level
    #[error("Indentation error at line {line}:\n{context}\nExpected {expected} spaces, found {found}\nHelp: Deterministic YAML uses exactly 2 spaces per nesting level and no tabs")]
    Indentation {
        line: usize,
        expected: usize,
        found: String,
        context: String,
    },

    /// Malformed structure (pair, item, duplicate key, mixed collections)
    #[error("Invalid structure at line {line}, column {col}: {msg}")]
    Structure { line: usize, col: usize, msg: String },

    /// A token that cannot be decoded as a scalar
    #[error("Invalid scalar at line {line}, column {col}: {msg}")]
    Scalar { line: usize, col: usize, msg: String },

    /// Nesting deeper than the configured limit
    #[error("Nesting depth limit of {limit} exceeded at line {line}")]
    DepthLimitExceeded { line: usize, limit: usize },

    /// A mapping entry the grammar cannot express
    #[error("Cannot serialize key {key:?}: {msg}")]
    InvalidKey { key: String, msg: String },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an indentation error.
    ///
    /// `found` describes what was seen instead, e.g. `"4"` or `"a tab"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dyaml::Error;
    ///
    /// let err = Error::indentation(8, 2, "4", "    name: Alice");
    /// assert!(err.to_string().contains("Expected 2 spaces"));
    /// ```
    pub fn indentation(line: usize, expected: usize, found: &str, context: &str) -> Self {
        Error::Indentation {
            line,
            expected,
            found: found.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates a structural error for malformed pairs, items or layout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dyaml::Error;
    ///
    /// let err = Error::structure(3, 5, "expected a space after ':'");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn structure(line: usize, col: usize, msg: &str) -> Self {
        Error::Structure {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a scalar decode error.
    pub fn scalar(line: usize, col: usize, msg: &str) -> Self {
        Error::Scalar {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a depth limit error.
    pub fn depth_limit(line: usize, limit: usize) -> Self {
        Error::DepthLimitExceeded { line, limit }
    }

    /// Creates an error for a mapping entry that cannot be written.
    pub fn invalid_key(key: &str, msg: &str) -> Self {
        Error::InvalidKey {
            key: key.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported type error for types with no Deterministic YAML form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_dyaml::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the 1-based source line the error points at, if any.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Indentation { line, .. }
            | Error::Structure { line, .. }
            | Error::Scalar { line, .. }
            | Error::DepthLimitExceeded { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_accessor() {
        assert_eq!(Error::structure(4, 1, "x").line(), Some(4));
        assert_eq!(Error::scalar(2, 7, "x").line(), Some(2));
        assert_eq!(Error::depth_limit(9, 3).line(), Some(9));
        assert_eq!(Error::custom("x").line(), None);
        assert_eq!(Error::invalid_key("a-b", "x").line(), None);
    }

    #[test]
    fn test_display_messages() {
        let err = Error::indentation(2, 2, "a tab", "\tname: x");
        let msg = err.to_string();
        assert!(msg.contains("line 2"));
        assert!(msg.contains("found a tab"));

        let err = Error::invalid_key("user-id", "not an identifier");
        assert!(err.to_string().contains("\"user-id\""));
    }
}
