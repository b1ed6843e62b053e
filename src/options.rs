//! Configuration options for parsing and validation.
//!
//! The canonical serializer has no options: its output is fixed by the
//! grammar. What callers can tune is how far the parser will recurse and how
//! strictly the validator judges style.
//!
//! ## Examples
//!
//! ```rust
//! use serde_dyaml::{parse_with_options, validate_with_options, Options};
//!
//! let options = Options::new().with_max_depth(8);
//! let value = parse_with_options("a:\n  b: 1\n", &options).unwrap();
//! assert!(value.is_mapping());
//!
//! // Unsorted keys are a warning by default and an error in strict mode.
//! let report = validate_with_options("b: 1\na: 2\n", &Options::strict());
//! assert!(!report.valid);
//! ```

use crate::grammar::DEFAULT_MAX_DEPTH;

/// Parser and validator configuration.
///
/// # Examples
///
/// ```rust
/// use serde_dyaml::Options;
///
/// let options = Options::new();
/// assert_eq!(options.max_depth, 128);
/// assert!(!options.strict);
///
/// let options = Options::strict().with_max_depth(16);
/// assert!(options.strict);
/// assert_eq!(options.max_depth, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Maximum nesting depth the parser accepts before failing.
    pub max_depth: usize,
    /// Report style findings as errors instead of warnings.
    pub strict: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }
}

impl Options {
    /// Creates default options (depth limit 128, lenient validation).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for strict validation.
    #[must_use]
    pub fn strict() -> Self {
        Options {
            strict: true,
            ..Default::default()
        }
    }

    /// Sets the maximum nesting depth.
    ///
    /// The top-level element is depth 0, so a limit of 0 accepts a flat
    /// mapping or sequence but no nested block.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enables or disables strict validation.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
