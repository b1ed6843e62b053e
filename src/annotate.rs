//! Folding human annotations into value trees.
//!
//! Deterministic YAML has no comments. Human context travels as data instead:
//! each mapping may hold one reserved [`RESERVED_KEY`] string that collects
//! every annotation aimed at it, joined with [`ANNOTATION_DELIMITER`].
//!
//! Annotations come from an upstream extractor as [`Annotation`] records that
//! name a key path. [`merge_annotations`] attaches them to the mappings they
//! point at and [`strip_annotations`] removes every reserved field again.
//!
//! ```rust
//! use serde_dyaml::annotate::{merge_annotations, strip_annotations, Annotation};
//! use serde_dyaml::{dyaml, serialize};
//!
//! let value = dyaml!({"db": {"host": "localhost", "port": 5432}});
//! let notes = vec![
//!     Annotation::line(vec!["db".into()], "Primary database"),
//!     Annotation::inline(vec!["db".into()], "port", "default postgres port"),
//! ];
//!
//! let merged = merge_annotations(value.clone(), &notes);
//! assert_eq!(
//!     serialize(&merged).unwrap(),
//!     "db:\n  $human$: \"Primary database | port: default postgres port\"\n  host: localhost\n  port: 5432\n"
//! );
//! assert_eq!(strip_annotations(merged), value);
//! ```

use crate::grammar::{ANNOTATION_DELIMITER, RESERVED_KEY};
use crate::{Mapping, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step in a key path: a mapping key or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Where the annotation text sat in its source.
///
/// Recorded for the caller's benefit; merging treats both kinds alike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// A free-standing line of text
    #[default]
    Line,
    /// Text trailing a key on the same line
    Inline,
}

/// A fragment of human text aimed at one mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Path from the root to the mapping the text belongs to.
    pub key_path: Vec<PathSegment>,
    /// The child key the text was written next to, if any.
    #[serde(default)]
    pub associated_key: Option<String>,
    pub text: String,
    #[serde(default)]
    pub kind: AnnotationKind,
}

impl Annotation {
    /// A free-standing annotation on the mapping at `key_path`.
    pub fn line(key_path: Vec<PathSegment>, text: impl Into<String>) -> Self {
        Annotation {
            key_path,
            associated_key: None,
            text: text.into(),
            kind: AnnotationKind::Line,
        }
    }

    /// An annotation written next to `key` inside the mapping at `key_path`.
    pub fn inline(
        key_path: Vec<PathSegment>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Annotation {
            key_path,
            associated_key: Some(key.into()),
            text: text.into(),
            kind: AnnotationKind::Inline,
        }
    }

    /// The path of the mapping this annotation lands in.
    ///
    /// An extractor may record an inline annotation under the path of the
    /// key it trails. In that case the last segment repeats the associated
    /// key and the annotation belongs to the parent mapping.
    #[must_use]
    pub fn target(&self) -> &[PathSegment] {
        match (&self.associated_key, self.key_path.split_last()) {
            (Some(key), Some((PathSegment::Key(last), parent))) if key == last => parent,
            _ => &self.key_path,
        }
    }

    /// The text as it appears inside the reserved field.
    #[must_use]
    pub fn rendered(&self) -> String {
        match &self.associated_key {
            Some(key) => format!("{}: {}", key, self.text),
            None => self.text.clone(),
        }
    }
}

/// Attaches each annotation to the mapping its path resolves to.
///
/// Fragments for one mapping are joined with `" | "` in the order they appear
/// in `annotations`, and appended after any reserved text the mapping already
/// holds. Annotations with empty text are ignored. Annotations whose path
/// does not resolve to a mapping are dropped.
#[must_use]
pub fn merge_annotations(value: Value, annotations: &[Annotation]) -> Value {
    let mut matched = vec![false; annotations.len()];
    let mut path = Vec::new();
    let merged = merge_at(value, annotations, &mut path, &mut matched);

    for (annotation, hit) in annotations.iter().zip(&matched) {
        if !hit && !annotation.text.is_empty() {
            trace!(
                path = ?annotation.key_path,
                "annotation does not resolve to a mapping, dropped"
            );
        }
    }
    merged
}

fn merge_at(
    value: Value,
    annotations: &[Annotation],
    path: &mut Vec<PathSegment>,
    matched: &mut [bool],
) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut parts = Vec::new();
            for (i, annotation) in annotations.iter().enumerate() {
                if !annotation.text.is_empty() && annotation.target() == path.as_slice() {
                    matched[i] = true;
                    parts.push(annotation.rendered());
                }
            }

            let mut result = Mapping::with_capacity(map.len() + 1);
            for (key, child) in map {
                if key == RESERVED_KEY {
                    result.insert(key, child);
                    continue;
                }
                path.push(PathSegment::Key(key.clone()));
                let child = merge_at(child, annotations, path, matched);
                path.pop();
                result.insert(key, child);
            }

            if !parts.is_empty() {
                let text = parts.join(ANNOTATION_DELIMITER);
                let combined = match result.remove(RESERVED_KEY) {
                    Some(Value::Str(existing)) if !existing.is_empty() => {
                        format!("{}{}{}", existing, ANNOTATION_DELIMITER, text)
                    }
                    Some(Value::Str(_)) | None => text,
                    Some(_replaced) => {
                        trace!(
                            path = ?path,
                            kind = _replaced.kind(),
                            "replacing non-string reserved value with merged annotations"
                        );
                        text
                    }
                };
                result.insert(RESERVED_KEY.to_string(), Value::Str(combined));
            }

            Value::Mapping(result)
        }
        Value::Sequence(items) => {
            let mut result = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                path.push(PathSegment::Index(index));
                result.push(merge_at(item, annotations, path, matched));
                path.pop();
            }
            Value::Sequence(result)
        }
        scalar => scalar,
    }
}

/// Removes the reserved field from every mapping in the tree.
#[must_use]
pub fn strip_annotations(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .filter(|(key, _)| key != RESERVED_KEY)
                .map(|(key, child)| (key, strip_annotations(child)))
                .collect(),
        ),
        Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(strip_annotations).collect())
        }
        scalar => scalar,
    }
}
