//! Best-effort validation of Deterministic YAML text.
//!
//! The validator is the grammar's acceptor expressed as a diagnostic tool. It
//! scans raw text line by line without building a [`Value`](crate::Value), so
//! it keeps going past problems the [parser](crate::parse) would stop at and
//! reports every one of them in a single pass.
//!
//! Each line goes through two checks:
//!
//! - a lexical scan for constructs the grammar forbids outside quoted strings
//!   (tabs, comments, flow collections, anchors and tags, document markers,
//!   directives)
//! - a structural check against a stack of open blocks, which catches bad
//!   indentation, mixed mappings and sequences, duplicate keys, a misplaced
//!   reserved key and tokens that are not scalars
//!
//! Style findings ([`Rule::is_style`]) describe text that parses but is not in
//! canonical form. They are warnings by default and errors in strict mode.
//!
//! ```rust
//! use serde_dyaml::validate::{validate, Rule};
//!
//! let result = validate("name:\tJohn\nage: 30\n", false);
//! assert!(!result.valid);
//! assert_eq!(result.errors[0].line, 1);
//! assert_eq!(result.errors[0].rule, Rule::Tab);
//! ```

use crate::de::{is_item, split_key};
use crate::grammar::{self, EMPTY_MAPPING, EMPTY_SEQUENCE, INDENT_UNIT, RESERVED_KEY};
use crate::scalar::{self, ScalarKind};
use crate::{Error, Options};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

const TAB_IN_INDENT: &str = "tab character in indentation; use 2 spaces per level";

/// Whether a finding affects validity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// The rule a finding was raised under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Tab character outside a quoted string
    Tab,
    /// `#` comment marker
    Comment,
    /// Flow collection markers `{ } [ ] ,`
    FlowStyle,
    /// Anchor, alias or tag markers `& * !`
    Anchor,
    /// `---` or `...`
    DocumentMarker,
    /// `%` directive
    Directive,
    /// Indentation that is odd or matches no open block
    Indentation,
    /// A token that is not a scalar of the grammar
    InvalidScalar,
    /// A line that is neither a pair, an item nor a lone scalar where one is expected
    Malformed,
    /// Mapping entries and sequence items at the same level
    MixedCollection,
    DuplicateKey,
    /// The reserved key after another key
    ReservedKeyPosition,
    /// The reserved key holding something other than a string
    ReservedKeyValue,
    KeyOrder,
    TrailingWhitespace,
    BlankLine,
    /// `\r\n` line ending
    LineEnding,
    FinalNewline,
    /// A scalar spelled differently from its canonical token
    ScalarStyle,
    /// More than one space after `:` or `-`
    Spacing,
}

impl Rule {
    /// Returns `true` for rules about canonical style rather than grammar.
    #[must_use]
    pub const fn is_style(self) -> bool {
        matches!(
            self,
            Rule::KeyOrder
                | Rule::TrailingWhitespace
                | Rule::BlankLine
                | Rule::LineEnding
                | Rule::FinalNewline
                | Rule::ScalarStyle
                | Rule::Spacing
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Rule::Tab => "tab",
            Rule::Comment => "comment",
            Rule::FlowStyle => "flow_style",
            Rule::Anchor => "anchor",
            Rule::DocumentMarker => "document_marker",
            Rule::Directive => "directive",
            Rule::Indentation => "indentation",
            Rule::InvalidScalar => "invalid_scalar",
            Rule::Malformed => "malformed",
            Rule::MixedCollection => "mixed_collection",
            Rule::DuplicateKey => "duplicate_key",
            Rule::ReservedKeyPosition => "reserved_key_position",
            Rule::ReservedKeyValue => "reserved_key_value",
            Rule::KeyOrder => "key_order",
            Rule::TrailingWhitespace => "trailing_whitespace",
            Rule::BlankLine => "blank_line",
            Rule::LineEnding => "line_ending",
            Rule::FinalNewline => "final_newline",
            Rule::ScalarStyle => "scalar_style",
            Rule::Spacing => "spacing",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem found on one line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// 1-based line number.
    pub line: usize,
    pub rule: Rule,
    pub message: String,
    pub severity: Severity,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {} [{}]", self.line, self.message, self.rule)
    }
}

/// The outcome of validating one document.
///
/// `valid` is `true` exactly when `errors` is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl ValidationResult {
    /// Returns `true` if any error or warning was raised under `rule`.
    #[must_use]
    pub fn has_rule(&self, rule: Rule) -> bool {
        self.findings().any(|f| f.rule == rule)
    }

    /// Iterates over errors, then warnings.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

/// Validates `text`, treating style findings as errors when `strict` is set.
///
/// Never fails: malformed input produces findings, not an error.
#[must_use]
pub fn validate(text: &str, strict: bool) -> ValidationResult {
    validate_with_options(text, &Options::new().with_strict(strict))
}

/// Validates `text` with the strictness taken from `options`.
#[must_use]
pub fn validate_with_options(text: &str, options: &Options) -> ValidationResult {
    let mut validator = Validator::new(options.strict);

    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    let count = lines.len();

    for (index, raw) in lines.into_iter().enumerate() {
        validator.check_line(index + 1, raw);
    }

    if !text.is_empty() && !text.ends_with('\n') {
        validator.report(count, Rule::FinalNewline, "missing newline at end of file");
    }

    validator.finish()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BlockKind {
    Mapping,
    Sequence,
    Scalar,
}

/// What a line looks like once its indentation is removed.
#[derive(Clone, Copy, Debug)]
enum Shape<'a> {
    Pair(&'a str, &'a str),
    Item(&'a str),
    Scalar,
}

impl Shape<'_> {
    fn kind(&self) -> BlockKind {
        match self {
            Shape::Pair(..) => BlockKind::Mapping,
            Shape::Item(_) => BlockKind::Sequence,
            Shape::Scalar => BlockKind::Scalar,
        }
    }
}

fn shape_of(content: &str) -> Shape<'_> {
    if is_item(content) {
        Shape::Item(&content[1..])
    } else if let Some((key, rest)) = split_key(content) {
        Shape::Pair(key, rest)
    } else {
        Shape::Scalar
    }
}

/// An open block: one mapping, sequence or lone scalar at a fixed indentation.
struct Block {
    indent: usize,
    kind: BlockKind,
    keys: HashSet<String>,
    seen_non_reserved: bool,
    prev_key: Option<String>,
}

impl Block {
    fn new(indent: usize, kind: BlockKind) -> Self {
        Block {
            indent,
            kind,
            keys: HashSet::new(),
            seen_non_reserved: false,
            prev_key: None,
        }
    }
}

#[derive(Default)]
struct LexicalScan {
    /// Any grammar violation was found on the line.
    violation: bool,
    /// A tab sits in the leading whitespace, so the indentation is unknown.
    tab_in_indent: bool,
}

struct Validator {
    strict: bool,
    findings: Vec<Finding>,
    blocks: Vec<Block>,
    /// Indentation a nested block may open at, after a bare `key:` or `-`.
    pending: Option<usize>,
}

impl Validator {
    fn new(strict: bool) -> Self {
        Validator {
            strict,
            findings: Vec::new(),
            blocks: Vec::new(),
            pending: None,
        }
    }

    fn report(&mut self, line: usize, rule: Rule, message: &str) {
        let severity = if rule.is_style() && !self.strict {
            Severity::Warning
        } else {
            Severity::Error
        };
        trace!(line, rule = rule.as_str(), ?severity, detail = message, "finding");
        self.findings.push(Finding {
            line,
            rule,
            message: message.to_string(),
            severity,
        });
    }

    fn finish(self) -> ValidationResult {
        let (errors, warnings): (Vec<_>, Vec<_>) = self
            .findings
            .into_iter()
            .partition(|f| f.severity == Severity::Error);
        debug!(
            errors = errors.len(),
            warnings = warnings.len(),
            "validation finished"
        );
        ValidationResult {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    fn check_line(&mut self, number: usize, raw: &str) {
        let line = match raw.strip_suffix('\r') {
            Some(stripped) => {
                self.report(
                    number,
                    Rule::LineEnding,
                    "carriage return before newline; use \\n line endings",
                );
                stripped
            }
            None => raw,
        };

        if grammar::is_blank(line) {
            if line.contains('\t') {
                self.report(number, Rule::Tab, TAB_IN_INDENT);
            } else {
                self.report(number, Rule::BlankLine, "blank line; canonical form has none");
            }
            return;
        }

        let (indent, untrimmed) = grammar::split_indent(line);
        let content = untrimmed.trim_end_matches(' ');
        if content.len() != untrimmed.len() {
            self.report(number, Rule::TrailingWhitespace, "trailing whitespace");
        }

        if content == "---" || content == "..." || content.starts_with("--- ") {
            self.report(
                number,
                Rule::DocumentMarker,
                "document marker found; a file holds exactly one document",
            );
            return;
        }
        if content.starts_with('%') {
            self.report(number, Rule::Directive, "directives are not allowed");
            return;
        }

        let shape = shape_of(content);
        let value_token = match shape {
            Shape::Pair(_, rest) | Shape::Item(rest) => rest.trim_start_matches(' '),
            Shape::Scalar => content,
        };
        let mut scan_end = indent + content.len();
        if value_token == EMPTY_MAPPING || value_token == EMPTY_SEQUENCE {
            scan_end -= value_token.len();
        }

        let scan = self.scan(number, &line[..scan_end]);
        if scan.tab_in_indent || content.starts_with('#') {
            return;
        }

        if indent % INDENT_UNIT != 0 {
            self.report(
                number,
                Rule::Indentation,
                &format!("indentation of {} spaces is not a multiple of 2", indent),
            );
            return;
        }

        self.check_structure(number, indent, content, shape, scan.violation);
    }

    /// Reports forbidden characters outside quoted strings, once per rule.
    fn scan(&mut self, number: usize, text: &str) -> LexicalScan {
        let mut result = LexicalScan::default();
        let mut in_quote = false;
        let mut escaped = false;
        let (mut tab, mut flow, mut anchor) = (false, false, false);

        for (i, ch) in text.char_indices() {
            if in_quote {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    in_quote = false;
                }
                continue;
            }

            match ch {
                '"' => in_quote = true,
                '\t' if !tab => {
                    tab = true;
                    result.violation = true;
                    if grammar::is_blank(&text[..i]) {
                        result.tab_in_indent = true;
                        self.report(number, Rule::Tab, TAB_IN_INDENT);
                    } else {
                        self.report(
                            number,
                            Rule::Tab,
                            "tab character outside a quoted string; use spaces, or \\t inside quotes",
                        );
                    }
                }
                '#' => {
                    result.violation = true;
                    self.report(
                        number,
                        Rule::Comment,
                        "comment found; comments are not allowed, use the $human$ field for annotations",
                    );
                    break;
                }
                '{' | '}' | '[' | ']' | ',' if !flow => {
                    flow = true;
                    result.violation = true;
                    self.report(
                        number,
                        Rule::FlowStyle,
                        &format!("flow style marker '{}' found; use block style", ch),
                    );
                }
                '&' | '*' | '!' if !anchor => {
                    anchor = true;
                    result.violation = true;
                    self.report(
                        number,
                        Rule::Anchor,
                        &format!("anchor, alias or tag marker '{}' found", ch),
                    );
                }
                _ => {}
            }
        }

        result
    }

    fn check_structure(
        &mut self,
        number: usize,
        indent: usize,
        content: &str,
        shape: Shape<'_>,
        lexical: bool,
    ) {
        let mut opened = false;

        match self.pending.take() {
            Some(child) if indent == child => {
                self.blocks.push(Block::new(indent, shape.kind()));
                opened = true;
                if let Shape::Scalar = shape {
                    self.report(
                        number,
                        Rule::ScalarStyle,
                        "scalar on its own line; canonical form writes it after ':' or '-'",
                    );
                }
            }
            Some(child) if indent > child => {
                self.report(
                    number,
                    Rule::Indentation,
                    &format!("expected {} spaces, found {}", child, indent),
                );
                return;
            }
            _ => {}
        }

        if !opened {
            if let Some(top) = self.blocks.last() {
                if indent > top.indent {
                    let msg = format!(
                        "unexpected indentation: expected at most {} spaces, found {}",
                        top.indent, indent
                    );
                    self.report(number, Rule::Indentation, &msg);
                    return;
                }
            }

            while self.blocks.last().map_or(false, |b| b.indent > indent) {
                self.blocks.pop();
            }

            match self.blocks.last().map(|b| (b.indent, b.kind)) {
                None => {
                    if indent != 0 {
                        self.report(
                            number,
                            Rule::Indentation,
                            &format!("expected 0 spaces at the top level, found {}", indent),
                        );
                    }
                    self.blocks.push(Block::new(indent, shape.kind()));
                }
                Some((top_indent, _)) if top_indent < indent => {
                    let msg = format!(
                        "indentation of {} spaces does not match any open block",
                        indent
                    );
                    self.report(number, Rule::Indentation, &msg);
                    return;
                }
                Some((_, kind)) => {
                    if !self.continues(number, kind, &shape, lexical) {
                        return;
                    }
                }
            }
        }

        match shape {
            Shape::Pair(key, rest) => self.check_pair(number, indent, key, rest, lexical),
            Shape::Item(rest) => self.check_rest(number, indent, rest, '-', lexical),
            Shape::Scalar => {
                if !lexical {
                    self.check_token(number, content);
                }
            }
        }
    }

    /// Checks that a line fits the block it continues.
    fn continues(
        &mut self,
        number: usize,
        kind: BlockKind,
        shape: &Shape<'_>,
        lexical: bool,
    ) -> bool {
        match (kind, shape) {
            (BlockKind::Mapping, Shape::Pair(..)) | (BlockKind::Sequence, Shape::Item(_)) => true,
            (BlockKind::Mapping, Shape::Item(_)) | (BlockKind::Sequence, Shape::Pair(..)) => {
                self.report(
                    number,
                    Rule::MixedCollection,
                    "mapping entries and sequence items cannot share a level",
                );
                false
            }
            (BlockKind::Scalar, _) => {
                self.report(
                    number,
                    Rule::Malformed,
                    "unexpected content after a scalar value",
                );
                false
            }
            (BlockKind::Mapping, Shape::Scalar) => {
                if !lexical {
                    self.report(number, Rule::Malformed, "expected a 'key: value' pair");
                }
                false
            }
            (BlockKind::Sequence, Shape::Scalar) => {
                if !lexical {
                    self.report(number, Rule::Malformed, "expected a '- ' sequence item");
                }
                false
            }
        }
    }

    fn check_pair(&mut self, number: usize, indent: usize, key: &str, rest: &str, lexical: bool) {
        let (duplicate, misplaced, out_of_order) = match self.blocks.last_mut() {
            Some(block) => {
                let duplicate = !block.keys.insert(key.to_string());
                let mut misplaced = false;
                let mut out_of_order = None;
                if key == RESERVED_KEY {
                    misplaced = block.seen_non_reserved;
                } else if !duplicate {
                    if let Some(prev) = block.prev_key.as_deref() {
                        if key < prev {
                            out_of_order = Some(prev.to_string());
                        }
                    }
                    block.seen_non_reserved = true;
                    block.prev_key = Some(key.to_string());
                }
                (duplicate, misplaced, out_of_order)
            }
            None => (false, false, None),
        };

        if duplicate {
            self.report(number, Rule::DuplicateKey, &format!("duplicate key '{}'", key));
        }
        if misplaced {
            self.report(
                number,
                Rule::ReservedKeyPosition,
                "$human$ must be the first key in its mapping",
            );
        }
        if let Some(prev) = out_of_order {
            self.report(
                number,
                Rule::KeyOrder,
                &format!(
                    "key '{}' should come before '{}'; keys must be in ascending byte order",
                    key, prev
                ),
            );
        }

        if key == RESERVED_KEY {
            let token = rest.trim_start_matches(' ');
            let kind = scalar::classify(token);
            let is_string = matches!(kind, Some(ScalarKind::Quoted) | Some(ScalarKind::Identifier));
            let is_garbage = !rest.is_empty()
                && kind.is_none()
                && token != EMPTY_MAPPING
                && token != EMPTY_SEQUENCE;
            if !is_string && !is_garbage {
                self.report(
                    number,
                    Rule::ReservedKeyValue,
                    "the $human$ field must hold a string",
                );
            }
        }

        self.check_rest(number, indent, rest, ':', lexical);
    }

    /// Checks what follows a `key:` or `-` marker.
    fn check_rest(
        &mut self,
        number: usize,
        indent: usize,
        rest: &str,
        marker: char,
        lexical: bool,
    ) {
        if rest.is_empty() {
            self.pending = Some(indent + INDENT_UNIT);
            return;
        }
        if !rest.starts_with(' ') {
            if !lexical {
                self.report(
                    number,
                    Rule::Malformed,
                    &format!("expected a space after '{}'", marker),
                );
            }
            return;
        }

        let token = rest.trim_start_matches(' ');
        if rest.len() - token.len() > 1 {
            self.report(
                number,
                Rule::Spacing,
                &format!("more than one space after '{}'", marker),
            );
        }
        if !lexical {
            self.check_token(number, token);
        }
    }

    fn check_token(&mut self, number: usize, token: &str) {
        if token == EMPTY_MAPPING || token == EMPTY_SEQUENCE {
            return;
        }
        match scalar::decode(token, number, 1) {
            Ok(value) => {
                if let Some(canonical) = scalar::encode(&value) {
                    if canonical != token {
                        self.report(
                            number,
                            Rule::ScalarStyle,
                            &format!("{} is not in canonical form; write {}", token, canonical),
                        );
                    }
                }
            }
            Err(Error::Scalar { msg, .. }) => self.report(number, Rule::InvalidScalar, &msg),
            Err(other) => self.report(number, Rule::InvalidScalar, &other.to_string()),
        }
    }
}
