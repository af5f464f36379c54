//! Composes failure messages and raises them as errors.

use crate::config::Configuration;
use crate::diff::{compute_diff, DiffResult, DiffRow};
use crate::errors::{ExceptionKind, VerificationError};
use crate::exceptions;
use crate::global::global_configuration;
use crate::log_failure;
use crate::message::Describe;

/// Label of the actual value in a failure's context
pub const ACTUAL: &str = "Actual";
/// Label of the expected value in a failure's context
pub const EXPECTED: &str = "Expected";
/// Label of the marker line inside a diff block
pub const DIFF: &str = "Diff";
/// Stand-in for equal rows left out of a diff block
pub const ELIDED: &str = "[...]";

/// Follows an actual and expected value that render alike but differ
pub const SAME_RENDERING_NOTE: &str =
    "Actual and Expected have the same string form but are not equal";

/// Values shorter than this are shown as plain lines
pub const MIN_DIFF_LENGTH: usize = 2;

#[derive(Debug, Clone)]
struct Pair {
    label: String,
    value: String,
    boolean: bool,
}

/// Start composing a failure
///
/// `default_kind` is raised unless the configuration overrides it.
pub fn exception_builder(
    config: &Configuration,
    default_kind: ExceptionKind,
    message: impl Into<String>,
) -> ExceptionBuilder<'_> {
    ExceptionBuilder {
        config,
        default_kind,
        message: message.into(),
        op: "verify",
        name: String::new(),
        pairs: Vec::new(),
        types: None,
    }
}

/// Assembles one failure message
///
/// The message is the primary line, then the failure's own context pairs,
/// then the configuration's context. An `Actual`/`Expected` pair is replaced
/// by a diff block when diffs are enabled both here and globally.
#[derive(Debug)]
pub struct ExceptionBuilder<'a> {
    config: &'a Configuration,
    default_kind: ExceptionKind,
    message: String,
    op: &'static str,
    name: String,
    pairs: Vec<Pair>,
    types: Option<(&'static str, &'static str)>,
}

impl<'a> ExceptionBuilder<'a> {
    /// Name the predicate that failed, for logging
    pub fn op(mut self, op: &'static str) -> Self {
        self.op = op;
        self
    }

    /// Name the value that failed, for logging
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a failure-specific context pair
    pub fn add_context<V: Describe + ?Sized>(mut self, label: impl Into<String>, value: &V) -> Self {
        self.pairs.push(Pair {
            label: label.into(),
            value: value.describe(),
            boolean: value.is_boolean(),
        });
        self
    }

    /// Type names of the actual and expected values, shown when the two
    /// render alike
    pub fn type_names(mut self, actual: &'static str, expected: &'static str) -> Self {
        self.types = Some((actual, expected));
        self
    }

    /// Compose the message and build the error
    pub fn build(self) -> VerificationError {
        let kind = self.config.exception().unwrap_or(self.default_kind);
        let message = self.compose();
        let mut err = VerificationError::new(kind, message);
        if let Some(custom) = exceptions::construct(kind, err.message()) {
            err = err.with_custom(custom);
        }
        log_failure!(self.op, self.name.as_str(), err);
        err
    }

    fn compose(&self) -> String {
        let mut lines = vec![self.message.clone()];
        let diff_at = self.diff_positions();
        for (i, pair) in self.pairs.iter().enumerate() {
            match diff_at {
                Some((first, second)) if i == first.min(second) => {
                    let diff = compute_diff(
                        &self.pairs[first].value,
                        &self.pairs[second].value,
                        global_configuration().terminal_encoding(),
                    );
                    lines.extend(format_diff_block(&diff));
                }
                Some((first, second)) if i == first.max(second) => {}
                _ => lines.push(format!("{}: {}", pair.label, pair.value)),
            }
        }
        lines.extend(self.disambiguation());
        for entry in self.config.context() {
            lines.push(format!("{}: {}", entry.key(), entry.render()));
        }
        lines.join("\n")
    }

    /// Indices of the actual and expected pairs, if they should be diffed
    fn diff_positions(&self) -> Option<(usize, usize)> {
        if !self.config.diff_enabled() || !global_configuration().is_diff_enabled() {
            return None;
        }
        let actual = self.unique_pair(ACTUAL)?;
        let expected = self.unique_pair(EXPECTED)?;
        let diffable = |pair: &Pair| !pair.boolean && pair.value.chars().count() >= MIN_DIFF_LENGTH;
        if diffable(&self.pairs[actual]) && diffable(&self.pairs[expected]) {
            Some((actual, expected))
        } else {
            None
        }
    }

    /// Lines telling apart actual and expected values with one string form
    fn disambiguation(&self) -> Vec<String> {
        let (Some(actual), Some(expected)) = (self.unique_pair(ACTUAL), self.unique_pair(EXPECTED))
        else {
            return Vec::new();
        };
        if self.pairs[actual].value != self.pairs[expected].value {
            return Vec::new();
        }
        match self.types {
            Some((actual_type, expected_type)) if actual_type != expected_type => vec![
                format!("{}.type: {}", ACTUAL, actual_type),
                format!("{}.type: {}", EXPECTED, expected_type),
            ],
            _ => vec![SAME_RENDERING_NOTE.to_string()],
        }
    }

    fn unique_pair(&self, label: &str) -> Option<usize> {
        let mut matches = self
            .pairs
            .iter()
            .enumerate()
            .filter(|(_, pair)| pair.label == label)
            .map(|(i, _)| i);
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }
}

fn row_label(base: &str, line: usize, has_text: bool, numbered: bool) -> String {
    if numbered && has_text {
        format!("{}@{}", base, line)
    } else {
        base.to_string()
    }
}

enum Section<'r> {
    Row(&'r DiffRow),
    Elided,
}

/// Render a diff as labelled lines
///
/// Rows are separated by blank lines; equal rows other than the first and
/// last collapse into a single `[...]`. Labels are padded to a common width
/// so that values line up column for column.
pub fn format_diff_block(diff: &DiffResult) -> Vec<String> {
    let rows = diff.rows();
    let numbered = rows.len() > 1;
    let last = rows.len().saturating_sub(1);

    let mut sections = Vec::new();
    let mut skipped = false;
    for (i, row) in rows.iter().enumerate() {
        if i != 0 && i != last && row.equal {
            skipped = true;
            continue;
        }
        if skipped {
            sections.push(Section::Elided);
            skipped = false;
        }
        sections.push(Section::Row(row));
    }

    let mut labelled: Vec<Vec<(String, &str)>> = Vec::new();
    for section in &sections {
        let Section::Row(row) = section else {
            labelled.push(Vec::new());
            continue;
        };
        let mut lines = vec![(
            row_label(ACTUAL, row.actual_line, row.actual_has_text, numbered),
            row.actual.as_str(),
        )];
        if !row.equal && !row.diff.is_empty() {
            lines.push((DIFF.to_string(), row.diff.as_str()));
        }
        lines.push((
            row_label(EXPECTED, row.expected_line, row.expected_has_text, numbered),
            row.expected.as_str(),
        ));
        labelled.push(lines);
    }

    let width = labelled
        .iter()
        .flatten()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);

    let mut out = Vec::new();
    for (i, lines) in labelled.iter().enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        if lines.is_empty() {
            out.push(ELIDED.to_string());
            continue;
        }
        for (label, value) in lines {
            out.push(format!("{:<width$}: {}", label, value, width = width));
        }
    }
    out
}
