//! Diff output types.

use requirements_core_types::TerminalEncoding;
use serde::Serialize;

/// One step of the edit script that turns actual into expected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Text present on both sides
    Equal(String),
    /// Text present only in actual
    Delete(String),
    /// Text present only in expected
    Insert(String),
}

impl Edit {
    pub fn text(&self) -> &str {
        match self {
            Edit::Equal(text) | Edit::Delete(text) | Edit::Insert(text) => text,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Edit::Equal(_))
    }

    fn text_mut(&mut self) -> &mut String {
        match self {
            Edit::Equal(text) | Edit::Delete(text) | Edit::Insert(text) => text,
        }
    }

    fn same_kind(&self, other: &Edit) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Merge adjacent edits of one kind and drop empty ones
pub(crate) fn coalesce(edits: impl IntoIterator<Item = Edit>) -> Vec<Edit> {
    let mut out: Vec<Edit> = Vec::new();
    for edit in edits {
        if edit.text().is_empty() {
            continue;
        }
        if let Some(last) = out.last_mut() {
            if last.same_kind(&edit) {
                last.text_mut().push_str(edit.text());
                continue;
            }
        }
        out.push(edit);
    }
    out
}

/// One aligned row of a diff
///
/// `actual` and `expected` always have the same display width. `diff` holds
/// the marker line in text mode. It is empty in colour modes, where the
/// markup itself shows the changes, and in plain fallback blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub actual: String,
    pub diff: String,
    pub expected: String,
    /// 0-based line of actual that this row shows
    pub actual_line: usize,
    /// 0-based line of expected that this row shows
    pub expected_line: usize,
    /// True if nothing in this row differs
    pub equal: bool,
    /// True if the row shows any character of actual, not just padding
    pub actual_has_text: bool,
    /// True if the row shows any character of expected, not just padding
    pub expected_has_text: bool,
}

/// The rendered diff of two strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    rows: Vec<DiffRow>,
    encoding: TerminalEncoding,
    fallback: bool,
}

impl DiffResult {
    pub(crate) fn new(rows: Vec<DiffRow>, encoding: TerminalEncoding, fallback: bool) -> Self {
        Self {
            rows,
            encoding,
            fallback,
        }
    }

    pub fn rows(&self) -> &[DiffRow] {
        &self.rows
    }

    pub fn encoding(&self) -> TerminalEncoding {
        self.encoding
    }

    /// True if the inputs were rendered as plain blocks without an edit script
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// True if every row is equal
    pub fn is_equal(&self) -> bool {
        self.rows.iter().all(|row| row.equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coalesce_merges_and_drops_empty() {
        let edits = coalesce(vec![
            Edit::Equal("a".to_string()),
            Edit::Equal("b".to_string()),
            Edit::Delete(String::new()),
            Edit::Delete("c".to_string()),
            Edit::Insert("d".to_string()),
        ]);
        assert_eq!(
            edits,
            vec![
                Edit::Equal("ab".to_string()),
                Edit::Delete("c".to_string()),
                Edit::Insert("d".to_string()),
            ]
        );
    }
}
