//! Computes the edit script and renders it.

use std::time::{Duration, Instant};

use requirements_core_types::schema::EVENT_DIFF_FALLBACK;
use requirements_core_types::TerminalEncoding;
use similar::{capture_diff_slices_deadline, Algorithm, DiffTag};

use super::model::{coalesce, DiffResult, DiffRow, Edit};
use super::writer::{render_char, DiffWriter};
use crate::{log_op_end, log_op_start};

/// Inputs longer than this many characters are not diffed
pub const MAX_DIFF_LENGTH: usize = 10_000;

/// Time allowed for one edit script before falling back to plain rows
pub const DIFF_TIME_BUDGET: Duration = Duration::from_millis(250);

/// Diff `actual` against `expected`, rendering with `encoding`
///
/// Identical inputs skip the edit script and render as equal rows. Inputs
/// longer than [`MAX_DIFF_LENGTH`], or whose edit script takes longer than
/// [`DIFF_TIME_BUDGET`], render as plain side-by-side lines.
pub fn compute_diff(actual: &str, expected: &str, encoding: TerminalEncoding) -> DiffResult {
    compute_diff_within(actual, expected, encoding, DIFF_TIME_BUDGET)
}

/// [`compute_diff`] with an explicit time budget for the edit script
pub fn compute_diff_within(
    actual: &str,
    expected: &str,
    encoding: TerminalEncoding,
    budget: Duration,
) -> DiffResult {
    let actual_len = actual.chars().count();
    let expected_len = expected.chars().count();
    log_op_start!("compute_diff", actual_len = actual_len, expected_len = expected_len);
    let started = Instant::now();
    if actual_len > MAX_DIFF_LENGTH || expected_len > MAX_DIFF_LENGTH {
        return fallback(actual, expected, encoding, "too_long", started);
    }

    let edits = if actual == expected {
        vec![Edit::Equal(actual.to_string())]
    } else {
        match edit_script(actual, expected, started + budget) {
            Some(edits) => reduce_to_words(edits),
            None => return fallback(actual, expected, encoding, "timeout", started),
        }
    };
    let mut writer = DiffWriter::new(encoding);
    for edit in &edits {
        writer.write(edit);
    }
    let rows = writer.finish();
    log_op_end!(
        "compute_diff",
        duration_ms = started.elapsed().as_millis() as u64,
        rows = rows.len(),
    );
    DiffResult::new(rows, encoding, false)
}

fn fallback(
    actual: &str,
    expected: &str,
    encoding: TerminalEncoding,
    reason: &'static str,
    started: Instant,
) -> DiffResult {
    tracing::debug!(
        component = module_path!(),
        op = "compute_diff",
        event = EVENT_DIFF_FALLBACK,
        reason = reason,
        actual_len = actual.chars().count(),
        expected_len = expected.chars().count(),
    );
    let rows = plain_rows(actual, expected);
    log_op_end!(
        "compute_diff",
        duration_ms = started.elapsed().as_millis() as u64,
        rows = rows.len(),
    );
    DiffResult::new(rows, encoding, true)
}

/// Character-level edit script, deletions before insertions
///
/// `None` once `deadline` has passed; the script similar returns past its
/// deadline is too coarse to show.
pub(crate) fn edit_script(actual: &str, expected: &str, deadline: Instant) -> Option<Vec<Edit>> {
    let old: Vec<char> = actual.chars().collect();
    let new: Vec<char> = expected.chars().collect();
    let to_text = |chars: &[char]| chars.iter().collect::<String>();

    let ops = capture_diff_slices_deadline(Algorithm::Myers, &old, &new, Some(deadline));
    if Instant::now() >= deadline {
        return None;
    }
    let mut edits = Vec::new();
    for op in ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => edits.push(Edit::Equal(to_text(&old[old_range]))),
            DiffTag::Delete => edits.push(Edit::Delete(to_text(&old[old_range]))),
            DiffTag::Insert => edits.push(Edit::Insert(to_text(&new[new_range]))),
            DiffTag::Replace => {
                edits.push(Edit::Delete(to_text(&old[old_range])));
                edits.push(Edit::Insert(to_text(&new[new_range])));
            }
        }
    }
    Some(group_changes(edits))
}

/// Rewrite each run of changes between equal text as one deletion followed
/// by one insertion.
fn group_changes(edits: Vec<Edit>) -> Vec<Edit> {
    let mut out = Vec::with_capacity(edits.len());
    let mut deleted = String::new();
    let mut inserted = String::new();
    for edit in edits {
        match edit {
            Edit::Delete(text) => deleted.push_str(&text),
            Edit::Insert(text) => inserted.push_str(&text),
            Edit::Equal(text) => {
                out.push(Edit::Delete(std::mem::take(&mut deleted)));
                out.push(Edit::Insert(std::mem::take(&mut inserted)));
                out.push(Edit::Equal(text));
            }
        }
    }
    out.push(Edit::Delete(deleted));
    out.push(Edit::Insert(inserted));
    coalesce(out)
}

/// Coarsen words that changed in more than one place
///
/// Words are delimited by whitespace inside equal text. A word touched by
/// more than two change edits is replaced by the deletion of its actual form
/// followed by the insertion of its expected form; other words keep their
/// character-level edits.
pub(crate) fn reduce_to_words(edits: Vec<Edit>) -> Vec<Edit> {
    let mut out = Vec::with_capacity(edits.len());
    let mut word: Vec<Edit> = Vec::new();
    for edit in edits {
        let Edit::Equal(text) = edit else {
            word.push(edit);
            continue;
        };
        match whitespace_span(&text) {
            None => word.push(Edit::Equal(text)),
            Some((start, end)) => {
                word.push(Edit::Equal(text[..start].to_string()));
                flush_word(&mut word, &mut out);
                out.push(Edit::Equal(text[start..end].to_string()));
                word.push(Edit::Equal(text[end..].to_string()));
            }
        }
    }
    flush_word(&mut word, &mut out);
    coalesce(out)
}

/// Byte range from the first whitespace character to just past the last one
fn whitespace_span(text: &str) -> Option<(usize, usize)> {
    let start = text.find(char::is_whitespace)?;
    let (last, c) = text.char_indices().rev().find(|(_, c)| c.is_whitespace())?;
    Some((start, last + c.len_utf8()))
}

fn flush_word(word: &mut Vec<Edit>, out: &mut Vec<Edit>) {
    let parts = coalesce(std::mem::take(word));
    let changes = parts.iter().filter(|edit| !edit.is_equal()).count();
    if changes <= 2 {
        out.extend(parts);
        return;
    }
    let mut actual = String::new();
    let mut expected = String::new();
    for part in &parts {
        match part {
            Edit::Equal(text) => {
                actual.push_str(text);
                expected.push_str(text);
            }
            Edit::Delete(text) => actual.push_str(text),
            Edit::Insert(text) => expected.push_str(text),
        }
    }
    out.push(Edit::Delete(actual));
    out.push(Edit::Insert(expected));
}

/// Side-by-side lines without an edit script
fn plain_rows(actual: &str, expected: &str) -> Vec<DiffRow> {
    let actual_lines = render_lines(actual);
    let expected_lines = render_lines(expected);
    let count = actual_lines.len().max(expected_lines.len());
    (0..count)
        .map(|i| {
            let (actual, actual_width) = actual_lines.get(i).cloned().unwrap_or_default();
            let (expected, expected_width) = expected_lines.get(i).cloned().unwrap_or_default();
            let width = actual_width.max(expected_width);
            DiffRow {
                equal: actual == expected,
                actual_has_text: i < actual_lines.len(),
                expected_has_text: i < expected_lines.len(),
                diff: String::new(),
                actual: pad_to(actual, actual_width, width),
                expected: pad_to(expected, expected_width, width),
                actual_line: i.min(actual_lines.len().saturating_sub(1)),
                expected_line: i.min(expected_lines.len().saturating_sub(1)),
            }
        })
        .collect()
}

fn pad_to(mut text: String, width: usize, target: usize) -> String {
    text.push_str(&" ".repeat(target.saturating_sub(width)));
    text
}

/// Each source line rendered, with its display width
fn render_lines(text: &str) -> Vec<(String, usize)> {
    if text.is_empty() {
        return vec![(String::new(), 0)];
    }
    text.split_inclusive('\n')
        .map(|line| {
            line.chars().fold((String::new(), 0), |(mut out, width), c| {
                let (glyph, glyph_width) = render_char(c);
                out.push_str(&glyph);
                (out, width + glyph_width)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal(s: &str) -> Edit {
        Edit::Equal(s.to_string())
    }
    fn delete(s: &str) -> Edit {
        Edit::Delete(s.to_string())
    }
    fn insert(s: &str) -> Edit {
        Edit::Insert(s.to_string())
    }
    fn script(actual: &str, expected: &str) -> Vec<Edit> {
        edit_script(actual, expected, Instant::now() + Duration::from_secs(60)).unwrap()
    }

    #[test]
    fn test_single_character_change_stays_fine_grained() {
        let edits = reduce_to_words(script("abc", "abd"));
        assert_eq!(edits, vec![equal("ab"), delete("c"), insert("d")]);
    }

    #[test]
    fn test_word_with_scattered_changes_is_replaced_whole() {
        let edits = reduce_to_words(vec![
            equal("x "),
            delete("a"),
            insert("q"),
            equal("b"),
            delete("c"),
            insert("z"),
            equal(" y"),
        ]);
        assert_eq!(
            edits,
            vec![equal("x "), delete("abc"), insert("qbz"), equal(" y")]
        );
    }

    #[test]
    fn test_other_words_are_untouched() {
        let edits = reduce_to_words(vec![
            equal("one "),
            delete("t"),
            insert("T"),
            equal("wo three"),
        ]);
        assert_eq!(
            edits,
            vec![equal("one "), delete("t"), insert("T"), equal("wo three")]
        );
    }

    #[test]
    fn test_deletions_precede_insertions() {
        for edits in [script("kitten", "sitting"), script("abc", "xyz")] {
            for pair in edits.windows(2) {
                assert!(
                    !matches!((&pair[0], &pair[1]), (Edit::Insert(_), Edit::Delete(_))),
                    "{:?}",
                    edits
                );
            }
        }
    }

    #[test]
    fn test_edit_script_reconstructs_both_sides() {
        let edits = script("the quick fox", "a quick brown fox");
        let actual: String = edits
            .iter()
            .filter(|e| !matches!(e, Edit::Insert(_)))
            .map(Edit::text)
            .collect();
        let expected: String = edits
            .iter()
            .filter(|e| !matches!(e, Edit::Delete(_)))
            .map(Edit::text)
            .collect();
        assert_eq!(actual, "the quick fox");
        assert_eq!(expected, "a quick brown fox");
    }

    #[test]
    fn test_identical_inputs_are_equal_rows() {
        let result = compute_diff("same", "same", TerminalEncoding::None);
        assert!(result.is_equal());
        assert!(!result.is_fallback());
        assert_eq!(result.rows()[0].diff, "    ");
    }

    #[test]
    fn test_oversized_inputs_fall_back() {
        let long = "a".repeat(MAX_DIFF_LENGTH + 1);
        let result = compute_diff(&long, "b", TerminalEncoding::Xterm256Colors);
        assert!(result.is_fallback());
        assert_eq!(result.rows().len(), 1);
        assert!(!result.rows()[0].equal);
        assert!(!result.rows()[0].actual.contains('\u{1b}'));
    }

    #[test]
    fn test_expired_budget_falls_back() {
        let result = compute_diff_within("abc", "abd", TerminalEncoding::None, Duration::ZERO);
        assert!(result.is_fallback());
        assert_eq!(result.rows()[0].actual, "abc");
        assert_eq!(result.rows()[0].expected, "abd");
        assert!(result.rows()[0].diff.is_empty());
    }

    #[test]
    fn test_identical_inputs_ignore_budget() {
        let result = compute_diff_within("same", "same", TerminalEncoding::None, Duration::ZERO);
        assert!(!result.is_fallback());
        assert!(result.is_equal());
    }

    #[test]
    fn test_plain_rows_pair_lines() {
        let rows = plain_rows("a\nbb", "a\n");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].equal);
        assert_eq!(rows[1].actual, "bb");
        assert_eq!(rows[1].expected, "  ");
        assert!(!rows[1].expected_has_text);
    }
}
