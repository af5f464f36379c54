//! Renders an edit script as aligned rows.
//!
//! Text mode marks each column of the middle line with `' '` (equal), `'-'`
//! (only in actual) or `'+'` (only in expected) and pads the opposite side
//! with spaces. Colour modes pad with `'/'`, colour the changed runs and leave
//! the marker line empty.

use owo_colors::{AnsiColors, DynColors, OwoColorize, XtermColors};
use requirements_core_types::TerminalEncoding;
use unicode_width::UnicodeWidthChar;

use super::model::{DiffRow, Edit};

/// Rows wrap once they reach this many columns
pub const MAX_ROW_WIDTH: usize = 80;

pub const MARKER_EQUAL: char = ' ';
pub const MARKER_DELETE: char = '-';
pub const MARKER_INSERT: char = '+';
pub const TEXT_PADDING: char = ' ';
pub const COLOR_PADDING: char = '/';

/// Visible stand-in for a line break
pub const NEWLINE_MARKER: &str = "\\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Deleted,
    Inserted,
    Padding,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    deleted: DynColors,
    inserted: DynColors,
    padding: DynColors,
}

impl Palette {
    fn for_encoding(encoding: TerminalEncoding) -> Option<Self> {
        let palette = match encoding {
            TerminalEncoding::None => return None,
            TerminalEncoding::Xterm8Colors => Palette {
                deleted: DynColors::Ansi(AnsiColors::Red),
                inserted: DynColors::Ansi(AnsiColors::Green),
                padding: DynColors::Ansi(AnsiColors::White),
            },
            TerminalEncoding::Xterm16Colors => Palette {
                deleted: DynColors::Ansi(AnsiColors::BrightRed),
                inserted: DynColors::Ansi(AnsiColors::BrightGreen),
                padding: DynColors::Ansi(AnsiColors::BrightBlack),
            },
            TerminalEncoding::Xterm256Colors => Palette {
                deleted: DynColors::Xterm(XtermColors::from(124)),
                inserted: DynColors::Xterm(XtermColors::from(28)),
                padding: DynColors::Xterm(XtermColors::from(244)),
            },
            TerminalEncoding::Rgb888Colors => Palette {
                deleted: DynColors::Rgb(175, 0, 0),
                inserted: DynColors::Rgb(0, 135, 0),
                padding: DynColors::Rgb(128, 128, 128),
            },
        };
        Some(palette)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        match style {
            Style::Plain => text.to_string(),
            Style::Deleted => text.on_color(self.deleted).to_string(),
            Style::Inserted => text.on_color(self.inserted).to_string(),
            Style::Padding => text.color(self.padding).to_string(),
        }
    }
}

/// Rendered form of one source character and its display width
pub(crate) fn render_char(c: char) -> (String, usize) {
    if c == '\n' {
        return (NEWLINE_MARKER.to_string(), NEWLINE_MARKER.len());
    }
    match c.width() {
        Some(width) if width > 0 && !c.is_control() => (c.to_string(), width),
        // Controls and zero-width marks would leave no column to mark
        _ => {
            let escaped: String = c.escape_default().collect();
            let width = escaped.len();
            (escaped, width)
        }
    }
}

/// Runs of equally styled text on one side of a row
#[derive(Debug, Default)]
struct Line {
    spans: Vec<(Style, String)>,
}

impl Line {
    fn push(&mut self, style: Style, text: &str) {
        if let Some((last_style, last_text)) = self.spans.last_mut() {
            if *last_style == style {
                last_text.push_str(text);
                return;
            }
        }
        self.spans.push((style, text.to_string()));
    }

    fn pad(&mut self, style: Style, fill: char, width: usize) {
        self.push(style, &fill.to_string().repeat(width));
    }

    fn render(&self, palette: Option<&Palette>) -> String {
        match palette {
            None => self.spans.iter().map(|(_, text)| text.as_str()).collect(),
            Some(palette) => self
                .spans
                .iter()
                .map(|(style, text)| palette.paint(*style, text))
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
struct RowBuilder {
    actual: Line,
    expected: Line,
    markers: String,
    width: usize,
    changed: bool,
    actual_has_text: bool,
    expected_has_text: bool,
}

/// Accumulates edits into rows
#[derive(Debug)]
pub struct DiffWriter {
    encoding: TerminalEncoding,
    palette: Option<Palette>,
    padding: char,
    rows: Vec<DiffRow>,
    row: RowBuilder,
    actual_line: usize,
    expected_line: usize,
    row_actual_line: usize,
    row_expected_line: usize,
}

impl DiffWriter {
    pub fn new(encoding: TerminalEncoding) -> Self {
        let palette = Palette::for_encoding(encoding);
        Self {
            encoding,
            padding: if palette.is_some() {
                COLOR_PADDING
            } else {
                TEXT_PADDING
            },
            palette,
            rows: Vec::new(),
            row: RowBuilder::default(),
            actual_line: 0,
            expected_line: 0,
            row_actual_line: 0,
            row_expected_line: 0,
        }
    }

    pub fn encoding(&self) -> TerminalEncoding {
        self.encoding
    }

    pub fn write(&mut self, edit: &Edit) {
        match edit {
            Edit::Equal(text) => self.write_equal(text),
            Edit::Delete(text) => self.write_deleted(text),
            Edit::Insert(text) => self.write_inserted(text),
        }
    }

    pub fn write_equal(&mut self, text: &str) {
        for c in text.chars() {
            let (glyph, width) = render_char(c);
            self.wrap_before(width);
            self.row.actual.push(Style::Plain, &glyph);
            self.row.expected.push(Style::Plain, &glyph);
            self.push_markers(MARKER_EQUAL, width);
            self.row.actual_has_text = true;
            self.row.expected_has_text = true;
            if c == '\n' {
                self.end_row(true, true);
            }
        }
    }

    pub fn write_deleted(&mut self, text: &str) {
        for c in text.chars() {
            let (glyph, width) = render_char(c);
            self.wrap_before(width);
            self.row.actual.push(Style::Deleted, &glyph);
            self.row.expected.pad(Style::Padding, self.padding, width);
            self.push_markers(MARKER_DELETE, width);
            self.row.changed = true;
            self.row.actual_has_text = true;
            if c == '\n' {
                self.end_row(true, false);
            }
        }
    }

    pub fn write_inserted(&mut self, text: &str) {
        for c in text.chars() {
            let (glyph, width) = render_char(c);
            self.wrap_before(width);
            self.row.actual.pad(Style::Padding, self.padding, width);
            self.row.expected.push(Style::Inserted, &glyph);
            self.push_markers(MARKER_INSERT, width);
            self.row.changed = true;
            self.row.expected_has_text = true;
            if c == '\n' {
                self.end_row(false, true);
            }
        }
    }

    fn push_markers(&mut self, marker: char, width: usize) {
        if self.palette.is_none() {
            self.row.markers.push_str(&marker.to_string().repeat(width));
        }
        self.row.width += width;
    }

    fn wrap_before(&mut self, width: usize) {
        if self.row.width > 0 && self.row.width + width > MAX_ROW_WIDTH {
            self.end_row(false, false);
        }
    }

    fn end_row(&mut self, actual_line_ended: bool, expected_line_ended: bool) {
        let row = std::mem::take(&mut self.row);
        self.rows.push(DiffRow {
            actual: row.actual.render(self.palette.as_ref()),
            diff: row.markers,
            expected: row.expected.render(self.palette.as_ref()),
            actual_line: self.row_actual_line,
            expected_line: self.row_expected_line,
            equal: !row.changed,
            actual_has_text: row.actual_has_text,
            expected_has_text: row.expected_has_text,
        });
        if actual_line_ended {
            self.actual_line += 1;
        }
        if expected_line_ended {
            self.expected_line += 1;
        }
        self.row_actual_line = self.actual_line;
        self.row_expected_line = self.expected_line;
    }

    /// Flush the last row. Always yields at least one row.
    pub fn finish(mut self) -> Vec<DiffRow> {
        if self.row.width > 0 || self.rows.is_empty() {
            self.end_row(false, false);
        }
        self.rows
    }
}
