//! Read-only views of the screen
//!
//! [`Snapshot`] borrows the screen for the renderer. [`ScreenDump`] is an
//! owned, serializable copy used for JSON dumps and tests.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::cursor::Cursor;
use crate::modes::Modes;
use crate::screen::Screen;

/// Borrowed view of the grid, cursor and modes
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    screen: &'a Screen,
}

impl<'a> Snapshot<'a> {
    /// Create a view of a screen
    pub fn new(screen: &'a Screen) -> Self {
        Self { screen }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.screen.rows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.screen.cols()
    }

    /// Cell at a position
    pub fn cell(&self, row: usize, col: usize) -> Option<&'a Cell> {
        self.screen.grid().cell(row, col)
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> Option<&'a [Cell]> {
        self.screen.grid().row(row)
    }

    /// Rows top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &'a [Cell]> {
        self.screen.grid().iter()
    }

    /// Cursor position
    pub fn cursor(&self) -> Cursor {
        self.screen.cursor()
    }

    /// Mode flags
    pub fn modes(&self) -> &'a Modes {
        self.screen.modes()
    }

    /// Each row as a string, full width
    pub fn text_lines(&self) -> Vec<String> {
        self.iter_rows()
            .map(|cells| cells.iter().map(|c| c.ch).collect())
            .collect()
    }

    /// Screen as plain text: printable ASCII kept, everything else becomes
    /// a space, one newline-terminated line per row
    pub fn to_ascii_text(&self) -> String {
        let mut text = String::with_capacity(self.rows() * (self.cols() + 1));
        for cells in self.iter_rows() {
            text.extend(cells.iter().map(|c| match c.ch {
                ' '..='~' => c.ch,
                _ => ' ',
            }));
            text.push('\n');
        }
        text
    }

    /// Owned serializable copy
    pub fn to_dump(&self) -> ScreenDump {
        let (top, bottom) = self.screen.scroll_region();
        let cursor = self.cursor();
        ScreenDump {
            dimensions: DumpDimensions {
                cols: self.cols(),
                rows: self.rows(),
            },
            cursor: DumpCursor {
                row: cursor.row,
                col: cursor.col,
                visible: self.modes().cursor_visible,
            },
            screen: self
                .iter_rows()
                .map(|cells| DumpLine {
                    text: cells.iter().map(|c| c.ch).collect(),
                    spans: style_spans(cells),
                })
                .collect(),
            scroll_region: (top, bottom),
            modes: *self.modes(),
        }
    }
}

/// A complete, serializable copy of the screen state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenDump {
    /// Grid dimensions
    pub dimensions: DumpDimensions,
    /// Cursor state
    pub cursor: DumpCursor,
    /// Screen content, one entry per row
    pub screen: Vec<DumpLine>,
    /// Scroll region, inclusive
    pub scroll_region: (usize, usize),
    /// Mode flags
    pub modes: Modes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpDimensions {
    pub cols: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpCursor {
    pub row: usize,
    pub col: usize,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpLine {
    /// Text content of the line
    pub text: String,
    /// Runs of non-default styling
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<StyleSpan>,
}

/// A run of cells sharing attributes and colors, `start..end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSpan {
    pub start: usize,
    pub end: usize,
    pub fg: u8,
    pub bg: u8,
    /// Attribute bits
    #[serde(skip_serializing_if = "is_zero", default)]
    pub attrs: u8,
}

fn is_zero(v: &u8) -> bool {
    *v == 0
}

fn style_spans(cells: &[Cell]) -> Vec<StyleSpan> {
    let default = Cell::blank();
    let mut spans: Vec<StyleSpan> = Vec::new();

    for (col, cell) in cells.iter().enumerate() {
        if cell.attrs == default.attrs && cell.pair == default.pair {
            continue;
        }
        match spans.last_mut() {
            Some(span)
                if span.end == col
                    && span.fg == cell.pair.fg()
                    && span.bg == cell.pair.bg()
                    && span.attrs == cell.attrs.bits() =>
            {
                span.end = col + 1;
            }
            _ => spans.push(StyleSpan {
                start: col,
                end: col + 1,
                fg: cell.pair.fg(),
                bg: cell.pair.bg(),
                attrs: cell.attrs.bits(),
            }),
        }
    }

    spans
}

impl ScreenDump {
    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Text of every row
    pub fn to_text(&self) -> String {
        self.screen
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
