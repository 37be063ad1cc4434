//! Cursor state management
//!
//! Handles cursor position and the saved terminal context.

use serde::{Deserialize, Serialize};

use crate::cell::{Attrs, ColorPair};
use crate::charset::CharsetState;

/// Cursor position.
///
/// `col` may equal the column count after a character lands in the last
/// column; the next printed character resolves it by wrapping or clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Row position (0-indexed)
    pub row: usize,
    /// Column position (0-indexed)
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at a position
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move cursor to beginning of line
    pub fn carriage_return(&mut self) {
        self.col = 0;
    }
}

/// Everything `ESC 7` saves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedState {
    /// Saved position
    pub cursor: Cursor,
    /// Saved origin mode
    pub origin_mode: bool,
    /// Saved attributes
    pub attrs: Attrs,
    /// Saved color pair
    pub pair: ColorPair,
    /// Saved charset slots and active slot
    pub charsets: CharsetState,
}

impl Default for SavedState {
    fn default() -> Self {
        Self {
            cursor: Cursor::default(),
            origin_mode: false,
            attrs: Attrs::empty(),
            pair: ColorPair::default(),
            charsets: CharsetState::default(),
        }
    }
}

/// Saved terminal context.
///
/// `CSI s`/`CSI u` use the position-only slot, `ESC 7`/`ESC 8` the full
/// slot. Each save overwrites its slot; a full reset re-seeds both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SavedContext {
    /// Position saved by `CSI s`
    pub cursor: Cursor,
    /// State saved by `ESC 7`
    pub full: SavedState,
}
