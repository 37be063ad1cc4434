//! Screen model for replaying recorded terminal sessions
//!
//! This crate provides the core data structures and logic for terminal
//! emulation:
//! - Screen grid with cells containing characters, attributes and colors
//! - Cursor, scroll region and saved context
//! - Mode flags and character sets
//! - The [`Terminal`] facade that feeds bytes through the parser
//!
//! This crate is designed to be deterministic: given the same byte stream,
//! it will always produce the same screen state.

mod cell;
mod charset;
mod color;
mod cursor;
mod diagnostics;
mod grid;
mod modes;
mod screen;
mod snapshot;
mod terminal;

pub use cell::{Attrs, Cell, ColorPair};
pub use charset::{Charset, CharsetState};
pub use color::{parse_hex_color, Palette, PALETTE_SIZE};
pub use cursor::{Cursor, SavedContext, SavedState};
pub use diagnostics::Diagnostics;
pub use grid::Grid;
pub use modes::{ModeChange, Modes};
pub use screen::Screen;
pub use snapshot::{DumpCursor, DumpDimensions, DumpLine, ScreenDump, Snapshot, StyleSpan};
pub use terminal::Terminal;

/// Terminal dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub cols: usize,
    pub rows: usize,
}

impl Dimensions {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { cols: 80, rows: 24 }
    }
}
