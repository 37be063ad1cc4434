//! Terminal screen - the state the emulator mutates
//!
//! The Screen ties together the grid, cursor, scroll region, modes,
//! current rendition and charsets. Every operation that would move the
//! cursor or touch a cell outside `[0, rows) x [0, cols]` is dropped and
//! reported through the diagnostics context; nothing here panics on input.

use scriptgif_parser::InputMode;

use crate::cell::{Attrs, Cell, ColorPair};
use crate::charset::{Charset, CharsetState};
use crate::color::Palette;
use crate::cursor::{Cursor, SavedContext, SavedState};
use crate::diagnostics::Diagnostics;
use crate::grid::Grid;
use crate::modes::{ModeChange, Modes};
use crate::Dimensions;

/// The complete terminal screen state
#[derive(Debug, Clone)]
pub struct Screen {
    /// Cell grid
    grid: Grid,
    /// Cursor position
    cursor: Cursor,
    /// Scroll region top, inclusive
    top: usize,
    /// Scroll region bottom, inclusive
    bottom: usize,
    /// Terminal modes
    modes: Modes,
    /// Attributes applied to printed characters
    attrs: Attrs,
    /// Color pair applied to printed characters
    pair: ColorPair,
    /// Character set state
    charsets: CharsetState,
    /// ESC 7 / CSI s save slots
    saved: SavedContext,
    /// Palette in effect
    palette: Palette,
    /// Palette restored on reset
    initial_palette: Palette,
    /// Where notices go
    diag: Diagnostics,
}

impl Screen {
    /// Create a new screen with the specified dimensions.
    ///
    /// Zero dimensions are raised to one so the scroll region stays valid.
    pub fn new(dims: Dimensions, palette: Palette, diag: Diagnostics) -> Self {
        let dims = Dimensions::new(dims.cols.max(1), dims.rows.max(1));
        let mut screen = Self {
            grid: Grid::new(dims),
            cursor: Cursor::default(),
            top: 0,
            bottom: dims.rows - 1,
            modes: Modes::new(),
            attrs: Attrs::empty(),
            pair: ColorPair::default(),
            charsets: CharsetState::default(),
            saved: SavedContext::default(),
            palette,
            initial_palette: palette,
            diag,
        };
        screen.reset();
        screen
    }

    /// Full reset (RIS). Dimensions are kept.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.cursor = Cursor::default();
        self.top = 0;
        self.bottom = self.rows() - 1;
        self.modes.reset();
        self.attrs = Attrs::empty();
        self.pair = ColorPair::default();
        self.charsets = CharsetState::default();
        self.palette = self.initial_palette;
        self.save_cursor();
        self.save_context();
    }

    /// Get the grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Get number of columns
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Get number of rows
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Get cursor
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Get modes
    pub fn modes(&self) -> &Modes {
        &self.modes
    }

    /// Current attributes
    pub fn attrs(&self) -> Attrs {
        self.attrs
    }

    /// Current color pair
    pub fn pair(&self) -> ColorPair {
        self.pair
    }

    /// Get scroll region (top, bottom), inclusive
    pub fn scroll_region(&self) -> (usize, usize) {
        (self.top, self.bottom)
    }

    /// Character set state
    pub fn charsets(&self) -> &CharsetState {
        &self.charsets
    }

    /// Palette in effect
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Diagnostics context
    pub fn diagnostics(&self) -> Diagnostics {
        self.diag
    }

    /// How the parser should read the next byte
    pub fn input_mode(&self) -> InputMode {
        InputMode {
            unicode: self.charsets.current() == Charset::Unicode,
            literal_controls: self.modes.display_controls,
        }
    }

    /// Show or hide the cursor (DECTCEM)
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.modes.cursor_visible = visible;
    }

    fn within_bounds(&self, op: &str, row: i64, col: i64) -> bool {
        let (rows, cols) = (self.rows(), self.cols());
        if row < 0 || row >= rows as i64 || col < 0 || col > cols as i64 {
            self.diag.out_of_bounds(op, row, col, rows, cols);
            false
        } else {
            true
        }
    }

    /// Move the cursor if the target is valid
    fn goto(&mut self, op: &str, row: i64, col: i64) {
        if self.within_bounds(op, row, col) {
            self.cursor = Cursor::new(row as usize, col as usize);
        }
    }

    /// Advance one row, scrolling at the bottom margin
    fn advance_row(&mut self, op: &str) {
        if self.cursor.row == self.bottom {
            self.grid.scroll_up(self.top, self.bottom);
        } else if self.within_bounds(op, self.cursor.row as i64 + 1, self.cursor.col as i64) {
            self.cursor.row += 1;
        }
    }

    /// Print a character at the cursor position
    pub fn print(&mut self, c: char) {
        let cols = self.cols();
        if self.cursor.col >= cols {
            if self.modes.auto_wrap {
                self.cursor.col = 0;
                self.advance_row("wrap");
            } else {
                self.cursor.col = cols - 1;
            }
        }

        let (row, col) = (self.cursor.row, self.cursor.col);
        if !self.within_bounds("print", row as i64, col as i64) {
            return;
        }

        let cell = Cell::new(c, self.attrs, self.pair);
        let insert = self.modes.insert_mode;
        if let Some(cells) = self.grid.row_mut(row) {
            if insert {
                cells[col..].rotate_right(1);
            }
            cells[col] = cell;
        }
        self.cursor.col += 1;
    }

    /// Print a byte through the active legacy charset
    pub fn print_graphic(&mut self, byte: u8) {
        let c = self.charsets.current().translate(byte);
        self.print(c);
    }

    /// Backspace (BS)
    pub fn backspace(&mut self) {
        self.cursor.col = self.cursor.col.saturating_sub(1);
    }

    /// Carriage return (CR)
    pub fn carriage_return(&mut self) {
        self.cursor.carriage_return();
    }

    /// Line feed (LF, VT, FF)
    pub fn linefeed(&mut self) {
        self.advance_row("linefeed");
        if self.modes.linefeed_mode {
            self.cursor.carriage_return();
        }
    }

    /// Index (IND) - move down, scroll at the bottom margin
    pub fn index(&mut self) {
        self.advance_row("index");
    }

    /// Next line (NEL) - index then carriage return
    pub fn next_line(&mut self) {
        self.advance_row("next line");
        self.cursor.carriage_return();
    }

    /// Reverse index (RI) - move up, scroll at the top margin
    pub fn reverse_index(&mut self) {
        if self.cursor.row == self.top {
            self.grid.scroll_down(self.top, self.bottom);
        } else {
            let (row, col) = (self.cursor.row as i64 - 1, self.cursor.col as i64);
            self.goto("reverse index", row, col);
        }
    }

    /// Shift Out (SO) - select G1
    pub fn shift_out(&mut self) {
        self.charsets.shift_out();
    }

    /// Shift In (SI) - select G0
    pub fn shift_in(&mut self) {
        self.charsets.shift_in();
    }

    /// Designate a charset into G0 or G1 from its final byte
    pub fn designate_charset(&mut self, slot: usize, designator: u8) {
        match Charset::from_designator(designator) {
            Some(charset) => self.charsets.designate(slot, charset),
            None if designator == b'K' => self
                .diag
                .not_implemented(format_args!("user-defined charset mapping")),
            None => self.diag.unsupported(format_args!(
                "charset designator {:?} for G{}",
                designator as char, slot
            )),
        }
    }

    /// Relative cursor move (CUU, CUD, CUF, CUB)
    pub fn move_cursor_by(&mut self, rows: i64, cols: i64) {
        let row = self.cursor.row as i64 + rows;
        let col = self.cursor.col as i64 + cols;
        self.goto("cursor move", row, col);
    }

    /// Move `rows` lines and to column 0 (CNL, CPL)
    pub fn move_cursor_lines(&mut self, rows: i64) {
        let row = self.cursor.row as i64 + rows;
        self.goto("cursor line move", row, 0);
    }

    /// Set cursor column, 0-indexed (CHA, HPA)
    pub fn set_cursor_col(&mut self, col: usize) {
        let row = self.cursor.row as i64;
        self.goto("column position", row, col as i64);
    }

    /// Set cursor row, 0-indexed (VPA)
    pub fn set_cursor_row(&mut self, row: usize) {
        let col = self.cursor.col as i64;
        self.goto("row position", row as i64, col);
    }

    /// Absolute position, 0-indexed (CUP, HVP).
    /// In origin mode the row is relative to the scroll region top.
    pub fn move_cursor_to(&mut self, row: usize, col: usize) {
        let offset = if self.modes.origin_mode { self.top } else { 0 };
        self.goto("cursor position", (row + offset) as i64, col as i64);
    }

    /// Erase in display (ED). Erased cells use the default rendition.
    pub fn erase_display(&mut self, mode: u16) {
        let Cursor { row, col } = self.cursor;
        let (rows, cols) = (self.rows(), self.cols());
        match mode {
            0 => {
                self.grid.clear_span(row, col, cols);
                for r in row + 1..rows {
                    self.grid.clear_span(r, 0, cols);
                }
            }
            1 => {
                for r in 0..row {
                    self.grid.clear_span(r, 0, cols);
                }
                self.grid.clear_span(row, 0, col + 1);
            }
            2 => {
                for r in 0..rows {
                    self.grid.clear_span(r, 0, cols);
                }
            }
            _ => self.diag.unsupported(format_args!("erase display mode {}", mode)),
        }
    }

    /// Erase in line (EL). Erased cells use the default rendition.
    pub fn erase_line(&mut self, mode: u16) {
        let Cursor { row, col } = self.cursor;
        let cols = self.cols();
        match mode {
            0 => self.grid.clear_span(row, col, cols),
            1 => self.grid.clear_span(row, 0, col + 1),
            2 => self.grid.clear_span(row, 0, cols),
            _ => self.diag.unsupported(format_args!("erase line mode {}", mode)),
        }
    }

    /// Erase characters (ECH) - blank `n` cells from the cursor, no shift
    pub fn erase_chars(&mut self, n: usize) {
        let Cursor { row, col } = self.cursor;
        self.grid.clear_span(row, col, col.saturating_add(n));
    }

    /// Delete characters (DCH) - shift the rest of the row left.
    ///
    /// The vacated tail takes the last column's rendition with an empty
    /// character.
    pub fn delete_chars(&mut self, n: usize) {
        let Cursor { row, col } = self.cursor;
        let cols = self.cols();
        if col >= cols {
            return;
        }
        let n = n.min(cols - col);
        if let Some(cells) = self.grid.row_mut(row) {
            let fill = Cell {
                ch: Cell::EMPTY,
                ..cells[cols - 1]
            };
            cells[col..].rotate_left(n);
            cells[cols - n..].fill(fill);
        }
    }

    /// Insert lines (IL) at the cursor row, within the scroll region
    pub fn insert_lines(&mut self, n: usize) {
        let row = self.cursor.row;
        if row < self.top || row > self.bottom {
            return;
        }
        for _ in 0..n.min(self.bottom - row + 1) {
            self.grid.scroll_down(row, self.bottom);
        }
    }

    /// Delete lines (DL) at the cursor row, within the scroll region
    pub fn delete_lines(&mut self, n: usize) {
        let row = self.cursor.row;
        if row < self.top || row > self.bottom {
            return;
        }
        for _ in 0..n.min(self.bottom - row + 1) {
            self.grid.scroll_up(row, self.bottom);
        }
    }

    /// Set scroll region (DECSTBM), 0-indexed inclusive bounds.
    ///
    /// An invalid region is rejected. On success the cursor homes to the
    /// region top in origin mode, or to the screen origin otherwise.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        if top > bottom || bottom >= self.rows() {
            self.diag
                .out_of_bounds("scroll region", bottom as i64, 0, self.rows(), self.cols());
            return;
        }
        self.top = top;
        self.bottom = bottom;
        self.home();
    }

    fn home(&mut self) {
        let row = if self.modes.origin_mode { self.top } else { 0 };
        self.cursor = Cursor::new(row, 0);
    }

    /// Save cursor position (CSI s)
    pub fn save_cursor(&mut self) {
        self.saved.cursor = self.cursor;
    }

    /// Restore cursor position (CSI u)
    pub fn restore_cursor(&mut self) {
        self.cursor = self.saved.cursor;
    }

    /// Save position, rendition, origin mode and charsets (DECSC)
    pub fn save_context(&mut self) {
        self.saved.full = SavedState {
            cursor: self.cursor,
            origin_mode: self.modes.origin_mode,
            attrs: self.attrs,
            pair: self.pair,
            charsets: self.charsets,
        };
    }

    /// Restore what [`Screen::save_context`] saved (DECRC)
    pub fn restore_context(&mut self) {
        let saved = self.saved.full;
        self.cursor = saved.cursor;
        self.modes.origin_mode = saved.origin_mode;
        self.attrs = saved.attrs;
        self.pair = saved.pair;
        self.charsets = saved.charsets;
    }

    /// Saved context, for inspection
    pub fn saved_context(&self) -> &SavedContext {
        &self.saved
    }

    /// Set or reset one ANSI (`private == false`) or DEC private mode
    pub fn set_mode(&mut self, private: bool, number: u16, value: bool) {
        let change = if private {
            self.modes.set_dec_mode(number, value)
        } else {
            self.modes.set_mode(number, value)
        };

        let kind = if private { "DEC" } else { "ANSI" };
        match change {
            ModeChange::Applied => {
                if private && number == 6 {
                    self.home();
                }
            }
            ModeChange::NotImplemented => self
                .diag
                .not_implemented(format_args!("{} mode {}", kind, number)),
            ModeChange::Unknown => self
                .diag
                .unsupported(format_args!("{} mode {}", kind, number)),
        }
    }

    /// Apply one SGR parameter
    pub fn set_graphic_rendition(&mut self, number: u16) {
        match number {
            0 => {
                self.attrs = Attrs::empty();
                self.pair = ColorPair::default();
            }
            1 => self.attrs.insert(Attrs::BOLD),
            2 => self.attrs.insert(Attrs::DIM),
            3 => self.attrs.insert(Attrs::ITALIC),
            4 => self.attrs.insert(Attrs::UNDERLINE),
            5 => self.attrs.insert(Attrs::BLINK),
            7 => self.attrs.insert(Attrs::INVERSE),
            8 => self.attrs.insert(Attrs::INVISIBLE),
            9 => self.attrs.insert(Attrs::CROSSED),
            10 => {
                // Primary font: back to G0 holding Unicode, controls executed
                self.charsets.shift_in();
                self.charsets.set_current(Charset::Unicode);
                self.modes.display_controls = false;
            }
            11 | 12 => {
                // Alternate fonts: IBM PC glyphs, controls displayed
                self.charsets.set_current(Charset::Cp437);
                self.modes.display_controls = true;
            }
            21 => self.attrs.remove(Attrs::BOLD),
            22 => self.attrs.remove(Attrs::DIM),
            23 => self.attrs.remove(Attrs::ITALIC),
            24 => self.attrs.remove(Attrs::UNDERLINE),
            25 => self.attrs.remove(Attrs::BLINK),
            27 => self.attrs.remove(Attrs::INVERSE),
            28 => self.attrs.remove(Attrs::INVISIBLE),
            29 => self.attrs.remove(Attrs::CROSSED),
            30..=37 => self.pair = self.pair.with_fg((number - 30) as u8),
            38 => {
                self.attrs.insert(Attrs::UNDERLINE);
                self.pair = self.pair.with_fg(ColorPair::DEFAULT_FG);
            }
            39 => {
                self.attrs.remove(Attrs::UNDERLINE);
                self.pair = self.pair.with_fg(ColorPair::DEFAULT_FG);
            }
            40..=47 => self.pair = self.pair.with_bg((number - 40) as u8),
            49 => self.pair = self.pair.with_bg(ColorPair::DEFAULT_BG),
            _ => self.diag.unsupported(format_args!("SGR {}", number)),
        }
    }
}
