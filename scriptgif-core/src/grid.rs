//! Terminal grid - the visible screen area
//!
//! Cells live in one flat buffer of `rows * cols` entries. Rows are reached
//! through an indirection table mapping each screen row to a physical slot,
//! so scrolling rotates slot numbers instead of copying cells. The table is
//! always a permutation of `0..rows`.

use crate::cell::Cell;
use crate::Dimensions;

/// The terminal grid (visible screen area)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Cell storage, one physical slot of `cols` cells per row
    cells: Vec<Cell>,
    /// Screen row -> physical slot
    lines: Vec<usize>,
    /// Number of columns
    cols: usize,
    /// Number of rows
    rows: usize,
}

impl Grid {
    /// Create a new blank grid with the specified dimensions
    pub fn new(dims: Dimensions) -> Self {
        Self {
            cells: vec![Cell::blank(); dims.rows * dims.cols],
            lines: (0..dims.rows).collect(),
            cols: dims.cols,
            rows: dims.rows,
        }
    }

    /// Get grid dimensions
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            cols: self.cols,
            rows: self.rows,
        }
    }

    /// Get number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn slot_range(&self, row: usize) -> std::ops::Range<usize> {
        let start = self.lines[row] * self.cols;
        start..start + self.cols
    }

    /// Get the cells of a row, returning None if out of bounds
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.cells[self.slot_range(row)])
    }

    /// Get the mutable cells of a row, returning None if out of bounds
    pub fn row_mut(&mut self, row: usize) -> Option<&mut [Cell]> {
        if row >= self.rows {
            return None;
        }
        let range = self.slot_range(row);
        Some(&mut self.cells[range])
    }

    /// Get a cell, returning None if out of bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.row(row)?.get(col)
    }

    /// Get a mutable cell, returning None if out of bounds
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.row_mut(row)?.get_mut(col)
    }

    /// Iterate over rows top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.lines.iter().map(move |&slot| {
            let start = slot * self.cols;
            &self.cells[start..start + self.cols]
        })
    }

    /// Physical slot order, top to bottom
    pub fn slots(&self) -> &[usize] {
        &self.lines
    }

    /// Blank every cell and restore the identity row mapping
    pub fn clear(&mut self) {
        self.cells.fill(Cell::blank());
        for (row, slot) in self.lines.iter_mut().enumerate() {
            *slot = row;
        }
    }

    /// Blank a column range of one row; the range is clipped to the row
    pub fn clear_span(&mut self, row: usize, start: usize, end: usize) {
        let cols = self.cols;
        if let Some(cells) = self.row_mut(row) {
            let end = end.min(cols);
            if start < end {
                cells[start..end].fill(Cell::blank());
            }
        }
    }

    /// Scroll up: move lines up, add blank line at bottom.
    /// Only scrolls within the region `top..=bottom`.
    pub fn scroll_up(&mut self, top: usize, bottom: usize) {
        if top > bottom || bottom >= self.rows {
            return;
        }
        self.lines[top..=bottom].rotate_left(1);
        self.clear_span(bottom, 0, self.cols);
    }

    /// Scroll down: move lines down, add blank line at top.
    /// Only scrolls within the region `top..=bottom`.
    pub fn scroll_down(&mut self, top: usize, bottom: usize) {
        if top > bottom || bottom >= self.rows {
            return;
        }
        self.lines[top..=bottom].rotate_right(1);
        self.clear_span(top, 0, self.cols);
    }

    /// Get text content of a row with trailing blanks kept
    pub fn row_text(&self, row: usize) -> String {
        self.row(row)
            .map(|cells| cells.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }
}
