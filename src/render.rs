//! Rasterizes the screen into palette-indexed pixels
//!
//! Each cell becomes a `font.width() x font.height()` block. Set glyph
//! bits take the foreground index of the cell's effective color pair,
//! clear bits the background index.

use scriptgif_core::{Attrs, ColorPair, Palette, Snapshot};

use crate::font::Font;

/// Foreground forced for dim and underlined text
const DIM_FG: u8 = Palette::CYAN;
/// Foreground forced for italic and crossed-out text
const ITALIC_FG: u8 = Palette::GREEN;

/// Colors a cell is drawn with once modes and attributes are applied
pub fn effective_pair(snapshot: &Snapshot<'_>, row: usize, col: usize) -> ColorPair {
    let Some(cell) = snapshot.cell(row, col) else {
        return ColorPair::default();
    };
    let modes = snapshot.modes();
    let cursor = snapshot.cursor();

    let mut inverse = modes.reverse_video;
    if modes.cursor_visible && cursor.row == row && cursor.col == col {
        inverse = !inverse;
    }
    if cell.attrs.contains(Attrs::INVERSE) {
        inverse = !inverse;
    }

    let pair = if inverse {
        cell.pair.swapped()
    } else {
        cell.pair
    };
    let mut fg = pair.fg();
    let mut bg = pair.bg();

    if cell.attrs.intersects(Attrs::DIM | Attrs::UNDERLINE) {
        fg = DIM_FG;
    } else if cell.attrs.intersects(Attrs::ITALIC | Attrs::CROSSED) {
        fg = ITALIC_FG;
    }
    if cell.attrs.contains(Attrs::BOLD) {
        fg |= Palette::BRIGHT;
    }
    if cell.attrs.contains(Attrs::BLINK) {
        bg |= Palette::BRIGHT;
    }
    if cell.attrs.contains(Attrs::INVISIBLE) {
        fg = bg;
    }

    ColorPair::new(fg, bg)
}

/// Draws screen snapshots into a pixel buffer
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    font: &'a Font,
}

impl<'a> Renderer<'a> {
    pub fn new(font: &'a Font) -> Self {
        Self { font }
    }

    /// Canvas size in pixels for a grid of `cols x rows` cells
    pub fn canvas_size(&self, cols: usize, rows: usize) -> (usize, usize) {
        (cols * self.font.width(), rows * self.font.height())
    }

    /// Draw every cell. `pixels` is row-major with `canvas_width` pixels
    /// per row and must hold the whole grid.
    pub fn render(&self, snapshot: &Snapshot<'_>, pixels: &mut [u8], canvas_width: usize) {
        for row in 0..snapshot.rows() {
            for col in 0..snapshot.cols() {
                let ch = snapshot.cell(row, col).map_or(' ', |cell| cell.ch);
                let pair = effective_pair(snapshot, row, col);
                self.draw_char(pixels, canvas_width, ch, pair, row, col);
            }
        }
    }

    fn draw_char(
        &self,
        pixels: &mut [u8],
        canvas_width: usize,
        ch: char,
        pair: ColorPair,
        row: usize,
        col: usize,
    ) {
        // No glyph and no fallback: the cell keeps whatever was there
        let Some(index) = self.font.index_of(ch) else {
            return;
        };

        let width = self.font.width();
        let x0 = col * width;
        let y0 = row * self.font.height();
        for (dy, bits) in self.font.glyph(index).enumerate() {
            let start = (y0 + dy) * canvas_width + x0;
            let Some(line) = pixels.get_mut(start..start + width) else {
                return;
            };
            for (x, pixel) in line.iter_mut().enumerate() {
                *pixel = if Font::pixel(bits, x) {
                    pair.fg()
                } else {
                    pair.bg()
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::tests::build_font;
    use scriptgif_core::{Diagnostics, Dimensions, Terminal};

    fn term(input: &[u8]) -> Terminal {
        let mut term = Terminal::new(Dimensions::new(4, 2), Diagnostics::quiet());
        term.set_cursor_visible(false);
        term.feed_bytes(input);
        term
    }

    #[test]
    fn test_plain_cell_uses_stored_pair() {
        let term = term(b"\x1b[31;44mA");
        let pair = effective_pair(&term.snapshot(), 0, 0);
        assert_eq!(pair, ColorPair::new(1, 4));
    }

    #[test]
    fn test_inverse_swaps_and_cursor_toggles() {
        let mut term = term(b"\x1b[7mA\x1b[mB");
        assert_eq!(effective_pair(&term.snapshot(), 0, 0), ColorPair::new(0, 7));
        assert_eq!(effective_pair(&term.snapshot(), 0, 1), ColorPair::new(7, 0));

        // The cursor sits on (0, 2)
        term.set_cursor_visible(true);
        assert_eq!(effective_pair(&term.snapshot(), 0, 2), ColorPair::new(0, 7));

        // Reverse video flips everything, the cursor flips back
        term.feed_bytes(b"\x1b[?5h");
        assert_eq!(effective_pair(&term.snapshot(), 0, 2), ColorPair::new(7, 0));
        assert_eq!(effective_pair(&term.snapshot(), 1, 0), ColorPair::new(0, 7));
    }

    #[test]
    fn test_attribute_color_overrides() {
        let term = term(b"\x1b[2mA\x1b[0;3mB\x1b[0;1;4mC\x1b[0;5mD");
        let snapshot = term.snapshot();
        assert_eq!(effective_pair(&snapshot, 0, 0).fg(), Palette::CYAN);
        assert_eq!(effective_pair(&snapshot, 0, 1).fg(), Palette::GREEN);
        assert_eq!(
            effective_pair(&snapshot, 0, 2).fg(),
            Palette::CYAN | Palette::BRIGHT
        );
        assert_eq!(effective_pair(&snapshot, 0, 3).bg(), Palette::BRIGHT);
    }

    #[test]
    fn test_render_glyph_bits() {
        // 'A' is a 2x2 checkerboard, space is empty
        let bytes = build_font(2, 2, &[(0x20, 1), (0x41, 1)], |glyph, x, y| {
            glyph == 1 && (x + y) % 2 == 0
        });
        let font = Font::from_bytes(&bytes).unwrap_or_else(|e| panic!("{}", e));
        let renderer = Renderer::new(&font);
        let term = term(b"\x1b[32;41mA");

        let (width, height) = renderer.canvas_size(4, 2);
        assert_eq!((width, height), (8, 4));
        let mut pixels = vec![0xFF; width * height];
        renderer.render(&term.snapshot(), &mut pixels, width);

        assert_eq!(&pixels[0..4], &[2, 1, 0, 0]);
        assert_eq!(&pixels[8..12], &[1, 2, 0, 0]);
        assert!(pixels.iter().all(|&p| p < 16));
    }

    #[test]
    fn test_missing_glyph_leaves_pixels() {
        let bytes = build_font(1, 1, &[(0x41, 1)], |_, _, _| true);
        let font = Font::from_bytes(&bytes).unwrap_or_else(|e| panic!("{}", e));
        let renderer = Renderer::new(&font);
        let term = term(b"A");

        let mut pixels = vec![9u8; 8];
        renderer.render(&term.snapshot(), &mut pixels, 4);
        assert_eq!(pixels, vec![7, 9, 9, 9, 9, 9, 9, 9]);
    }
}
