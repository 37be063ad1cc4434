//! Terminal cell representation
//!
//! Each cell in the terminal grid contains:
//! - A character (full Unicode scalar value)
//! - Display attributes (bold, inverse, etc.)
//! - A color pair: 4-bit foreground and background palette indices

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attrs: u8 {
        /// SGR 1
        const BOLD      = 0x01;
        /// SGR 2
        const DIM       = 0x02;
        /// SGR 3
        const ITALIC    = 0x04;
        /// SGR 4, and SGR 38 as a side effect
        const UNDERLINE = 0x08;
        /// SGR 5
        const BLINK     = 0x10;
        /// SGR 7
        const INVERSE   = 0x20;
        /// SGR 8, rendered with the foreground equal to the background
        const INVISIBLE = 0x40;
        /// SGR 9
        const CROSSED   = 0x80;
    }
}

/// Foreground and background palette indices packed into one byte.
///
/// The high nibble is the foreground, the low nibble the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair(u8);

impl ColorPair {
    /// Default foreground index
    pub const DEFAULT_FG: u8 = 7;
    /// Default background index
    pub const DEFAULT_BG: u8 = 0;

    /// Create a pair from two palette indices (only the low 4 bits are kept)
    pub const fn new(fg: u8, bg: u8) -> Self {
        Self(((fg & 0x0F) << 4) | (bg & 0x0F))
    }

    /// Raw packed byte
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Foreground palette index
    pub const fn fg(self) -> u8 {
        self.0 >> 4
    }

    /// Background palette index
    pub const fn bg(self) -> u8 {
        self.0 & 0x0F
    }

    /// Same pair with a new foreground
    pub const fn with_fg(self, fg: u8) -> Self {
        Self::new(fg, self.bg())
    }

    /// Same pair with a new background
    pub const fn with_bg(self, bg: u8) -> Self {
        Self::new(self.fg(), bg)
    }

    /// Foreground and background exchanged
    pub const fn swapped(self) -> Self {
        Self::new(self.bg(), self.fg())
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FG, Self::DEFAULT_BG)
    }
}

/// A single cell in the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The character stored in this cell
    pub ch: char,
    /// Display attributes
    pub attrs: Attrs,
    /// Palette indices
    pub pair: ColorPair,
}

impl Cell {
    /// Character used for empty cells
    pub const EMPTY: char = ' ';

    /// A blank cell with default attributes and colors
    pub const fn blank() -> Self {
        Self {
            ch: Self::EMPTY,
            attrs: Attrs::empty(),
            pair: ColorPair::new(ColorPair::DEFAULT_FG, ColorPair::DEFAULT_BG),
        }
    }

    /// Create a cell with a character and styling
    pub const fn new(ch: char, attrs: Attrs, pair: ColorPair) -> Self {
        Self { ch, attrs, pair }
    }

    /// Check if this cell is a blank with default styling
    pub fn is_blank(&self) -> bool {
        *self == Self::blank()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}
