//! 16-color palette
//!
//! Indices 0-7 are the standard ANSI colors, 8-15 their bright variants.
//! The renderer reaches the bright half through the bold and blink
//! attributes.

use serde::{Deserialize, Serialize};

/// Number of palette entries addressable by a 4-bit index
pub const PALETTE_SIZE: usize = 16;

/// Palette of RGB triples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: [[u8; 3]; PALETTE_SIZE],
}

impl Palette {
    /// Standard ANSI color indices
    pub const BLACK: u8 = 0;
    pub const RED: u8 = 1;
    pub const GREEN: u8 = 2;
    pub const YELLOW: u8 = 3;
    pub const BLUE: u8 = 4;
    pub const MAGENTA: u8 = 5;
    pub const CYAN: u8 = 6;
    pub const WHITE: u8 = 7;

    /// Bright offset applied by bold (foreground) and blink (background)
    pub const BRIGHT: u8 = 8;

    /// Create a palette from explicit colors
    pub const fn new(colors: [[u8; 3]; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// RGB triple for a palette index (only the low 4 bits are used)
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.colors[usize::from(index & 0x0F)]
    }

    /// Replace one entry
    pub fn set(&mut self, index: u8, rgb: [u8; 3]) {
        self.colors[usize::from(index & 0x0F)] = rgb;
    }

    /// All entries in index order
    pub fn colors(&self) -> &[[u8; 3]; PALETTE_SIZE] {
        &self.colors
    }

    /// Flattened RGB bytes, laid out as a GIF global color table
    pub fn to_bytes(&self) -> [u8; PALETTE_SIZE * 3] {
        let mut bytes = [0u8; PALETTE_SIZE * 3];
        for (chunk, rgb) in bytes.chunks_exact_mut(3).zip(self.colors.iter()) {
            chunk.copy_from_slice(rgb);
        }
        bytes
    }
}

impl Default for Palette {
    /// xterm's default 16 colors
    fn default() -> Self {
        Self::new([
            [0, 0, 0],       // Black
            [205, 0, 0],     // Red
            [0, 205, 0],     // Green
            [205, 205, 0],   // Yellow
            [0, 0, 238],     // Blue
            [205, 0, 205],   // Magenta
            [0, 205, 205],   // Cyan
            [229, 229, 229], // White
            [127, 127, 127], // Bright Black (Gray)
            [255, 0, 0],     // Bright Red
            [0, 255, 0],     // Bright Green
            [255, 255, 0],   // Bright Yellow
            [92, 92, 255],   // Bright Blue
            [255, 0, 255],   // Bright Magenta
            [0, 255, 255],   // Bright Cyan
            [255, 255, 255], // Bright White
        ])
    }
}

/// Parse a `#rrggbb` color
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
