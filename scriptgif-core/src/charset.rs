//! Character set handling for terminal emulation
//!
//! Two slots (G0/G1) each hold one of three sets. The Unicode set decodes
//! UTF-8; the two legacy sets translate single bytes through fixed tables.

/// Character set designations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// UTF-8 decoded text (`ESC ( B`)
    #[default]
    Unicode,
    /// DEC Special Graphics, line drawing (`ESC ( 0`)
    VtGraphics,
    /// IBM PC code page 437 (`ESC ( U`)
    Cp437,
}

impl Charset {
    /// Charset selected by the final byte of a G0/G1 designation
    pub fn from_designator(byte: u8) -> Option<Self> {
        match byte {
            b'B' => Some(Charset::Unicode),
            b'0' => Some(Charset::VtGraphics),
            b'U' => Some(Charset::Cp437),
            _ => None,
        }
    }

    /// Translate a raw byte through a legacy table.
    ///
    /// The Unicode set never reaches here through the parser; bytes are
    /// mapped as Latin-1 for it.
    pub fn translate(self, byte: u8) -> char {
        match self {
            Charset::Unicode => char::from(byte),
            Charset::VtGraphics => translate_vt_graphics(byte),
            Charset::Cp437 => CP437[usize::from(byte)],
        }
    }
}

/// Character set state for the G0/G1 slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetState {
    /// Designated sets, G0 and G1
    pub slots: [Charset; 2],
    /// Currently active slot (0=G0, 1=G1)
    pub active: usize,
}

impl Default for CharsetState {
    fn default() -> Self {
        Self {
            slots: [Charset::Unicode, Charset::VtGraphics],
            active: 0,
        }
    }
}

impl CharsetState {
    /// Create new charset state with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently active charset
    pub fn current(&self) -> Charset {
        self.slots[self.active]
    }

    /// Set charset for a slot
    pub fn designate(&mut self, slot: usize, charset: Charset) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = charset;
        }
    }

    /// Replace the charset in the active slot
    pub fn set_current(&mut self, charset: Charset) {
        self.slots[self.active] = charset;
    }

    /// Shift In (SI) - select G0
    pub fn shift_in(&mut self) {
        self.active = 0;
    }

    /// Shift Out (SO) - select G1
    pub fn shift_out(&mut self) {
        self.active = 1;
    }
}

/// Translate DEC Special Graphics characters.
/// Maps 0x5F-0x7E to line drawing and other special characters.
fn translate_vt_graphics(byte: u8) -> char {
    match byte {
        b'_' => '\u{00A0}', // Blank
        b'`' => '◆',        // Diamond
        b'a' => '▒',        // Checkerboard
        b'b' => '␉',        // HT symbol
        b'c' => '␌',        // FF symbol
        b'd' => '␍',        // CR symbol
        b'e' => '␊',        // LF symbol
        b'f' => '°',        // Degree symbol
        b'g' => '±',        // Plus/minus
        b'h' => '␤',        // NL symbol
        b'i' => '␋',        // VT symbol
        b'j' => '┘',        // Lower right corner
        b'k' => '┐',        // Upper right corner
        b'l' => '┌',        // Upper left corner
        b'm' => '└',        // Lower left corner
        b'n' => '┼',        // Crossing lines
        b'o' => '⎺',        // Scan line 1
        b'p' => '⎻',        // Scan line 3
        b'q' => '─',        // Horizontal line (scan line 5)
        b'r' => '⎼',        // Scan line 7
        b's' => '⎽',        // Scan line 9
        b't' => '├',        // Left tee
        b'u' => '┤',        // Right tee
        b'v' => '┴',        // Bottom tee
        b'w' => '┬',        // Top tee
        b'x' => '│',        // Vertical line
        b'y' => '≤',        // Less than or equal
        b'z' => '≥',        // Greater than or equal
        b'{' => 'π',        // Pi
        b'|' => '≠',        // Not equal
        b'}' => '£',        // Pound sterling
        b'~' => '·',        // Centered dot
        _ => char::from(byte),
    }
}

/// Code page 437, full 256 entries
#[rustfmt::skip]
static CP437: [char; 256] = [
    ' ', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼',
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
    ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
    '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '{', '|', '}', '~', '⌂',
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}',
];
