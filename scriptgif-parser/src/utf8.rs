//! UTF-8 decoding for the terminal parser
//!
//! The sequence length comes from the lead byte alone: below 0xE0 it is two
//! bytes, below 0xF0 three, otherwise four.

/// UTF-8 decoder state
#[derive(Debug, Clone, Default)]
pub struct Utf8Decoder {
    /// Bytes accumulated for current character
    buffer: [u8; 4],
    /// Number of bytes in buffer
    len: usize,
    /// Expected total bytes for current character
    expected: usize,
}

/// Result of feeding a byte to the decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utf8Result {
    /// Need more bytes
    Pending,
    /// Successfully decoded a character
    Char(char),
    /// Invalid sequence, caller substitutes the replacement character
    Invalid,
}

impl Utf8Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the decoder state
    pub fn reset(&mut self) {
        self.len = 0;
        self.expected = 0;
    }

    /// Check if decoder is in the middle of a sequence
    pub fn is_pending(&self) -> bool {
        self.len > 0
    }

    /// Sequence length announced by a lead byte
    pub fn sequence_len(lead: u8) -> usize {
        if lead < 0xE0 {
            2
        } else if lead < 0xF0 {
            3
        } else {
            4
        }
    }

    /// Start a new sequence with a lead byte (>= 0xC0)
    pub fn start(&mut self, lead: u8) {
        self.buffer[0] = lead;
        self.len = 1;
        self.expected = Self::sequence_len(lead);
    }

    /// Feed a continuation byte.
    ///
    /// A byte outside `0x80..=0xBF` aborts the sequence and returns
    /// `Invalid`; the caller is expected to reprocess that byte.
    pub fn push(&mut self, byte: u8) -> Utf8Result {
        if byte & 0b1100_0000 != 0b1000_0000 {
            self.reset();
            return Utf8Result::Invalid;
        }

        self.buffer[self.len] = byte;
        self.len += 1;

        if self.len < self.expected {
            return Utf8Result::Pending;
        }

        let result = decode(&self.buffer[..self.expected]);
        self.reset();
        result
    }
}

fn decode(bytes: &[u8]) -> Utf8Result {
    if bytes[0] >= 0xF8 {
        return Utf8Result::Invalid;
    }
    let lead_mask = match bytes.len() {
        2 => 0x1F,
        3 => 0x0F,
        _ => 0x07,
    };
    let cp = bytes[1..]
        .iter()
        .fold(u32::from(bytes[0] & lead_mask), |cp, &b| {
            (cp << 6) | u32::from(b & 0x3F)
        });

    // Reject overlong encodings
    let min = match bytes.len() {
        2 => 0x80,
        3 => 0x800,
        _ => 0x10000,
    };
    if cp < min {
        return Utf8Result::Invalid;
    }

    char::from_u32(cp)
        .map(Utf8Result::Char)
        .unwrap_or(Utf8Result::Invalid)
}
