//! Bitmap fonts in MBF format
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! "MBF" 0x01
//! glyph_count: u16, width: u8, height: u8, range_count: u16
//! range_count x { offset: u16, length: u16 }   ascending code points
//! glyph_count x height x stride bytes          stride = ceil(width / 8)
//! ```
//!
//! Glyph rows are packed most-significant bit first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

const SIGNATURE: &[u8; 4] = b"MBF\x01";
const HEADER_LEN: usize = 6;
const RANGE_LEN: usize = 4;

/// Code points tried, in order, when a character has no glyph
const FALLBACKS: [u32; 4] = [0xFFFD, b'?' as u32, b' ' as u32, 0];

/// Font loading errors
#[derive(Error, Debug)]
pub enum FontError {
    #[error("could not read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not an MBF font (bad signature)")]
    BadSignature,

    #[error("font is truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("font has zero-sized glyphs ({width}x{height})")]
    EmptyGlyphs { width: u8, height: u8 },
}

/// A contiguous run of code points with glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub offset: u16,
    pub length: u16,
}

/// Fixed-size bitmap font
#[derive(Debug, Clone)]
pub struct Font {
    width: u8,
    height: u8,
    stride: usize,
    glyph_count: usize,
    ranges: Vec<Range>,
    data: Vec<u8>,
}

fn le16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

impl Font {
    /// Load a font file
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let bytes = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Self::from_bytes(&bytes)?;
        log::info!(
            "Loaded font {}: {} glyphs, {}x{}",
            path.display(),
            font.glyph_count,
            font.width,
            font.height
        );
        Ok(font)
    }

    /// Parse a font from memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontError> {
        let check_len = |expected: usize| {
            if bytes.len() < expected {
                Err(FontError::Truncated {
                    expected,
                    found: bytes.len(),
                })
            } else {
                Ok(())
            }
        };

        check_len(SIGNATURE.len())?;
        if &bytes[..SIGNATURE.len()] != SIGNATURE {
            return Err(FontError::BadSignature);
        }

        let header = SIGNATURE.len();
        check_len(header + HEADER_LEN)?;
        let glyph_count = usize::from(le16(bytes, header));
        let width = bytes[header + 2];
        let height = bytes[header + 3];
        let range_count = usize::from(le16(bytes, header + 4));
        if width == 0 || height == 0 {
            return Err(FontError::EmptyGlyphs { width, height });
        }

        let stride = usize::from(width).div_ceil(8);
        let ranges_start = header + HEADER_LEN;
        let data_start = ranges_start + range_count * RANGE_LEN;
        let data_len = glyph_count * usize::from(height) * stride;
        check_len(data_start + data_len)?;

        let ranges = bytes[ranges_start..data_start]
            .chunks_exact(RANGE_LEN)
            .map(|chunk| Range {
                offset: le16(chunk, 0),
                length: le16(chunk, 2),
            })
            .collect();

        Ok(Self {
            width,
            height,
            stride,
            glyph_count,
            ranges,
            data: bytes[data_start..data_start + data_len].to_vec(),
        })
    }

    /// Glyph width in pixels
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    /// Glyph height in pixels
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyph_count
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Glyph index for a code point, without fallback
    pub fn search(&self, code: u32) -> Option<usize> {
        let mut index = 0usize;
        for range in &self.ranges {
            let start = u32::from(range.offset);
            if code < start {
                return None;
            }
            if code < start + u32::from(range.length) {
                let found = index + (code - start) as usize;
                return (found < self.glyph_count).then_some(found);
            }
            index += usize::from(range.length);
        }
        None
    }

    /// Glyph index for a character, trying the replacement character,
    /// `?`, space and NUL in turn
    pub fn index_of(&self, c: char) -> Option<usize> {
        std::iter::once(u32::from(c))
            .chain(FALLBACKS)
            .find_map(|code| self.search(code))
    }

    /// Rows of a glyph, `stride` bytes each
    pub fn glyph(&self, index: usize) -> impl Iterator<Item = &[u8]> {
        let size = self.stride * usize::from(self.height);
        let start = (index * size).min(self.data.len());
        let end = (start + size).min(self.data.len());
        self.data[start..end].chunks(self.stride)
    }

    /// Whether pixel `x` of a glyph row is set
    pub fn pixel(row: &[u8], x: usize) -> bool {
        row.get(x >> 3)
            .is_some_and(|byte| byte & (0x80 >> (x & 7)) != 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an MBF image: one glyph per range entry, each filled by `paint`
    pub(crate) fn build_font(
        width: u8,
        height: u8,
        ranges: &[(u16, u16)],
        paint: impl Fn(usize, usize, usize) -> bool,
    ) -> Vec<u8> {
        let stride = usize::from(width).div_ceil(8);
        let glyph_count: u16 = ranges.iter().map(|&(_, len)| len).sum();

        let mut bytes = SIGNATURE.to_vec();
        bytes.extend(glyph_count.to_le_bytes());
        bytes.extend([width, height]);
        bytes.extend((ranges.len() as u16).to_le_bytes());
        for &(offset, length) in ranges {
            bytes.extend(offset.to_le_bytes());
            bytes.extend(length.to_le_bytes());
        }
        for glyph in 0..usize::from(glyph_count) {
            for y in 0..usize::from(height) {
                let mut row = vec![0u8; stride];
                for x in 0..usize::from(width) {
                    if paint(glyph, x, y) {
                        row[x >> 3] |= 0x80 >> (x & 7);
                    }
                }
                bytes.extend(row);
            }
        }
        bytes
    }

    #[test]
    fn test_parse_header_and_ranges() {
        let bytes = build_font(6, 10, &[(0x20, 95), (0x2500, 2)], |_, _, _| false);
        let font = Font::from_bytes(&bytes).unwrap();

        assert_eq!(font.width(), 6);
        assert_eq!(font.height(), 10);
        assert_eq!(font.glyph_count(), 97);
        assert_eq!(font.ranges().len(), 2);
    }

    #[test]
    fn test_search_walks_ranges() {
        let bytes = build_font(8, 8, &[(0x20, 95), (0x2500, 2)], |_, _, _| false);
        let font = Font::from_bytes(&bytes).unwrap();

        assert_eq!(font.search(0x20), Some(0));
        assert_eq!(font.search(u32::from('A')), Some(0x21));
        assert_eq!(font.search(0x2501), Some(96));
        assert_eq!(font.search(0x1F), None);
        assert_eq!(font.search(0x2000), None);
        assert_eq!(font.search(0x1F600), None);
    }

    #[test]
    fn test_fallback_chain() {
        let with_question = build_font(8, 8, &[(0x3F, 1)], |_, _, _| false);
        let font = Font::from_bytes(&with_question).unwrap();
        assert_eq!(font.index_of('€'), Some(0));

        let with_replacement = build_font(8, 8, &[(0x3F, 1), (0xFFFD, 1)], |_, _, _| false);
        let font = Font::from_bytes(&with_replacement).unwrap();
        assert_eq!(font.index_of('€'), Some(1));

        let nothing = build_font(8, 8, &[(0x41, 1)], |_, _, _| false);
        let font = Font::from_bytes(&nothing).unwrap();
        assert_eq!(font.index_of('€'), None);
    }

    #[test]
    fn test_glyph_bits_msb_first() {
        let bytes = build_font(10, 2, &[(0x41, 1)], |_, x, y| x == 0 || (y == 1 && x == 9));
        let font = Font::from_bytes(&bytes).unwrap();

        let rows: Vec<&[u8]> = font.glyph(0).collect();
        assert_eq!(rows, vec![&[0x80, 0x00][..], &[0x80, 0x40][..]]);
        assert!(Font::pixel(rows[1], 9));
        assert!(!Font::pixel(rows[1], 8));
    }

    #[test]
    fn test_bad_signature() {
        assert!(matches!(
            Font::from_bytes(b"BDF\x01\0\0\0\0\0\0"),
            Err(FontError::BadSignature)
        ));
    }

    #[test]
    fn test_truncated() {
        let mut bytes = build_font(8, 8, &[(0x20, 4)], |_, _, _| true);
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            Font::from_bytes(&bytes),
            Err(FontError::Truncated { .. })
        ));
        assert!(matches!(
            Font::from_bytes(b"MBF"),
            Err(FontError::Truncated { .. })
        ));
    }
}
