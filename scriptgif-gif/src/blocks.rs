//! GIF89a block framing
//!
//! Header, extension and descriptor writers, plus the sub-block writer
//! that chops compressed data into length-prefixed chunks.

use std::io::{self, Write};

use crate::frame::Rect;
use crate::COLOR_TABLE_LEN;

/// Largest payload of a single data sub-block
pub const SUB_BLOCK_LEN: usize = 0xFF;

/// Global color table present, 8 bits of color resolution, 16 entries
const SCREEN_FLAGS: u8 = 0xF3;

fn write_u16<W: Write>(out: &mut W, value: u16) -> io::Result<()> {
    out.write_all(&value.to_le_bytes())
}

/// Signature, logical screen descriptor and global color table
pub fn write_header<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    palette: &[u8; COLOR_TABLE_LEN],
) -> io::Result<()> {
    out.write_all(b"GIF89a")?;
    write_u16(out, width)?;
    write_u16(out, height)?;
    // Flags, background color index, pixel aspect ratio
    out.write_all(&[SCREEN_FLAGS, 0x00, 0x00])?;
    out.write_all(palette)
}

/// NETSCAPE2.0 application extension. A count of 0 loops forever.
pub fn write_loop<W: Write>(out: &mut W, count: u16) -> io::Result<()> {
    out.write_all(&[b'!', 0xFF, 0x0B])?;
    out.write_all(b"NETSCAPE2.0")?;
    out.write_all(&[0x03, 0x01])?;
    write_u16(out, count)?;
    out.write_all(&[0x00])
}

/// Graphic control extension carrying a delay in hundredths of a second.
/// Disposal is "do not dispose" so later frames draw over earlier ones.
pub fn write_graphic_control<W: Write>(out: &mut W, delay: u16) -> io::Result<()> {
    out.write_all(&[b'!', 0xF9, 0x04, 0x04])?;
    write_u16(out, delay)?;
    // Transparent color index, block terminator
    out.write_all(&[0x00, 0x00])
}

/// Image descriptor without a local color table
pub fn write_image_descriptor<W: Write>(out: &mut W, rect: Rect) -> io::Result<()> {
    out.write_all(b",")?;
    write_u16(out, rect.x)?;
    write_u16(out, rect.y)?;
    write_u16(out, rect.width)?;
    write_u16(out, rect.height)?;
    out.write_all(&[0x00])
}

pub fn write_trailer<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b";")
}

/// Buffers bytes and emits them as sub-blocks of at most 255 bytes
pub struct SubBlockWriter<'a, W: Write> {
    out: &'a mut W,
    buf: [u8; SUB_BLOCK_LEN],
    len: usize,
}

impl<'a, W: Write> SubBlockWriter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            buf: [0; SUB_BLOCK_LEN],
            len: 0,
        }
    }

    pub fn push(&mut self, byte: u8) -> io::Result<()> {
        self.buf[self.len] = byte;
        self.len += 1;
        if self.len == SUB_BLOCK_LEN {
            self.flush_block()?;
        }
        Ok(())
    }

    fn flush_block(&mut self) -> io::Result<()> {
        if self.len > 0 {
            self.out.write_all(&[self.len as u8])?;
            self.out.write_all(&self.buf[..self.len])?;
            self.len = 0;
        }
        Ok(())
    }

    /// Write any partial block followed by the zero-length terminator
    pub fn finish(mut self) -> io::Result<()> {
        self.flush_block()?;
        self.out.write_all(&[0x00])
    }
}
