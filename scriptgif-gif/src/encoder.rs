//! Streaming GIF encoder
//!
//! The encoder owns the output writer and two pixel buffers. Callers draw
//! into [`GifEncoder::current_mut`], then call [`GifEncoder::add_frame`]
//! with the time the frame stays on screen.

use std::io::Write;

use crate::blocks;
use crate::error::{Error, Result};
use crate::frame::{FrameBuffers, Rect};
use crate::lzw;
use crate::COLOR_TABLE_LEN;

/// What [`GifEncoder::add_frame`] wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing changed and no delay was requested
    Skipped,
    /// Nothing changed: a single pixel was written to carry the delay
    DelayOnly,
    /// The changed region
    Image(Rect),
}

/// GIF89a stream writer
pub struct GifEncoder<W: Write> {
    out: W,
    frames: FrameBuffers,
    images: usize,
}

impl<W: Write> GifEncoder<W> {
    /// Write the header, color table and optional loop extension.
    ///
    /// Width and height must be between 1 and 65535.
    pub fn open(
        mut out: W,
        width: usize,
        height: usize,
        palette: &[u8; COLOR_TABLE_LEN],
        loop_count: Option<u16>,
    ) -> Result<Self> {
        let invalid = || Error::InvalidDimensions { width, height };
        let w = u16::try_from(width).map_err(|_| invalid())?;
        let h = u16::try_from(height).map_err(|_| invalid())?;
        if w == 0 || h == 0 {
            return Err(invalid());
        }

        blocks::write_header(&mut out, w, h, palette)?;
        if let Some(count) = loop_count {
            blocks::write_loop(&mut out, count)?;
        }
        log::debug!("GIF stream opened: {}x{}, loop {:?}", w, h, loop_count);

        Ok(Self {
            out,
            frames: FrameBuffers::new(w, h),
            images: 0,
        })
    }

    pub fn width(&self) -> usize {
        usize::from(self.frames.width())
    }

    pub fn height(&self) -> usize {
        usize::from(self.frames.height())
    }

    /// Drawing surface for the next frame, row-major palette indices.
    ///
    /// After a frame is written this holds the frame before it, so every
    /// pixel must be redrawn.
    pub fn current_mut(&mut self) -> &mut [u8] {
        self.frames.current_mut()
    }

    /// Number of image blocks written so far
    pub fn images_written(&self) -> usize {
        self.images
    }

    /// Append the current buffer as a frame shown for `delay` hundredths
    /// of a second
    pub fn add_frame(&mut self, delay: u16) -> Result<FrameOutcome> {
        if delay > 0 {
            blocks::write_graphic_control(&mut self.out, delay)?;
        }

        let (rect, outcome) = match self.frames.dirty_rect() {
            Some(rect) => (rect, FrameOutcome::Image(rect)),
            None if delay == 0 => return Ok(FrameOutcome::Skipped),
            None => (Rect::new(0, 0, 1, 1), FrameOutcome::DelayOnly),
        };

        blocks::write_image_descriptor(&mut self.out, rect)?;
        lzw::compress(&mut self.out, self.frames.pixels_in(rect))?;
        self.frames.swap();
        self.images += 1;

        log::trace!("frame {}: {:?}, delay {}", self.images, outcome, delay);
        Ok(outcome)
    }

    /// Write the trailer and hand back the writer
    pub fn close(mut self) -> Result<W> {
        blocks::write_trailer(&mut self.out)?;
        self.out.flush()?;
        log::debug!("GIF stream closed after {} images", self.images);
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [u8; COLOR_TABLE_LEN] = [0; COLOR_TABLE_LEN];

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(
            GifEncoder::open(Vec::new(), 0, 10, &PALETTE, None),
            Err(Error::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(GifEncoder::open(Vec::new(), 70_000, 1, &PALETTE, None).is_err());
    }

    #[test]
    fn test_first_frame_covers_canvas() {
        let mut gif = GifEncoder::open(Vec::new(), 8, 4, &PALETTE, None).unwrap();
        let outcome = gif.add_frame(10).unwrap();
        assert_eq!(outcome, FrameOutcome::Image(Rect::new(0, 0, 8, 4)));
    }

    #[test]
    fn test_unchanged_frame_outcomes() {
        let mut gif = GifEncoder::open(Vec::new(), 4, 4, &PALETTE, Some(0)).unwrap();
        gif.add_frame(0).unwrap();
        // Redraw the same picture into the recycled buffer
        gif.current_mut().fill(0);

        assert_eq!(gif.add_frame(0).unwrap(), FrameOutcome::Skipped);
        assert_eq!(gif.add_frame(50).unwrap(), FrameOutcome::DelayOnly);
        assert_eq!(gif.images_written(), 2);
    }

    #[test]
    fn test_close_writes_trailer() {
        let gif = GifEncoder::open(Vec::new(), 1, 1, &PALETTE, None).unwrap();
        let out = gif.close().unwrap();
        assert_eq!(out.last(), Some(&b';'));
        assert_eq!(out.len(), 13 + COLOR_TABLE_LEN + 1);
    }
}
