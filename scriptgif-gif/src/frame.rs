//! Double pixel buffer and change detection

use std::mem;

/// Value outside the 16-color palette. The previous buffer starts filled
/// with it so the first frame always covers the whole canvas.
pub const UNSET_PIXEL: u8 = 0x10;

/// Rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered
    pub fn area(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Current and previous frames of the canvas
#[derive(Debug, Clone)]
pub struct FrameBuffers {
    width: u16,
    height: u16,
    current: Vec<u8>,
    previous: Vec<u8>,
}

impl FrameBuffers {
    /// Allocate both buffers. The current one starts at color 0.
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            current: vec![0; len],
            previous: vec![UNSET_PIXEL; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Frame being drawn
    pub fn current(&self) -> &[u8] {
        &self.current
    }

    /// Frame being drawn, row-major, one palette index per pixel
    pub fn current_mut(&mut self) -> &mut [u8] {
        &mut self.current
    }

    /// Last frame written to the stream
    pub fn previous(&self) -> &[u8] {
        &self.previous
    }

    /// Smallest rectangle containing every pixel that differs between the
    /// two buffers, or `None` when they are identical
    pub fn dirty_rect(&self) -> Option<Rect> {
        let width = usize::from(self.width);
        if width == 0 {
            return None;
        }

        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        let rows = self.current.chunks(width).zip(self.previous.chunks(width));
        for (y, (cur, old)) in rows.enumerate() {
            let Some(first) = cur.iter().zip(old).position(|(a, b)| a != b) else {
                continue;
            };
            let last = cur
                .iter()
                .zip(old)
                .rposition(|(a, b)| a != b)
                .unwrap_or(first);

            bounds = Some(match bounds {
                None => (first, last, y, y),
                Some((left, right, top, _)) => (left.min(first), right.max(last), top, y),
            });
        }

        // Every coordinate is below width/height, which are u16
        bounds.map(|(left, right, top, bottom)| {
            Rect::new(
                left as u16,
                top as u16,
                (right - left + 1) as u16,
                (bottom - top + 1) as u16,
            )
        })
    }

    /// Pixels of the current buffer inside `rect`, row by row
    pub fn pixels_in(&self, rect: Rect) -> impl Iterator<Item = u8> + '_ {
        let width = usize::from(self.width);
        let x = usize::from(rect.x);
        let w = usize::from(rect.width);
        let y = usize::from(rect.y);
        (y..y + usize::from(rect.height)).flat_map(move |row| {
            let start = row * width + x;
            self.current[start..start + w].iter().copied()
        })
    }

    /// The frame just written becomes the previous one. The stale buffer
    /// becomes the next drawing surface without being cleared.
    pub fn swap(&mut self) {
        mem::swap(&mut self.current, &mut self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_fully_dirty() {
        let frames = FrameBuffers::new(4, 3);
        assert_eq!(frames.dirty_rect(), Some(Rect::new(0, 0, 4, 3)));
    }

    #[test]
    fn test_identical_buffers_are_clean() {
        let mut frames = FrameBuffers::new(4, 3);
        frames.swap();
        frames.current_mut().fill(UNSET_PIXEL);
        assert_eq!(frames.dirty_rect(), None);
    }

    #[test]
    fn test_single_pixel_change() {
        let mut frames = FrameBuffers::new(5, 5);
        frames.swap();
        frames.current_mut().fill(UNSET_PIXEL);
        frames.current_mut()[2 * 5 + 3] = 1;

        assert_eq!(frames.dirty_rect(), Some(Rect::new(3, 2, 1, 1)));
    }

    #[test]
    fn test_bounding_box_spans_changes() {
        let mut frames = FrameBuffers::new(6, 6);
        frames.swap();
        frames.current_mut().fill(UNSET_PIXEL);
        frames.current_mut()[6 + 4] = 2;
        frames.current_mut()[4 * 6 + 1] = 3;

        let rect = frames.dirty_rect();
        assert_eq!(rect, Some(Rect::new(1, 1, 4, 4)));
        assert_eq!(rect.map(|r| r.area()), Some(16));
    }

    #[test]
    fn test_pixels_in_rect() {
        let mut frames = FrameBuffers::new(3, 3);
        for (i, p) in frames.current_mut().iter_mut().enumerate() {
            *p = i as u8;
        }
        let pixels: Vec<u8> = frames.pixels_in(Rect::new(1, 1, 2, 2)).collect();
        assert_eq!(pixels, vec![4, 5, 7, 8]);
    }

    #[test]
    fn test_swap_exchanges_buffers() {
        let mut frames = FrameBuffers::new(2, 1);
        frames.current_mut().copy_from_slice(&[1, 2]);
        frames.swap();
        assert_eq!(frames.previous(), &[1, 2]);
        assert_eq!(frames.current(), &[UNSET_PIXEL, UNSET_PIXEL]);
    }
}
