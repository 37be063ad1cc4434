//! scriptgif GIF - streaming GIF89a encoder
//!
//! Frames are drawn into a pixel buffer of 4-bit palette indices and
//! appended to the stream one at a time. Only the bounding box of the
//! pixels that changed since the previous frame is compressed.
//!
//! Key features:
//! - 16-color global color table
//! - Optional NETSCAPE2.0 loop extension
//! - Dirty-rectangle frames with per-frame delay
//! - LZW with a fixed 4-bit minimum code size
//!
//! Reference: https://www.w3.org/Graphics/GIF/spec-gif89a.txt

mod blocks;
mod encoder;
mod error;
mod frame;
mod lzw;

pub use encoder::{FrameOutcome, GifEncoder};
pub use error::{Error, Result};
pub use frame::{FrameBuffers, Rect, UNSET_PIXEL};
pub use lzw::{CLEAR_CODE, END_CODE, MAX_CODES, MIN_CODE_SIZE};

/// Size of the global color table in bytes: 16 RGB triples
pub const COLOR_TABLE_LEN: usize = 48;
