//! Error types for GIF encoding

use std::io;
use thiserror::Error;

/// GIF encoder error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Canvas size is zero or does not fit in 16 bits
    #[error("Invalid canvas size {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

/// Result type for GIF operations
pub type Result<T> = std::result::Result<T, Error>;
