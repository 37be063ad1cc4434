//! Application error type

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::font::FontError;
use crate::timing::TimingError;

/// Everything that can stop a conversion
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not load font: {0}")]
    Font(#[from] FontError),

    #[error("could not load recording: {0}")]
    Timing(#[from] TimingError),

    #[error("could not create GIF: {0}")]
    Gif(#[from] scriptgif_gif::Error),

    /// Creating, writing or renaming an output file failed
    #[error("could not write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for conversions
pub type Result<T> = std::result::Result<T, Error>;
