//! scriptgif
//!
//! Replays a terminal session recorded with `script -t` and encodes what
//! the screen showed as an animated GIF.
//!
//! - `timing`: the recording, timing records plus output bytes
//! - `font`: MBF bitmap fonts
//! - `render`: screen cells to palette-indexed pixels
//! - `convert`: the replay loop and frame timing
//! - `config`: CLI arguments and the TOML config file

pub mod config;
pub mod convert;
pub mod dump;
pub mod error;
pub mod font;
pub mod progress;
pub mod render;
pub mod timing;

pub use config::{CliArgs, Config, ConfigError};
pub use convert::{encode_recording, run, Playback, Summary, MIN_DELAY};
pub use error::{Error, Result};
pub use font::{Font, FontError};
pub use render::Renderer;
pub use timing::{Recording, TimingError, TimingRecord};
