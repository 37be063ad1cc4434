//! Configuration for scriptgif
//!
//! Settings come from three places, highest priority first:
//! - command-line arguments
//! - a TOML config file (`--config`, or the user config directory)
//! - built-in defaults

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use scriptgif_core::{parse_hex_color, Dimensions, Palette, PALETTE_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// CLI arguments for scriptgif
#[derive(Parser, Debug, Clone)]
#[command(name = "scriptgif")]
#[command(version)]
#[command(about = "Convert a script(1) recording into an animated GIF", long_about = None)]
#[command(disable_help_flag = true)]
pub struct CliArgs {
    /// File generated by script(1)'s -t option
    #[arg(value_name = "TIMINGS")]
    pub timings: PathBuf,

    /// File generated by script(1)'s regular output
    #[arg(value_name = "DIALOGUE")]
    pub dialogue: PathBuf,

    /// Terminal width in columns
    #[arg(short = 'w', long = "cols", value_name = "COLUMNS")]
    pub cols: Option<usize>,

    /// Terminal height in lines
    #[arg(short = 'h', long = "rows", value_name = "LINES")]
    pub rows: Option<usize>,

    /// MBF font file
    #[arg(short, long, value_name = "FONT")]
    pub font: Option<PathBuf>,

    /// GIF output file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Speedup, as in scriptreplay(1)
    #[arg(short, long, value_name = "DIVISOR")]
    pub divisor: Option<f32>,

    /// Maximum delay in seconds, as in scriptreplay(1)
    #[arg(short, long, value_name = "MAXDELAY")]
    pub max_delay: Option<f32>,

    /// GIF loop count (0 = infinite loop)
    #[arg(short = 'l', long = "loop", value_name = "COUNT")]
    pub loop_count: Option<u16>,

    /// Show or hide the cursor
    #[arg(short, long, value_name = "on|off")]
    pub cursor: Option<CursorSwitch>,

    /// Verbose mode (show emulator logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (no progress bar)
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the final screen as text
    #[arg(long, value_name = "FILE")]
    pub dump: Option<PathBuf>,

    /// Write the final screen as JSON
    #[arg(long, value_name = "FILE")]
    pub dump_json: Option<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// Value of `--cursor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CursorSwitch {
    #[value(alias = "1")]
    On,
    #[value(alias = "0")]
    Off,
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config error in '{field}': {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Conversion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Terminal columns (None = size of the controlling terminal)
    pub cols: Option<usize>,
    /// Terminal rows (None = size of the controlling terminal)
    pub rows: Option<usize>,
    /// MBF font file
    pub font: PathBuf,
    /// GIF output file
    pub output: PathBuf,
    /// Playback speedup
    pub divisor: f32,
    /// Longest pause kept, in seconds (None = unlimited)
    pub max_delay: Option<f32>,
    /// GIF loop count, 0 loops forever (None = play once)
    pub loop_count: Option<u16>,
    /// Draw the cursor
    pub cursor: bool,
    /// Log emulator diagnostics
    pub verbose: bool,
    /// Hide the progress bar
    pub quiet: bool,
    /// 16 `#rrggbb` colors replacing the default palette
    pub palette: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: None,
            rows: None,
            font: PathBuf::from("misc-fixed-6x10.mbf"),
            output: PathBuf::from("con.gif"),
            divisor: 1.0,
            max_delay: None,
            loop_count: None,
            cursor: true,
            verbose: false,
            quiet: false,
            palette: None,
        }
    }
}

impl Config {
    /// Load configuration with precedence CLI > config file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            // An explicit file must exist and parse
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::load_from_file(&path).unwrap_or_else(|e| {
                    log::warn!("Ignoring config file {}: {}", path.display(), e);
                    Self::default()
                }),
                _ => Self::default(),
            },
        };

        config.apply_cli_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scriptgif").join("config.toml"))
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(cols) = args.cols {
            self.cols = Some(cols);
        }
        if let Some(rows) = args.rows {
            self.rows = Some(rows);
        }
        if let Some(font) = &args.font {
            self.font = font.clone();
        }
        if let Some(output) = &args.output {
            self.output = output.clone();
        }
        if let Some(divisor) = args.divisor {
            self.divisor = divisor;
        }
        if let Some(max_delay) = args.max_delay {
            self.max_delay = Some(max_delay);
        }
        if let Some(count) = args.loop_count {
            self.loop_count = Some(count);
        }
        if let Some(cursor) = args.cursor {
            self.cursor = cursor == CursorSwitch::On;
        }
        self.verbose |= args.verbose;
        self.quiet |= args.quiet;
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == Some(0) {
            return Err(ConfigError::invalid("cols", "Columns must be at least 1"));
        }
        if self.rows == Some(0) {
            return Err(ConfigError::invalid("rows", "Rows must be at least 1"));
        }
        if !(self.divisor.is_finite() && self.divisor > 0.0) {
            return Err(ConfigError::invalid(
                "divisor",
                format!("Divisor must be a positive number, got {}", self.divisor),
            ));
        }
        if let Some(max) = self.max_delay {
            if !(max > 0.0) {
                return Err(ConfigError::invalid(
                    "max_delay",
                    format!("Maximum delay must be positive, got {}", max),
                ));
            }
        }
        self.palette()?;
        Ok(())
    }

    /// Terminal size: configured values, else the controlling terminal,
    /// else 80x24
    pub fn dimensions(&self) -> Dimensions {
        let detected = terminal_size::terminal_size()
            .map(|(w, h)| Dimensions::new(usize::from(w.0), usize::from(h.0)));
        let fallback = detected.unwrap_or_default();
        Dimensions::new(
            self.cols.unwrap_or(fallback.cols),
            self.rows.unwrap_or(fallback.rows),
        )
    }

    /// Longest pause in seconds
    pub fn max_delay(&self) -> f32 {
        self.max_delay.unwrap_or(f32::MAX)
    }

    /// The configured palette, or the default one
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let Some(colors) = &self.palette else {
            return Ok(Palette::default());
        };
        if colors.len() != PALETTE_SIZE {
            return Err(ConfigError::invalid(
                "palette",
                format!("Expected {} colors, got {}", PALETTE_SIZE, colors.len()),
            ));
        }

        let mut palette = Palette::default();
        for (i, color) in colors.iter().enumerate() {
            let rgb = parse_hex_color(color).ok_or_else(|| {
                ConfigError::invalid(
                    &format!("palette[{}]", i),
                    format!("Invalid hex color '{}'. Expected format: #RRGGBB", color),
                )
            })?;
            palette.set(i as u8, rgb);
        }
        Ok(palette)
    }
}
