//! Input recorded by `script -t`
//!
//! The timing file has one record per line: the seconds elapsed before a
//! chunk of output, then the chunk's length in bytes. The dialogue file is
//! the raw output, preceded by a header line written by `script` itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors reading a recording
#[derive(Error, Debug)]
pub enum TimingError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("timing line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("dialogue has {available} bytes after its header, timings need {needed}")]
    ShortDialogue { needed: usize, available: usize },
}

/// One line of the timing file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingRecord {
    /// Seconds since the previous chunk
    pub delay: f32,
    /// Length of the chunk in bytes
    pub len: usize,
}

impl TimingRecord {
    /// Parse `"<seconds> <bytes>"`. `line` is 1-based, for messages.
    pub fn parse(text: &str, line: usize) -> Result<Self, TimingError> {
        let malformed = |message: String| TimingError::Malformed { line, message };

        let mut fields = text.split_whitespace();
        let (Some(delay), Some(len), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(malformed(format!("expected `<seconds> <bytes>`, got {:?}", text)));
        };

        let delay: f32 = delay
            .parse()
            .map_err(|_| malformed(format!("bad delay {:?}", delay)))?;
        if !delay.is_finite() || delay < 0.0 {
            return Err(malformed(format!("bad delay {:?}", delay)));
        }
        let len = len
            .parse()
            .map_err(|_| malformed(format!("bad byte count {:?}", len)))?;

        Ok(Self { delay, len })
    }
}

/// A recording: the timing records and the output they slice up
#[derive(Debug, Clone, Default)]
pub struct Recording {
    records: Vec<TimingRecord>,
    dialogue: Vec<u8>,
}

impl Recording {
    /// Read and validate both files
    pub fn load(timings: &Path, dialogue: &Path) -> Result<Self, TimingError> {
        let read_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| TimingError::Io { path, source }
        };
        let timing_text = fs::read_to_string(timings).map_err(read_err(timings))?;
        let dialogue_bytes = fs::read(dialogue).map_err(read_err(dialogue))?;

        let recording = Self::parse(&timing_text, &dialogue_bytes)?;
        log::info!(
            "Loaded {} records, {} bytes of output",
            recording.records.len(),
            recording.dialogue.len()
        );
        Ok(recording)
    }

    /// Parse timing text and raw dialogue. The dialogue's first line is
    /// dropped; what remains must cover every record.
    pub fn parse(timings: &str, dialogue: &[u8]) -> Result<Self, TimingError> {
        let records = timings
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| TimingRecord::parse(line, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let body = match dialogue.iter().position(|&b| b == b'\n') {
            Some(newline) => &dialogue[newline + 1..],
            None => &[],
        };

        let needed = records
            .iter()
            .fold(0usize, |total, record| total.saturating_add(record.len));
        if needed > body.len() {
            return Err(TimingError::ShortDialogue {
                needed,
                available: body.len(),
            });
        }

        Ok(Self {
            records,
            dialogue: body.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records paired with the bytes each one covers
    pub fn chunks(&self) -> impl Iterator<Item = (TimingRecord, &[u8])> {
        let mut offset = 0;
        self.records.iter().map(move |record| {
            let chunk = &self.dialogue[offset..offset + record.len];
            offset += record.len;
            (*record, chunk)
        })
    }
}
