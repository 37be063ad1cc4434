//! Conversion driver
//!
//! Replays a recording through the emulator and emits a frame whenever
//! enough time has passed since the last one. Delays are in hundredths of
//! a second, the GIF time unit.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use scriptgif_core::{Diagnostics, Terminal};
use scriptgif_gif::GifEncoder;
use tempfile::NamedTempFile;

use crate::config::{CliArgs, Config};
use crate::dump;
use crate::error::{Error, Result};
use crate::font::Font;
use crate::progress::Progress;
use crate::render::Renderer;
use crate::timing::Recording;

/// Shortest frame delay. Many viewers slow down anything faster.
pub const MIN_DELAY: u16 = 6;

/// Timing and display options for a replay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    /// Speedup
    pub divisor: f32,
    /// Longest pause kept, in seconds
    pub max_delay: f32,
    /// GIF loop count, 0 loops forever
    pub loop_count: Option<u16>,
    /// Draw the cursor
    pub cursor: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            divisor: 1.0,
            max_delay: f32::MAX,
            loop_count: None,
            cursor: true,
        }
    }
}

impl From<&Config> for Playback {
    fn from(config: &Config) -> Self {
        Self {
            divisor: config.divisor,
            max_delay: config.max_delay(),
            loop_count: config.loop_count,
            cursor: config.cursor,
        }
    }
}

/// Counts from a finished conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Timing records replayed
    pub records: usize,
    /// Frames submitted to the encoder
    pub frames: usize,
    /// Image blocks actually written
    pub images: usize,
}

/// Replay `recording` into `terminal`, writing the animation to `out`.
///
/// `on_record` is called with the index of each record before it is
/// replayed.
pub fn encode_recording<W, F>(
    recording: &Recording,
    terminal: &mut Terminal,
    font: &Font,
    playback: &Playback,
    out: W,
    mut on_record: F,
) -> Result<(W, Summary)>
where
    W: Write,
    F: FnMut(usize) -> Result<()>,
{
    let renderer = Renderer::new(font);
    let snapshot = terminal.snapshot();
    let (width, height) = renderer.canvas_size(snapshot.cols(), snapshot.rows());
    let palette = terminal.palette().to_bytes();
    let mut gif = GifEncoder::open(out, width, height, &palette, playback.loop_count)?;

    let mut summary = Summary {
        records: recording.len(),
        ..Summary::default()
    };
    let frame = |terminal: &Terminal, gif: &mut GifEncoder<W>, delay: u16| {
        renderer.render(&terminal.snapshot(), gif.current_mut(), width);
        gif.add_frame(delay)
    };

    if !playback.cursor {
        terminal.set_cursor_visible(false);
    }

    let mut pending = 0.0f32;
    let mut rounded = 0u16;
    for (i, (record, bytes)) in recording.chunks().enumerate() {
        on_record(i)?;

        pending += record.delay.min(playback.max_delay) * 100.0 / playback.divisor;
        // Saturates for absurdly long pauses
        rounded = (pending + 0.5) as u16;
        if i > 0 && rounded >= MIN_DELAY {
            frame(&*terminal, &mut gif, rounded)?;
            summary.frames += 1;
            pending = 0.0;
        }

        terminal.feed_bytes(bytes);
        if !playback.cursor {
            terminal.set_cursor_visible(false);
        }
    }

    frame(&*terminal, &mut gif, rounded.max(MIN_DELAY))?;
    summary.frames += 1;
    summary.images = gif.images_written();

    Ok((gif.close()?, summary))
}

/// Run a whole conversion as configured: load inputs, write the GIF
/// through a temporary file, then write any requested dumps
pub fn run(args: &CliArgs, config: &Config) -> Result<Summary> {
    let recording = Recording::load(&args.timings, &args.dialogue)?;
    let font = Font::load(&config.font)?;
    let dims = config.dimensions();
    let diag = Diagnostics::new(config.verbose);
    let mut terminal = Terminal::with_palette(dims, config.palette()?, diag);
    log::info!(
        "Converting {} records at {}x{}",
        recording.len(),
        dims.cols,
        dims.rows
    );

    let output = &config.output;
    let staging = staging_file(output)?;
    let mut progress = if config.quiet {
        None
    } else {
        Progress::stdout(recording.len())?
    };

    let (writer, summary) = encode_recording(
        &recording,
        &mut terminal,
        &font,
        &Playback::from(config),
        BufWriter::new(staging),
        |i| match progress.as_mut() {
            Some(bar) => bar.update(i).map_err(Error::from),
            None => Ok(()),
        },
    )?;
    if let Some(bar) = progress {
        bar.finish()?;
    }

    let staging = writer
        .into_inner()
        .map_err(|e| output_error(output, e.into_error()))?;
    staging
        .persist(output)
        .map_err(|e| output_error(output, e.error))?;
    log::info!(
        "Wrote {} ({} frames, {} images)",
        output.display(),
        summary.frames,
        summary.images
    );

    if let Some(path) = &args.dump {
        dump::write_text(path, &terminal.snapshot())?;
    }
    if let Some(path) = &args.dump_json {
        dump::write_json(path, &terminal.snapshot())?;
    }

    Ok(summary)
}

fn output_error(path: &Path, source: std::io::Error) -> Error {
    Error::Output {
        path: path.to_path_buf(),
        source,
    }
}

/// Temporary file in the output's directory, so the final rename stays
/// on one filesystem
fn staging_file(output: &Path) -> Result<NamedTempFile<File>> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir).map_err(|e| output_error(output, e))
}
