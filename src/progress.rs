//! Text progress bar
//!
//! Draws `[----]` once, then returns to the start of the line and fills it
//! with `#` as records are processed.

use std::io::{self, Stdout, Write};

/// Progress bar over a fixed number of steps
pub struct Progress<W: Write> {
    out: W,
    /// Total width including the brackets
    width: usize,
    total: usize,
    drawn: usize,
}

impl Progress<Stdout> {
    /// Bar on stdout, one column narrower than the terminal. `None` when
    /// stdout is not a terminal.
    pub fn stdout(total: usize) -> io::Result<Option<Self>> {
        let Some((width, _)) = terminal_size::terminal_size_of(io::stdout()) else {
            return Ok(None);
        };
        let width = usize::from(width.0).saturating_sub(1);
        Progress::new(io::stdout(), width, total)
    }
}

impl<W: Write> Progress<W> {
    /// Draw the empty bar. Widths below 3 leave no room and give `None`.
    pub fn new(mut out: W, width: usize, total: usize) -> io::Result<Option<Self>> {
        if width < 3 {
            return Ok(None);
        }
        write!(out, "[{}]\r[", "-".repeat(width - 2))?;
        out.flush()?;
        Ok(Some(Self {
            out,
            width,
            total,
            drawn: 0,
        }))
    }

    fn inner_width(&self) -> usize {
        self.width - 2
    }

    /// Fill the bar up to `done` steps out of the total
    pub fn update(&mut self, done: usize) -> io::Result<()> {
        if self.total == 0 {
            return Ok(());
        }
        let target = (done * (self.width - 1) / self.total).min(self.inner_width());
        if target > self.drawn {
            write!(self.out, "{}", "#".repeat(target - self.drawn))?;
            self.out.flush()?;
            self.drawn = target;
        }
        Ok(())
    }

    /// Complete the bar and end the line
    pub fn finish(mut self) -> io::Result<W> {
        let width = self.inner_width();
        self.update(self.total)?;
        if self.drawn < width {
            write!(self.out, "{}", "#".repeat(width - self.drawn))?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(progress: Progress<Vec<u8>>) -> String {
        String::from_utf8(progress.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_initial_bar() {
        let progress = Progress::new(Vec::new(), 8, 4).unwrap().unwrap();
        assert_eq!(String::from_utf8_lossy(&progress.out), "[------]\r[");
    }

    #[test]
    fn test_fills_proportionally() {
        let mut progress = Progress::new(Vec::new(), 12, 10).unwrap().unwrap();
        progress.update(5).unwrap();
        assert_eq!(progress.drawn, 5);
        progress.update(5).unwrap();
        assert_eq!(progress.drawn, 5);

        assert_eq!(output(progress), "[----------]\r[##########\n");
    }

    #[test]
    fn test_too_narrow() {
        assert!(Progress::new(Vec::new(), 2, 10).unwrap().is_none());
    }

    #[test]
    fn test_zero_total() {
        let mut progress = Progress::new(Vec::new(), 5, 0).unwrap().unwrap();
        progress.update(3).unwrap();
        assert_eq!(output(progress), "[---]\r[###\n");
    }
}
