//! Diagnostics context for the emulator
//!
//! Recordings routinely contain sequences the emulator does not model.
//! Notices about them go through this value, which the caller creates once
//! and hands to [`crate::Terminal::new`]. When it is quiet nothing is logged.

use std::fmt;

/// Emulator diagnostics sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    verbose: bool,
}

impl Diagnostics {
    /// Create a context
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// A context that reports everything
    pub fn verbose() -> Self {
        Self::new(true)
    }

    /// A context that reports nothing
    pub fn quiet() -> Self {
        Self::new(false)
    }

    /// Whether notices are emitted
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// An operation targeted a position outside the grid and was dropped
    pub fn out_of_bounds(&self, op: &str, row: i64, col: i64, rows: usize, cols: usize) {
        if self.verbose {
            log::warn!(
                "{}: position {},{} is out of bounds {},{}",
                op,
                row + 1,
                col + 1,
                rows,
                cols
            );
        }
    }

    /// A recognised feature that is deliberately left out
    pub fn not_implemented(&self, what: fmt::Arguments<'_>) {
        if self.verbose {
            log::info!("not implemented: {}", what);
        }
    }

    /// A sequence the emulator does not recognise
    pub fn unsupported(&self, what: fmt::Arguments<'_>) {
        if self.verbose {
            log::debug!("unsupported: {}", what);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_flags() {
        assert!(Diagnostics::verbose().is_verbose());
        assert!(!Diagnostics::quiet().is_verbose());
        assert_eq!(Diagnostics::default(), Diagnostics::quiet());
    }

    #[test]
    fn test_quiet_does_not_panic() {
        let diag = Diagnostics::quiet();
        diag.out_of_bounds("test", -1, 0, 24, 80);
        diag.not_implemented(format_args!("TAB"));
        diag.unsupported(format_args!("ESC {}", 'q'));
    }
}
