//! Terminal mode flags
//!
//! ANSI modes (`CSI n h`) and DEC private modes (`CSI ? n h`). Several are
//! tracked only so that a recording which toggles them stays quiet; they do
//! not change what ends up on screen.

use serde::{Deserialize, Serialize};

/// Result of a mode set/reset request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// The flag was updated
    Applied,
    /// Known mode the emulator does not model
    NotImplemented,
    /// Unrecognised mode number
    Unknown,
}

/// Terminal mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    // Standard modes (ANSI)
    /// Control bytes are shown as glyphs instead of executed (mode 3)
    pub display_controls: bool,
    /// Insert mode (IRM) - characters shift right instead of overwriting
    pub insert_mode: bool,
    /// Automatic newline mode (LNM) - LF also does CR
    pub linefeed_mode: bool,

    // DEC private modes
    /// DECCKM - Cursor key mode (application vs normal)
    pub cursor_keys_application: bool,
    /// DECSCNM - Reverse video mode
    pub reverse_video: bool,
    /// DECOM - Origin mode (cursor relative to scroll region)
    pub origin_mode: bool,
    /// DECAWM - Auto-wrap mode
    pub auto_wrap: bool,
    /// DECARM - Auto-repeat mode
    pub auto_repeat: bool,
    /// DECTCEM - Cursor visible
    pub cursor_visible: bool,
    /// Mouse tracking: X10 mode (9)
    pub mouse_x10: bool,
    /// Mouse tracking: X11 normal mode (1000)
    pub mouse_x11: bool,
}

impl Modes {
    /// Create new modes with default values
    pub fn new() -> Self {
        Self {
            display_controls: false,
            insert_mode: false,
            linefeed_mode: false,

            cursor_keys_application: false,
            reverse_video: false,
            origin_mode: false,
            auto_wrap: true,
            auto_repeat: true,
            cursor_visible: true,
            mouse_x10: false,
            mouse_x11: false,
        }
    }

    /// Reset all modes to default
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Set a DEC private mode by number
    pub fn set_dec_mode(&mut self, mode: u16, value: bool) -> ModeChange {
        match mode {
            1 => self.cursor_keys_application = value,
            // DECCOLM, the grid size is fixed for the whole recording
            3 => return ModeChange::NotImplemented,
            5 => self.reverse_video = value,
            6 => self.origin_mode = value,
            7 => self.auto_wrap = value,
            8 => self.auto_repeat = value,
            9 => self.mouse_x10 = value,
            25 => self.cursor_visible = value,
            1000 => self.mouse_x11 = value,
            _ => return ModeChange::Unknown,
        }
        ModeChange::Applied
    }

    /// Get a DEC private mode by number
    pub fn get_dec_mode(&self, mode: u16) -> bool {
        match mode {
            1 => self.cursor_keys_application,
            5 => self.reverse_video,
            6 => self.origin_mode,
            7 => self.auto_wrap,
            8 => self.auto_repeat,
            9 => self.mouse_x10,
            25 => self.cursor_visible,
            1000 => self.mouse_x11,
            _ => false,
        }
    }

    /// Set a standard (non-DEC) mode by number
    pub fn set_mode(&mut self, mode: u16, value: bool) -> ModeChange {
        match mode {
            3 => self.display_controls = value,
            4 => self.insert_mode = value,
            20 => self.linefeed_mode = value,
            _ => return ModeChange::Unknown,
        }
        ModeChange::Applied
    }

    /// Check if any mouse mode is active
    pub fn mouse_tracking_enabled(&self) -> bool {
        self.mouse_x10 || self.mouse_x11
    }
}

impl Default for Modes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_default() {
        let modes = Modes::new();
        assert!(modes.auto_wrap);
        assert!(modes.auto_repeat);
        assert!(modes.cursor_visible);
        assert!(!modes.insert_mode);
        assert!(!modes.display_controls);
    }

    #[test]
    fn test_set_dec_mode() {
        let mut modes = Modes::new();

        assert_eq!(modes.set_dec_mode(25, false), ModeChange::Applied);
        assert!(!modes.cursor_visible);

        assert_eq!(modes.set_dec_mode(6, true), ModeChange::Applied);
        assert!(modes.origin_mode);

        assert_eq!(modes.set_dec_mode(3, true), ModeChange::NotImplemented);
        assert_eq!(modes.set_dec_mode(2004, true), ModeChange::Unknown);
    }

    #[test]
    fn test_get_dec_mode() {
        let modes = Modes::new();
        assert!(modes.get_dec_mode(25)); // cursor visible
        assert!(!modes.get_dec_mode(1000)); // mouse
    }

    #[test]
    fn test_set_ansi_mode() {
        let mut modes = Modes::new();
        assert_eq!(modes.set_mode(4, true), ModeChange::Applied);
        assert!(modes.insert_mode);
        assert_eq!(modes.set_mode(20, true), ModeChange::Applied);
        assert!(modes.linefeed_mode);
        assert_eq!(modes.set_mode(3, true), ModeChange::Applied);
        assert!(modes.display_controls);
        assert_eq!(modes.set_mode(12, true), ModeChange::Unknown);
    }

    #[test]
    fn test_mouse_tracking() {
        let mut modes = Modes::new();
        assert!(!modes.mouse_tracking_enabled());

        modes.set_dec_mode(1000, true);
        assert!(modes.mouse_tracking_enabled());
    }

    #[test]
    fn test_modes_reset() {
        let mut modes = Modes::new();
        modes.cursor_visible = false;
        modes.insert_mode = true;

        modes.reset();

        assert!(modes.cursor_visible);
        assert!(!modes.insert_mode);
    }
}
