//! Terminal executor
//!
//! Ties together the parser and the screen model, applying parsed actions
//! to update the terminal state. This is the emulator's public face:
//! bytes go in through [`Terminal::feed`], the grid comes out through
//! [`Terminal::snapshot`].

use scriptgif_parser::{Action, CsiAction, EscAction, Parser, ParserState};

use crate::color::Palette;
use crate::diagnostics::Diagnostics;
use crate::screen::Screen;
use crate::snapshot::Snapshot;
use crate::Dimensions;

/// Terminal emulator: parser plus screen state
#[derive(Debug, Clone)]
pub struct Terminal {
    /// The terminal screen
    screen: Screen,
    /// The escape sequence parser
    parser: Parser,
}

impl Terminal {
    /// Create a new terminal with the default palette
    pub fn new(dims: Dimensions, diag: Diagnostics) -> Self {
        Self::with_palette(dims, Palette::default(), diag)
    }

    /// Create a new terminal with a custom palette
    pub fn with_palette(dims: Dimensions, palette: Palette, diag: Diagnostics) -> Self {
        Self {
            screen: Screen::new(dims, palette, diag),
            parser: Parser::new(),
        }
    }

    /// Get a reference to the screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Current parser state
    pub fn parser_state(&self) -> ParserState {
        self.parser.state()
    }

    /// Palette owned by the terminal
    pub fn palette(&self) -> &Palette {
        self.screen.palette()
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.screen)
    }

    /// Show or hide the cursor
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.screen.set_cursor_visible(visible);
    }

    /// Reset screen and parser. Dimensions are kept.
    pub fn reset(&mut self) {
        self.parser.reset();
        self.screen.reset();
    }

    /// Process one byte
    pub fn feed(&mut self, byte: u8) {
        let mode = self.screen.input_mode();
        let screen = &mut self.screen;
        self.parser
            .advance(byte, mode, &mut |action| apply_action(screen, action));
    }

    /// Process a chunk of bytes
    pub fn feed_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.feed(byte);
        }
    }
}

/// Apply a single parsed action to the screen
fn apply_action(screen: &mut Screen, action: Action) {
    match action {
        Action::Print(c) => screen.print(c),
        Action::Graphic(byte) => screen.print_graphic(byte),
        Action::Control(byte) => execute_c0(screen, byte),
        Action::Esc(esc) => execute_esc(screen, esc),
        Action::Csi(csi) => execute_csi(screen, &csi),
        Action::Osc(data) => screen
            .diagnostics()
            .not_implemented(format_args!("OSC {:?}", String::from_utf8_lossy(&data))),
    }
}

/// Execute a C0 control character
fn execute_c0(screen: &mut Screen, byte: u8) {
    match byte {
        0x08 => {
            // BS - Backspace
            screen.backspace();
        }
        0x09 => {
            // HT - no tab stops are tracked
            screen.diagnostics().not_implemented(format_args!("TAB"));
        }
        0x0A..=0x0C => {
            // LF, VT, FF - Line Feed (VT and FF treated as LF)
            screen.linefeed();
        }
        0x0D => {
            // CR - Carriage Return
            screen.carriage_return();
        }
        0x0E => {
            // SO - Shift Out (switch to G1 charset)
            screen.shift_out();
        }
        0x0F => {
            // SI - Shift In (switch to G0 charset)
            screen.shift_in();
        }
        _ => {
            // BEL and the rest have nothing to show
        }
    }
}

/// Execute an ESC sequence
fn execute_esc(screen: &mut Screen, esc: EscAction) {
    let diag = screen.diagnostics();
    match esc {
        EscAction::SaveContext => screen.save_context(),
        EscAction::RestoreContext => screen.restore_context(),
        EscAction::Index => screen.index(),
        EscAction::ReverseIndex => screen.reverse_index(),
        EscAction::NextLine => screen.next_line(),
        EscAction::FullReset => screen.reset(),
        EscAction::DesignateG0(designator) => screen.designate_charset(0, designator),
        EscAction::DesignateG1(designator) => screen.designate_charset(1, designator),
        EscAction::HorizontalTabSet => diag.not_implemented(format_args!("ESC H (HTS)")),
        EscAction::ApplicationKeypad => diag.not_implemented(format_args!("ESC = (DECPAM)")),
        EscAction::NumericKeypad => diag.not_implemented(format_args!("ESC > (DECPNM)")),
        EscAction::SelectCharsetFamily(_) => {
            diag.not_implemented(format_args!("ESC % (character set selection)"))
        }
        EscAction::DecLine(_) => diag.not_implemented(format_args!("ESC # (DECALN)")),
        // No application is listening for the reply
        EscAction::Identify | EscAction::StringTerminator => {}
        EscAction::Unknown(first, second) => match second {
            Some(second) => diag.unsupported(format_args!(
                "ESC sequence {} {}",
                first as char, second as char
            )),
            None => diag.unsupported(format_args!("ESC sequence {}", first as char)),
        },
    }
}

/// Execute a CSI sequence
fn execute_csi(screen: &mut Screen, csi: &CsiAction) {
    if let Some(marker) = csi.marker {
        screen.diagnostics().unsupported(format_args!(
            "CSI {} ... {}",
            marker as char,
            csi.final_byte as char
        ));
        return;
    }

    let n = i64::from(csi.count());
    match csi.final_byte {
        // Cursor movement
        b'A' => screen.move_cursor_by(-n, 0),
        b'B' | b'e' => screen.move_cursor_by(n, 0),
        b'C' | b'a' => screen.move_cursor_by(0, n),
        b'D' => screen.move_cursor_by(0, -n),
        b'E' => screen.move_cursor_lines(n),
        b'F' => screen.move_cursor_lines(-n),
        b'G' | b'`' => screen.set_cursor_col(usize::from(csi.count()) - 1),
        b'd' => screen.set_cursor_row(usize::from(csi.count()) - 1),
        b'H' | b'f' => {
            // CUP - 1-indexed, defaults to home
            let row = usize::from(csi.param(0, 1)) - 1;
            let col = usize::from(csi.param(1, 1)) - 1;
            screen.move_cursor_to(row, col);
        }

        // Erasing and editing
        b'J' => screen.erase_display(csi.params.get(0)),
        b'K' => screen.erase_line(csi.params.get(0)),
        b'L' => screen.insert_lines(usize::from(csi.count())),
        b'M' => screen.delete_lines(usize::from(csi.count())),
        b'P' => screen.delete_chars(usize::from(csi.count())),
        b'X' => screen.erase_chars(usize::from(csi.count())),

        // Modes and rendition
        b'h' => {
            for mode in csi.params.iter() {
                screen.set_mode(csi.private, mode, true);
            }
        }
        b'l' => {
            for mode in csi.params.iter() {
                screen.set_mode(csi.private, mode, false);
            }
        }
        b'm' => {
            for number in csi.params.iter() {
                screen.set_graphic_rendition(number);
            }
        }

        b'r' => {
            // DECSTBM - missing bounds default to the full screen
            let top = usize::from(csi.param(0, 1)) - 1;
            let bottom = match csi.params.get(1) {
                0 => screen.rows() - 1,
                n => usize::from(n) - 1,
            };
            screen.set_scroll_region(top, bottom);
        }
        b's' => screen.save_cursor(),
        b'u' => screen.restore_cursor(),

        // DA and DSR: no application is listening for the reply
        b'c' | b'n' => {}

        b'@' => screen
            .diagnostics()
            .not_implemented(format_args!("CSI @ (ICH)")),
        b'g' => screen
            .diagnostics()
            .not_implemented(format_args!("CSI g (TBC)")),
        b'q' => screen
            .diagnostics()
            .not_implemented(format_args!("CSI q (DECLL)")),
        other => screen
            .diagnostics()
            .unsupported(format_args!("CSI sequence {}", other as char)),
    }
}
