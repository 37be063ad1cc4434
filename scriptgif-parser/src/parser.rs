//! Terminal escape sequence parser
//!
//! A small byte-at-a-time state machine covering the subset of VT100/ANSI
//! that recorded shell sessions actually contain:
//! - C0 control characters, executed immediately in every state
//! - ESC sequences with optional intermediates
//! - CSI sequences (7-bit `ESC [` and 8-bit `0x9B` introducers)
//! - OSC strings, consumed and handed back untouched
//! - UTF-8 text, or raw bytes when an 8-bit charset is active
//!
//! How a byte is interpreted depends on the emulator's current charset and
//! display-controls mode, so callers pass an [`InputMode`] with every byte.

use crate::action::{Action, CsiAction, EscAction};
use crate::utf8::{Utf8Decoder, Utf8Result};

/// Bytes buffered for a pending escape or control sequence
pub const MAX_PARTIAL: usize = 256;
/// Maximum length kept for OSC payloads
const MAX_OSC_LEN: usize = 4096;

const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;
const CSI_8BIT: u8 = 0x9B;
const ST_8BIT: u8 = 0x9C;

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Normal text processing
    Ground,
    /// After ESC, collecting intermediates
    Escape,
    /// After ESC [ or 0x9B
    ControlSequence,
    /// After ESC ]
    OperatingSystemCommand,
    /// Inside a multi-byte UTF-8 sequence
    Utf8Continuation,
}

/// Emulator state that changes how bytes are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputMode {
    /// The active charset is Unicode, so text bytes are decoded as UTF-8.
    /// Otherwise each text byte is handed back as [`Action::Graphic`].
    pub unicode: bool,
    /// Control bytes are displayed rather than executed
    pub literal_controls: bool,
}

impl Default for InputMode {
    fn default() -> Self {
        Self {
            unicode: true,
            literal_controls: false,
        }
    }
}

/// The terminal parser
#[derive(Debug, Clone)]
pub struct Parser {
    /// Current state
    state: ParserState,
    /// UTF-8 decoder
    utf8: Utf8Decoder,
    /// Raw bytes of the pending ESC/CSI sequence
    partial: Vec<u8>,
    /// OSC string data
    osc_data: Vec<u8>,
    /// Bytes dropped from the current sequence because the buffer was full
    overflow: usize,
}

impl Parser {
    /// Create a new parser
    pub fn new() -> Self {
        Self {
            state: ParserState::Ground,
            utf8: Utf8Decoder::new(),
            partial: Vec::with_capacity(MAX_PARTIAL),
            osc_data: Vec::new(),
            overflow: 0,
        }
    }

    /// Get current parser state
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Reset parser to ground state
    pub fn reset(&mut self) {
        self.state = ParserState::Ground;
        self.utf8.reset();
        self.clear_partial();
        self.osc_data.clear();
    }

    /// Parse a chunk of bytes under a fixed input mode
    pub fn parse<F>(&mut self, data: &[u8], mode: InputMode, mut callback: F)
    where
        F: FnMut(Action),
    {
        for &byte in data {
            self.advance(byte, mode, &mut callback);
        }
    }

    /// Parse a chunk with the default mode and collect actions into a vector
    pub fn parse_collect(&mut self, data: &[u8]) -> Vec<Action> {
        let mut actions = Vec::new();
        self.parse(data, InputMode::default(), |action| actions.push(action));
        actions
    }

    /// Advance the parser by one byte
    pub fn advance<F>(&mut self, byte: u8, mode: InputMode, callback: &mut F)
    where
        F: FnMut(Action),
    {
        if self.state == ParserState::OperatingSystemCommand {
            self.handle_osc(byte, mode, callback);
            return;
        }

        if byte < 0x20 && byte != ESC && !mode.literal_controls {
            // Executed without disturbing any pending sequence
            callback(Action::Control(byte));
            return;
        }

        if byte == ESC {
            if self.state == ParserState::ControlSequence || self.state == ParserState::Escape {
                log::debug!("escape sequence restarted after {:?}", self.partial);
            }
            self.enter_escape();
            return;
        }

        match self.state {
            ParserState::Ground => self.handle_ground(byte, mode, callback),
            ParserState::Escape => self.handle_escape(byte, callback),
            ParserState::ControlSequence => self.handle_csi(byte, callback),
            ParserState::Utf8Continuation => self.handle_utf8(byte, mode, callback),
            ParserState::OperatingSystemCommand => {}
        }
    }

    fn handle_ground<F>(&mut self, byte: u8, mode: InputMode, callback: &mut F)
    where
        F: FnMut(Action),
    {
        if byte == CSI_8BIT {
            self.enter_csi();
            return;
        }

        if !mode.unicode {
            callback(Action::Graphic(byte));
            return;
        }

        match byte {
            0x00..=0x7F => callback(Action::Print(byte as char)),
            0x80..=0xBF => callback(Action::Print(char::REPLACEMENT_CHARACTER)),
            _ => {
                self.utf8.start(byte);
                self.state = ParserState::Utf8Continuation;
            }
        }
    }

    fn handle_utf8<F>(&mut self, byte: u8, mode: InputMode, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match self.utf8.push(byte) {
            Utf8Result::Pending => {}
            Utf8Result::Char(c) => {
                self.state = ParserState::Ground;
                callback(Action::Print(c));
            }
            Utf8Result::Invalid => {
                self.state = ParserState::Ground;
                callback(Action::Print(char::REPLACEMENT_CHARACTER));
                // A non-continuation byte starts over in ground
                if byte & 0xC0 != 0x80 {
                    self.handle_ground(byte, mode, callback);
                }
            }
        }
    }

    fn enter_escape(&mut self) {
        self.utf8.reset();
        self.clear_partial();
        self.state = ParserState::Escape;
    }

    fn handle_escape<F>(&mut self, byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        if self.partial.is_empty() {
            match byte {
                b'[' => {
                    self.enter_csi();
                    return;
                }
                b']' => {
                    self.osc_data.clear();
                    self.state = ParserState::OperatingSystemCommand;
                    return;
                }
                _ => {}
            }
        }

        if (0x20..0x30).contains(&byte) {
            self.collect(byte);
            return;
        }

        let action = EscAction::from_bytes(self.partial.first().copied(), byte);
        self.state = ParserState::Ground;
        self.clear_partial();
        callback(Action::Esc(action));
    }

    fn enter_csi(&mut self) {
        self.clear_partial();
        self.state = ParserState::ControlSequence;
    }

    fn handle_csi<F>(&mut self, byte: u8, callback: &mut F)
    where
        F: FnMut(Action),
    {
        if !(0x40..0x7F).contains(&byte) {
            self.collect(byte);
            return;
        }

        if self.overflow > 0 {
            log::warn!(
                "control sequence too long, dropped {} bytes before {:?}",
                self.overflow,
                byte as char
            );
        }
        let action = CsiAction::from_raw(&self.partial, byte);
        self.state = ParserState::Ground;
        self.clear_partial();
        callback(Action::Csi(action));
    }

    fn handle_osc<F>(&mut self, byte: u8, mode: InputMode, callback: &mut F)
    where
        F: FnMut(Action),
    {
        match byte {
            // 0x9C is a UTF-8 continuation byte, so only 8-bit text ends on it
            BEL => self.finish_osc(callback),
            ST_8BIT if !mode.unicode => self.finish_osc(callback),
            ESC => {
                // ESC \ terminates; the backslash arrives as StringTerminator
                callback(Action::Osc(std::mem::take(&mut self.osc_data)));
                self.enter_escape();
            }
            _ => {
                if self.osc_data.len() < MAX_OSC_LEN {
                    self.osc_data.push(byte);
                }
            }
        }
    }

    fn finish_osc<F>(&mut self, callback: &mut F)
    where
        F: FnMut(Action),
    {
        self.state = ParserState::Ground;
        callback(Action::Osc(std::mem::take(&mut self.osc_data)));
    }

    fn collect(&mut self, byte: u8) {
        if self.partial.len() < MAX_PARTIAL {
            self.partial.push(byte);
        } else {
            self.overflow += 1;
        }
    }

    fn clear_partial(&mut self) {
        self.partial.clear();
        self.overflow = 0;
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Splitting the input anywhere must not change the actions produced
        #[test]
        fn chunking_is_transparent(
            data in prop::collection::vec(any::<u8>(), 0..512),
            split in 0usize..512
        ) {
            let split = split.min(data.len());
            let whole = Parser::new().parse_collect(&data);

            let mut parser = Parser::new();
            let mut chunked = parser.parse_collect(&data[..split]);
            chunked.extend(parser.parse_collect(&data[split..]));

            prop_assert_eq!(whole, chunked);
        }

        /// A final byte always brings a control sequence back to ground
        #[test]
        fn csi_always_terminates(body in prop::collection::vec(0x20u8..0x40, 0..400)) {
            let mut parser = Parser::new();
            let mut input = b"\x1b[".to_vec();
            input.extend(&body);
            input.push(b'm');
            let actions = parser.parse_collect(&input);

            prop_assert_eq!(parser.state(), ParserState::Ground);
            prop_assert_eq!(actions.len(), 1);
        }
    }
}
