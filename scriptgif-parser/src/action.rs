//! Terminal actions produced by the parser
//!
//! These represent the semantic meaning of parsed escape sequences.

use crate::params::Params;

/// Actions produced by the parser
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Print a decoded character (Unicode charset active)
    Print(char),

    /// Print a raw byte that the active 8-bit charset translates
    Graphic(u8),

    /// Execute a C0 control character
    Control(u8),

    /// ESC sequence (non-CSI)
    Esc(EscAction),

    /// CSI (Control Sequence Introducer) sequence
    Csi(CsiAction),

    /// OSC payload, consumed and ignored by the emulator
    Osc(Vec<u8>),
}

/// ESC sequence actions (non-CSI)
#[derive(Debug, Clone, PartialEq)]
pub enum EscAction {
    /// ESC 7 - Save cursor, attributes and charsets (DECSC)
    SaveContext,
    /// ESC 8 - Restore what ESC 7 saved (DECRC)
    RestoreContext,
    /// ESC D - Index (IND)
    Index,
    /// ESC M - Reverse Index (RI)
    ReverseIndex,
    /// ESC E - Next Line (NEL)
    NextLine,
    /// ESC H - Horizontal Tab Set (HTS)
    HorizontalTabSet,
    /// ESC c - Full Reset (RIS)
    FullReset,
    /// ESC Z - Identify terminal (DECID)
    Identify,
    /// ESC = - Application Keypad Mode (DECKPAM)
    ApplicationKeypad,
    /// ESC > - Numeric Keypad Mode (DECKPNM)
    NumericKeypad,
    /// ESC ( C - Designate G0 character set
    DesignateG0(u8),
    /// ESC ) C - Designate G1 character set
    DesignateG1(u8),
    /// ESC % C - Select character set family
    SelectCharsetFamily(u8),
    /// ESC # C - DEC line attributes / alignment test
    DecLine(u8),
    /// ESC \ - String terminator
    StringTerminator,
    /// Unknown ESC sequence: introducer (first intermediate or final byte)
    /// and the final byte when an intermediate was present
    Unknown(u8, Option<u8>),
}

impl EscAction {
    /// Map an escape sequence to its action.
    ///
    /// `intermediate` is the first buffered byte in `0x20..0x30`, if any.
    pub fn from_bytes(intermediate: Option<u8>, final_byte: u8) -> Self {
        match (intermediate, final_byte) {
            (None, b'7') => EscAction::SaveContext,
            (None, b'8') => EscAction::RestoreContext,
            (None, b'D') => EscAction::Index,
            (None, b'M') => EscAction::ReverseIndex,
            (None, b'E') => EscAction::NextLine,
            (None, b'H') => EscAction::HorizontalTabSet,
            (None, b'c') => EscAction::FullReset,
            (None, b'Z') => EscAction::Identify,
            (None, b'=') => EscAction::ApplicationKeypad,
            (None, b'>') => EscAction::NumericKeypad,
            (None, b'\\') => EscAction::StringTerminator,
            (Some(b'('), c) => EscAction::DesignateG0(c),
            (Some(b')'), c) => EscAction::DesignateG1(c),
            (Some(b'%'), c) => EscAction::SelectCharsetFamily(c),
            (Some(b'#'), c) => EscAction::DecLine(c),
            (Some(i), c) => EscAction::Unknown(i, Some(c)),
            (None, c) => EscAction::Unknown(c, None),
        }
    }
}

/// CSI sequence actions
#[derive(Debug, Clone, PartialEq)]
pub struct CsiAction {
    /// Parameters (semicolon-separated numbers)
    pub params: Params,
    /// Leading `?` marker present
    pub private: bool,
    /// Leading `<`, `=` or `>` marker. Such sequences are extensions that
    /// this emulator does not interpret.
    pub marker: Option<u8>,
    /// Final byte that determines the command
    pub final_byte: u8,
}

impl CsiAction {
    /// Build an action from the raw bytes between `CSI` and the final byte
    pub fn from_raw(raw: &[u8], final_byte: u8) -> Self {
        let (private, marker, body) = match raw.split_first() {
            Some((b'?', rest)) => (true, None, rest),
            Some((&marker, rest)) if matches!(marker, b'<' | b'=' | b'>') => {
                (false, Some(marker), rest)
            }
            _ => (false, None, raw),
        };
        Self {
            params: Params::parse(body),
            private,
            marker,
            final_byte,
        }
    }

    /// Get parameter at index with default value
    pub fn param(&self, idx: usize, default: u16) -> u16 {
        match self.params.get(idx) {
            0 => default,
            n => n,
        }
    }

    /// Get a movement count (0 or absent means 1)
    pub fn count(&self) -> u16 {
        self.params.count(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csi_private_marker() {
        let csi = CsiAction::from_raw(b"?25", b'h');
        assert!(csi.private);
        assert_eq!(csi.params.get(0), 25);
    }

    #[test]
    fn test_csi_secondary_marker() {
        let csi = CsiAction::from_raw(b">4;2", b'm');
        assert!(!csi.private);
        assert_eq!(csi.marker, Some(b'>'));
        assert_eq!(csi.params.iter().collect::<Vec<_>>(), vec![4, 2]);

        assert_eq!(CsiAction::from_raw(b"1;2", b'm').marker, None);
    }

    #[test]
    fn test_csi_param_default() {
        let csi = CsiAction::from_raw(b"", b'H');
        assert!(!csi.private);
        assert_eq!(csi.param(0, 1), 1);
        assert_eq!(csi.count(), 1);
    }

    #[test]
    fn test_esc_designations() {
        assert_eq!(
            EscAction::from_bytes(Some(b'('), b'0'),
            EscAction::DesignateG0(b'0')
        );
        assert_eq!(
            EscAction::from_bytes(Some(b')'), b'B'),
            EscAction::DesignateG1(b'B')
        );
    }

    #[test]
    fn test_esc_unknown() {
        assert_eq!(EscAction::from_bytes(None, b'q'), EscAction::Unknown(b'q', None));
        assert_eq!(
            EscAction::from_bytes(Some(b' '), b'F'),
            EscAction::Unknown(b' ', Some(b'F'))
        );
    }
}
