//! VT100/ANSI escape sequence parser
//!
//! This crate implements a streaming parser for the escape sequences found in
//! recorded terminal sessions. It converts a byte stream into semantic
//! terminal actions.
//!
//! The parser is designed to:
//! - Handle arbitrary chunk boundaries (streaming)
//! - Be deterministic
//! - Never fail: malformed input degrades to replacement characters or
//!   ignored sequences
//!
//! Reference: https://vt100.net/docs/vt100-ug/chapter3.html

mod action;
mod params;
mod parser;
mod utf8;

pub use action::{Action, CsiAction, EscAction};
pub use params::{Params, MAX_PARAMS};
pub use parser::{InputMode, Parser, ParserState, MAX_PARTIAL};
