//! End-to-end emulator scenarios: bytes in, grid out.

use proptest::prelude::*;
use scriptgif_core::{Cell, ColorPair, Diagnostics, Dimensions, Grid, Palette, Terminal};

fn terminal(cols: usize, rows: usize) -> Terminal {
    Terminal::new(Dimensions::new(cols, rows), Diagnostics::quiet())
}

fn slots_are_permutation(grid: &Grid) -> bool {
    let mut slots = grid.slots().to_vec();
    slots.sort_unstable();
    slots == (0..grid.rows()).collect::<Vec<_>>()
}

#[test]
fn clear_screen_ignores_current_rendition() {
    let mut term = terminal(80, 24);
    term.feed_bytes(b"\x1b[1;5;7;33;45m");
    for _ in 0..24 {
        term.feed_bytes(b"################################################################################");
    }
    term.feed_bytes(b"\x1b[2J");

    let snapshot = term.snapshot();
    assert!(snapshot
        .iter_rows()
        .all(|row| row.iter().all(|cell| *cell == Cell::blank())));
}

#[test]
fn sgr_reset_applies_to_following_character() {
    let mut term = terminal(80, 24);
    term.feed_bytes(b"\x1b[31mA");
    term.feed_bytes(b"\x1b[0m");
    term.feed_bytes(b"B");

    let snapshot = term.snapshot();
    let a = snapshot.cell(0, 0).copied().unwrap_or_default();
    let b = snapshot.cell(0, 1).copied().unwrap_or_default();
    assert_eq!(a.ch, 'A');
    assert_eq!(a.pair.fg(), Palette::RED);
    assert_eq!(b.ch, 'B');
    assert_eq!(b.pair, ColorPair::default());
}

#[test]
fn newlines_scroll_first_row_out() {
    let mut term = terminal(80, 24);
    term.feed_bytes(b"first row");
    term.feed_bytes(&[b'\n'; 24]);
    term.feed_bytes(b"Z");

    let lines = term.snapshot().text_lines();
    assert!(!lines.iter().any(|line| line.contains("first row")));
    assert_eq!(lines[23].trim(), "Z");
    assert_eq!(term.snapshot().cursor().row, 23);
}

#[test]
fn recorded_shell_prompt() {
    let mut term = terminal(40, 5);
    term.feed_bytes(b"\x1b]0;user@host: ~\x07\x1b[01;32muser@host\x1b[00m:\x1b[01;34m~\x1b[00m$ ls\r\n");
    term.feed_bytes(b"Cargo.toml  src\r\n");

    let lines = term.snapshot().text_lines();
    assert_eq!(lines[0].trim_end(), "user@host:~$ ls");
    assert_eq!(lines[1].trim_end(), "Cargo.toml  src");

    let host = term.snapshot().cell(0, 0).copied().unwrap_or_default();
    assert_eq!(host.pair.fg(), Palette::GREEN);
}

#[test]
fn non_ascii_window_title_is_discarded() {
    let mut term = terminal(20, 3);
    term.feed_bytes("\x1b]0;Мир\x07$ ".as_bytes());
    term.feed_bytes("\x1b]2;~/Über\x1b\\ok".as_bytes());

    let lines = term.snapshot().text_lines();
    assert_eq!(lines[0].trim_end(), "$ ok");
    assert_eq!(term.snapshot().cursor().col, 4);
}

#[test]
fn private_marker_sequences_are_ignored() {
    let mut term = terminal(20, 3);
    // modifyOtherKeys as sent by vim, then text
    term.feed_bytes(b"\x1b[>4;2mvim\x1b[>c");

    let cell = term.snapshot().cell(0, 0).copied().unwrap_or_default();
    assert_eq!(cell.ch, 'v');
    assert_eq!(cell.pair, ColorPair::default());
    assert!(cell.attrs.is_empty());
}

#[test]
fn full_screen_app_redraw() {
    let mut term = terminal(20, 6);
    // Status line at the bottom, scrolling region above it
    term.feed_bytes(b"\x1b[6;1H\x1b[7mstatus\x1b[m\x1b[1;5r\x1b[5;1H");
    for line in 0..10 {
        term.feed_bytes(format!("\r\nline {}", line).as_bytes());
    }

    let lines = term.snapshot().text_lines();
    assert_eq!(lines[5].trim_end(), "status");
    assert_eq!(lines[4].trim_end(), "line 9");
    assert_eq!(lines[0].trim_end(), "line 5");
    assert!(slots_are_permutation(term.screen().grid()));
}

#[test]
fn overlong_sequence_does_not_break_stream() {
    let mut term = terminal(10, 2);
    let mut input = b"\x1b[".to_vec();
    input.extend(std::iter::repeat(b';').take(1000));
    input.extend(b"mok");
    term.feed_bytes(&input);

    assert_eq!(term.snapshot().text_lines()[0].trim_end(), "ok");
}

proptest! {
    /// Whatever bytes arrive, the cursor stays inside the grid
    #[test]
    fn cursor_stays_in_bounds(
        data in prop::collection::vec(any::<u8>(), 0..2048),
        cols in 1usize..40,
        rows in 1usize..20
    ) {
        let mut term = terminal(cols, rows);
        for &byte in &data {
            term.feed(byte);
            let cursor = term.snapshot().cursor();
            prop_assert!(cursor.row < rows);
            prop_assert!(cursor.col <= cols);
        }
        prop_assert!(slots_are_permutation(term.screen().grid()));
    }

    /// Escape-heavy input keeps the scroll region valid
    #[test]
    fn scroll_region_stays_valid(
        params in prop::collection::vec((0u16..30, 0u16..30), 0..20),
        rows in 1usize..20
    ) {
        let mut term = terminal(10, rows);
        for (top, bottom) in params {
            term.feed_bytes(format!("\x1b[{};{}r\x1b[5L\x1b[3M\n", top, bottom).as_bytes());
            let (t, b) = term.screen().scroll_region();
            prop_assert!(t <= b);
            prop_assert!(b < rows);
        }
    }
}
