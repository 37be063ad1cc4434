//! Final screen dumps

use std::fs;
use std::path::Path;

use scriptgif_core::Snapshot;

use crate::error::{Error, Result};

fn write(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the screen as plain text, one line per row. Characters outside
/// printable ASCII become spaces.
pub fn write_text(path: &Path, snapshot: &Snapshot<'_>) -> Result<()> {
    write(path, snapshot.to_ascii_text().as_bytes())?;
    log::info!("Wrote text dump to {}", path.display());
    Ok(())
}

/// Write the screen, cursor and modes as JSON
pub fn write_json(path: &Path, snapshot: &Snapshot<'_>) -> Result<()> {
    let json = snapshot.to_dump().to_json()?;
    write(path, json.as_bytes())?;
    log::info!("Wrote JSON dump to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptgif_core::{Diagnostics, Dimensions, ScreenDump, Terminal};

    #[test]
    fn test_text_and_json_dumps() {
        let dir = tempfile::tempdir().unwrap();
        let mut term = Terminal::new(Dimensions::new(5, 2), Diagnostics::quiet());
        term.feed_bytes("a\u{2500}b\r\nok".as_bytes());

        let text_path = dir.path().join("screen.txt");
        write_text(&text_path, &term.snapshot()).unwrap();
        assert_eq!(fs::read_to_string(&text_path).unwrap(), "a b  \nok   \n");

        let json_path = dir.path().join("screen.json");
        write_json(&json_path, &term.snapshot()).unwrap();
        let dump = ScreenDump::from_json(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(dump, term.snapshot().to_dump());
    }

    #[test]
    fn test_unwritable_path() {
        let term = Terminal::new(Dimensions::new(5, 2), Diagnostics::quiet());
        let err = write_text(Path::new("/nonexistent/dir/screen.txt"), &term.snapshot());
        assert!(matches!(err, Err(Error::Output { .. })));
    }
}
