//! Piece config persistence.
//!
//! The config file is the serialized [`Piece`] as pretty-printed JSON. A
//! missing or malformed file on read means "no prior piece" and yields
//! `None`; only writes can fail.

use std::fs;
use std::path::Path;

use crate::error::ConfigResult;
use crate::models::Piece;

/// Read a piece from `path`. Missing, unreadable or malformed files all
/// start a fresh piece rather than failing.
pub fn read_piece(path: &Path) -> Option<Piece> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write the piece to `path`, creating parent directories as needed.
pub fn write_piece(path: &Path, piece: &Piece) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(piece)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Composer, Headers};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let dir = tempdir().unwrap();
        assert!(read_piece(&dir.path().join("absent.json")).is_none());
    }

    #[test]
    fn test_malformed_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("piece.json");
        fs::write(&path, "not json at all").unwrap();
        assert!(read_piece(&path).is_none());
    }

    #[test]
    fn test_roundtrip_preserves_piece() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("piece.json");
        let mut piece = Piece::default();
        piece.opus = Some("Op. 18".into());
        piece.headers = Some(Headers::new("String Quartet No. 1", Composer::new("Beethoven")));
        write_piece(&path, &piece).unwrap();
        assert_eq!(read_piece(&path), Some(piece));
    }
}
