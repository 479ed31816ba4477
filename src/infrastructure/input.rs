//! Byte-limited reading of the outline source.

use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use tracing::{debug, instrument};

use crate::infrastructure::{InfraError, InfraResult};

/// Default input cap: 512 KB.
pub const MAX_INPUT_BYTES: u64 = 512_000;

/// Read at most `limit` bytes and decode them as (lossy) UTF-8.
pub fn read_limited<R: Read>(reader: R, limit: u64) -> InfraResult<String> {
    let mut buf = Vec::new();
    // One extra byte tells a cut-off input from one that fits exactly.
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| InfraError::io("read input", e))?;
    let cap = usize::try_from(limit).unwrap_or(usize::MAX);
    if buf.len() > cap {
        debug!("input truncated at {} bytes", limit);
        buf.truncate(cap);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Read the outline from `path`, or from stdin when no path is given.
///
/// Returns `Ok(None)` when there is no path and stdin is an interactive
/// terminal, i.e. nothing was piped in.
#[instrument(level = "debug")]
pub fn read_source(path: Option<&Path>, limit: u64) -> InfraResult<Option<String>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| InfraError::io(format!("open {}", path.display()), e))?;
            read_limited(file, limit).map(Some)
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Ok(None);
            }
            read_limited(stdin.lock(), limit).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn given_reader_longer_than_limit_when_reading_then_truncates() {
        let text = read_limited(Cursor::new("* abcdef"), 4).unwrap();
        assert_eq!(text, "* ab");
    }

    #[test]
    fn given_reader_exactly_at_limit_when_reading_then_kept_whole() {
        let text = read_limited(Cursor::new("* abcdef"), 8).unwrap();
        assert_eq!(text, "* abcdef");
    }

    #[test]
    fn given_zero_limit_when_reading_then_empty() {
        assert_eq!(read_limited(Cursor::new("* a"), 0).unwrap(), "");
        assert_eq!(read_limited(Cursor::new(""), 0).unwrap(), "");
    }

    #[test]
    fn given_invalid_utf8_when_reading_then_replaces_lossily() {
        let text = read_limited(Cursor::new(vec![b'*', b' ', 0xff, b'x']), 100).unwrap();
        assert_eq!(text, "* \u{fffd}x");
    }

    #[test]
    fn given_file_when_reading_source_then_returns_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.txt");
        std::fs::write(&path, "* main idea\n").unwrap();

        let text = read_source(Some(&path), MAX_INPUT_BYTES).unwrap();
        assert_eq!(text.as_deref(), Some("* main idea\n"));
    }

    #[test]
    fn given_missing_file_when_reading_source_then_io_error() {
        let err = read_source(Some(Path::new("/does/not/exist.txt")), MAX_INPUT_BYTES)
            .unwrap_err();
        match err {
            InfraError::Io { source, context } => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
                assert!(context.contains("exist.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
