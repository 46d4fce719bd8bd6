use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::record::DisplayRecord;
use crate::translation::LineTranslator;

/// Byte offset of the first unread byte in the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TailCursor(u64);

impl TailCursor {
    pub const fn new(offset: u64) -> Self {
        Self(offset)
    }

    pub const fn offset(self) -> u64 {
        self.0
    }
}

/// I/O failures while tailing. The cursor is never advanced when one of
/// these is returned, so the next poll retries from the same offset.
#[derive(Debug, Error)]
pub enum TailError {
    #[error("Log file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read log file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Log file {} is not valid UTF-8 at byte {offset}", .path.display())]
    Encoding { path: PathBuf, offset: u64 },
}

impl TailError {
    /// Returns `true` if the log file does not exist (yet).
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    fn open(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Open {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Tails a single append-only log file and translates the newest line.
///
/// Each call reopens the file, reads from the cursor to end-of-file, and
/// closes it again. Polling needs `&mut self`, so only one owner can drive
/// a reader at a time.
#[derive(Debug)]
pub struct TailReader {
    path: PathBuf,
    cursor: TailCursor,
    translator: LineTranslator,
}

impl TailReader {
    /// Creates a reader that starts at the beginning of the file.
    pub fn new(path: impl Into<PathBuf>, translator: LineTranslator) -> Self {
        Self::with_cursor(path, translator, TailCursor::default())
    }

    /// Creates a reader that resumes from a previously observed cursor.
    pub fn with_cursor(
        path: impl Into<PathBuf>,
        translator: LineTranslator,
        cursor: TailCursor,
    ) -> Self {
        Self {
            path: path.into(),
            cursor,
            translator,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn cursor(&self) -> TailCursor {
        self.cursor
    }

    pub const fn translator(&self) -> &LineTranslator {
        &self.translator
    }

    /// Reads everything appended since the last read and advances the cursor.
    ///
    /// If the file is now shorter than the cursor (truncated or replaced),
    /// reading restarts from offset zero. An incomplete multi-byte character
    /// at end-of-file is left for the next read.
    pub fn read_appended(&mut self) -> Result<String, TailError> {
        let mut bytes = Vec::new();
        let start = {
            let mut file = File::open(&self.path).map_err(|e| TailError::open(&self.path, e))?;
            let len = file
                .metadata()
                .map_err(|e| TailError::read(&self.path, e))?
                .len();

            let mut start = self.cursor.offset();
            if len < start {
                tracing::warn!(
                    path = %self.path.display(),
                    cursor = start,
                    len,
                    "log file shrank, reading from the start"
                );
                start = 0;
            }

            file.seek(SeekFrom::Start(start))
                .map_err(|e| TailError::read(&self.path, e))?;
            file.read_to_end(&mut bytes)
                .map_err(|e| TailError::read(&self.path, e))?;
            start
        };

        let consumed = match std::str::from_utf8(&bytes) {
            Ok(_) => bytes.len(),
            // error_len() is None when the input simply ends mid-character.
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                return Err(TailError::Encoding {
                    path: self.path.clone(),
                    offset: start + e.valid_up_to() as u64,
                });
            }
        };
        bytes.truncate(consumed);

        let text = String::from_utf8(bytes).map_err(|e| TailError::Encoding {
            path: self.path.clone(),
            offset: start + e.utf8_error().valid_up_to() as u64,
        })?;

        self.cursor = TailCursor::new(start + consumed as u64);
        Ok(text)
    }

    /// Reads the lines appended since the last read, without translating them.
    pub fn read_new_lines(&mut self) -> Result<Vec<String>, TailError> {
        let text = self.read_appended()?;
        Ok(text.lines().map(str::to_string).collect())
    }

    /// Reads new lines and translates only the last one.
    ///
    /// Earlier lines of the same batch are discarded. Returns `Ok(None)` if
    /// nothing was appended or the last line matches no pattern.
    pub fn poll(&mut self) -> Result<Option<DisplayRecord>, TailError> {
        let lines = self.read_new_lines()?;
        let Some(last) = lines.last() else {
            return Ok(None);
        };

        tracing::debug!(
            lines = lines.len(),
            cursor = self.cursor.offset(),
            "read appended lines"
        );

        Ok(self
            .translator
            .translate(last.trim())
            .map(DisplayRecord::now))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::translation::Catalog;
    use std::fs::{self, OpenOptions};
    use std::io::Write;
    use tempfile::TempDir;

    fn reader_for(path: &Path) -> TailReader {
        TailReader::new(path, LineTranslator::new(Catalog::Console.table().unwrap()))
    }

    fn append(path: &Path, bytes: &[u8]) {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        file.write_all(bytes).unwrap();
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut reader = reader_for(&temp_dir.path().join("missing.log"));

        let err = reader.poll().unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
        assert_eq!(reader.cursor(), TailCursor::default());
    }

    #[test]
    fn test_crlf_lines_are_stripped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client.log");
        append(&path, b"Synced!\r\n");

        let record = reader_for(&path).poll().unwrap().unwrap();
        assert_eq!(record.text, "同步完成！");
    }

    #[test]
    fn test_unmatched_last_line_is_none_but_advances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client.log");
        append(&path, b"Synced!\nframe tick\n");

        let mut reader = reader_for(&path);
        assert!(reader.poll().unwrap().is_none());
        assert_eq!(reader.cursor().offset(), fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn test_shrunk_file_restarts_from_zero() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client.log");
        append(&path, b"a long line that will disappear\n");

        let mut reader = reader_for(&path);
        reader.poll().unwrap();

        fs::write(&path, "Synced!\n").unwrap();
        let record = reader.poll().unwrap().unwrap();
        assert_eq!(record.text, "同步完成！");
        assert_eq!(reader.cursor().offset(), 8);
    }

    #[test]
    fn test_incomplete_character_waits_for_next_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client.log");
        let text = "同步\n".as_bytes();
        // Split inside the second character.
        append(&path, &text[..4]);

        let mut reader = reader_for(&path);
        assert_eq!(reader.read_appended().unwrap(), "同");
        assert_eq!(reader.cursor().offset(), 3);

        append(&path, &text[4..]);
        assert_eq!(reader.read_appended().unwrap(), "步\n");
        assert_eq!(reader.cursor().offset(), text.len() as u64);
    }

    #[test]
    fn test_invalid_utf8_keeps_cursor() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client.log");
        append(&path, b"ok\n\xff\xfe bad\n");

        let mut reader = reader_for(&path);
        let err = reader.poll().unwrap_err();
        assert!(matches!(err, TailError::Encoding { offset: 3, .. }));
        assert_eq!(reader.cursor(), TailCursor::default());
    }

    #[test]
    fn test_blank_last_line_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client.log");
        append(&path, b"Synced!\n   \n");

        assert!(reader_for(&path).poll().unwrap().is_none());
    }
}
