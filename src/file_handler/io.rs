//! Document input and output
//!
//! Provides:
//! - markdown reading with UTF-8 / UTF-16 detection
//! - atomic output writes, so a failed render never leaves a half-written PDF
//! - an input size limit

use crate::config::MAX_FILE_SIZE;
use crate::error::{FileError, FileResult};
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

/// Detected encoding of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileEncoding {
    /// UTF-8 without BOM
    #[default]
    Utf8,
    /// UTF-8 with BOM
    Utf8Bom,
    /// UTF-16 Little Endian with BOM
    Utf16Le,
    /// UTF-16 Big Endian with BOM
    Utf16Be,
    /// Not valid UTF-8 (lossy conversion used)
    Unknown,
}

/// A decoded markdown document
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub content: String,
    pub encoding: FileEncoding,
    /// Invalid sequences were replaced with U+FFFD
    pub lossy: bool,
}

fn detect_encoding(bytes: &[u8]) -> FileEncoding {
    match bytes {
        [0xEF, 0xBB, 0xBF, ..] => FileEncoding::Utf8Bom,
        [0xFF, 0xFE, ..] => FileEncoding::Utf16Le,
        [0xFE, 0xFF, ..] => FileEncoding::Utf16Be,
        _ if std::str::from_utf8(bytes).is_ok() => FileEncoding::Utf8,
        _ => FileEncoding::Unknown,
    }
}

/// Decode bytes, returning the text and whether anything was replaced
fn decode(bytes: &[u8], encoding: FileEncoding) -> (String, bool) {
    match encoding {
        FileEncoding::Utf8 | FileEncoding::Unknown => decode_utf8(bytes),
        FileEncoding::Utf8Bom => decode_utf8(&bytes[3..]),
        FileEncoding::Utf16Le => decode_utf16(&bytes[2..], u16::from_le_bytes),
        FileEncoding::Utf16Be => decode_utf16(&bytes[2..], u16::from_be_bytes),
    }
}

fn decode_utf8(bytes: &[u8]) -> (String, bool) {
    match std::str::from_utf8(bytes) {
        Ok(s) => (s.to_string(), false),
        Err(_) => (String::from_utf8_lossy(bytes).into_owned(), true),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> (String, bool) {
    let mut lossy = bytes.len() % 2 != 0;
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    let text = char::decode_utf16(units)
        .map(|r| {
            r.unwrap_or_else(|_| {
                lossy = true;
                char::REPLACEMENT_CHARACTER
            })
        })
        .collect();
    (text, lossy)
}

/// Read a markdown document, detecting its encoding
pub fn read_document(path: impl AsRef<Path>) -> FileResult<SourceDocument> {
    let path = path.as_ref();
    let path_buf = path.to_path_buf();

    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FileError::NotFound(path_buf.clone()),
        _ => FileError::ReadError {
            path: path_buf.clone(),
            source: e,
        },
    })?;
    if !metadata.is_file() {
        return Err(FileError::NotAFile { path: path_buf });
    }
    if metadata.len() > MAX_FILE_SIZE {
        return Err(FileError::FileTooLarge {
            path: path_buf,
            size: metadata.len(),
            max_size: MAX_FILE_SIZE,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| FileError::ReadError {
        path: path_buf.clone(),
        source: e,
    })?;

    let encoding = detect_encoding(&bytes);
    let (content, lossy) = decode(&bytes, encoding);
    if lossy {
        log::warn!(
            "{} is not valid {:?}; invalid bytes were replaced",
            path.display(),
            encoding
        );
    }

    Ok(SourceDocument {
        content,
        encoding,
        lossy,
    })
}

/// Write bytes atomically: a temp file in the same directory, then rename.
///
/// The target is either fully written or left as it was.
pub fn write_output_atomic(path: impl AsRef<Path>, bytes: &[u8]) -> FileResult<()> {
    let path = path.as_ref();
    let path_buf = path.to_path_buf();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let temp_path = parent.join(format!(".{}.{}.tmp", filename, timestamp));

    let write_result = (|| {
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.flush()?;
        file.sync_all()?;
        std::fs::rename(&temp_path, path)
    })();

    if let Err(e) = write_result {
        let _ = std::fs::remove_file(&temp_path);
        return Err(FileError::WriteError {
            path: path_buf,
            source: e,
        });
    }

    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Ensure parent directory exists
pub fn ensure_parent_dir(path: impl AsRef<Path>) -> FileResult<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| FileError::DirectoryError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_encoding_utf8() {
        let bytes = "Hello, world!".as_bytes();
        assert_eq!(detect_encoding(bytes), FileEncoding::Utf8);
    }

    #[test]
    fn test_detect_encoding_utf8_bom() {
        let bytes = [0xEF, 0xBB, 0xBF, b'H', b'i'];
        assert_eq!(detect_encoding(&bytes), FileEncoding::Utf8Bom);
        assert_eq!(decode(&bytes, FileEncoding::Utf8Bom), ("Hi".to_string(), false));
    }

    #[test]
    fn test_decode_utf16() {
        let le = [0xFF, 0xFE, b'#', 0, b' ', 0, b'A', 0];
        let be = [0xFE, 0xFF, 0, b'#', 0, b' ', 0, b'A'];
        assert_eq!(decode(&le, detect_encoding(&le)), ("# A".to_string(), false));
        assert_eq!(decode(&be, detect_encoding(&be)), ("# A".to_string(), false));
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let bytes = [b'a', 0xFF, b'b'];
        assert_eq!(detect_encoding(&bytes), FileEncoding::Unknown);
        let (text, lossy) = decode(&bytes, FileEncoding::Unknown);
        assert_eq!(text, "a\u{FFFD}b");
        assert!(lossy);
    }

    #[test]
    fn test_read_document_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_document(dir.path().join("missing.md")),
            Err(FileError::NotFound(_))
        ));
        assert!(matches!(
            read_document(dir.path()),
            Err(FileError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_atomic_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("doc.md");
        ensure_parent_dir(&path).unwrap();
        write_output_atomic(&path, "# Title\n".as_bytes()).unwrap();

        let doc = read_document(&path).unwrap();
        assert_eq!(doc.content, "# Title\n");
        assert_eq!(doc.encoding, FileEncoding::Utf8);

        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
