//! Loading configuration documents from disk or text.

use std::{fs, path::Path};

use serde_json::Value;
use tracing::info;

use crate::{Config, Error, excerpt_at};

/// Byte order mark some editors prepend to UTF-8 files.
const BOM: char = '\u{feff}';

/// Read and parse the configuration file at `path`.
///
/// The bytes are decoded as UTF-8 (invalid sequences replaced) and a leading
/// byte-order mark is skipped.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    let bytes = fs::read(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    info!("Load {}, size {}", path.display(), bytes.len());
    if bytes.is_empty() {
        return Err(Error::Empty {
            path: Some(path.to_path_buf()),
        });
    }
    let text = String::from_utf8_lossy(&bytes);
    load_from_str(&text).map_err(|e| e.with_path(path))
}

/// Parse a configuration document from text.
///
/// Text that holds no JSON value, including whitespace only, is a parse
/// error; only a zero-length file is [`Error::Empty`].
pub fn load_from_str(text: &str) -> Result<Config, Error> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let value: Value = serde_json::from_str(text).map_err(|e| {
        let (line, col) = (e.line(), e.column());
        Error::Parse {
            path: None,
            line,
            col,
            message: e.to_string(),
            excerpt: excerpt_at(text, line, col),
        }
    })?;
    info!("JSON Loaded");
    Ok(Config::from_value(&value))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        let err = load_from_path(&path).expect_err("should fail");
        assert!(matches!(err, Error::Read { .. }));
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn empty_file_is_empty_error() {
        let file = tempfile::NamedTempFile::new().expect("tempfile");
        let err = load_from_path(file.path()).expect_err("should fail");
        assert!(matches!(err, Error::Empty { .. }));
    }

    #[test]
    fn parse_error_carries_location() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "{{\n  \"hotkey\": [\n    {{\"key\": }}\n  ]\n}}").expect("write");
        let err = load_from_path(file.path()).expect_err("should fail");
        match &err {
            Error::Parse {
                line, excerpt, path, ..
            } => {
                assert_eq!(*line, 3);
                assert!(excerpt.contains('^'));
                assert_eq!(path.as_deref(), Some(file.path()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.pretty().starts_with("Invalid JSON at "));
    }

    #[test]
    fn bom_is_skipped() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(b"\xEF\xBB\xBF{\"hotkey\": [{\"key\": \"f1\", \"exec\": \"a.exe\"}]}")
            .expect("write");
        let cfg = load_from_path(file.path()).expect("load");
        assert_eq!(cfg.hotkey.len(), 1);
        assert_eq!(cfg.hotkey[0].exec.as_deref(), Some("a.exe"));
    }

    #[test]
    fn whitespace_only_text_is_parse_error() {
        for text in [" ", "\n", "  \n", "\u{feff}"] {
            let err = load_from_str(text).expect_err("should fail");
            assert!(matches!(err, Error::Parse { .. }), "{:?}: {:?}", text, err);
        }
    }

    #[test]
    fn whitespace_only_file_is_parse_error_with_path() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(b"\xEF\xBB\xBF \r\n").expect("write");
        match load_from_path(file.path()).expect_err("should fail") {
            Error::Parse { path, line, .. } => {
                assert_eq!(path.as_deref(), Some(file.path()));
                assert!(line >= 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
