//! Reading the file the user wants changed.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading the source file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File not found at '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a UTF-8 text file.
///
/// A missing path is reported as [`SourceError::NotFound`] before any read is
/// attempted; every other failure (permissions, directories, invalid UTF-8)
/// is a [`SourceError::Read`].
pub fn read_source(path: &Path) -> Result<String, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "print('hi')").unwrap();
        assert_eq!(read_source(file.path()).unwrap(), "print('hi')");
    }

    #[test]
    fn test_read_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(read_source(file.path()).unwrap(), "");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.py");
        let err = read_source(&path).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            format!("File not found at '{}'", path.display())
        );
    }

    #[test]
    fn test_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(dir.path()).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().starts_with("Could not read '"));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x80]).unwrap();
        let err = read_source(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
    }
}
