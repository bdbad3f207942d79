//! File reads.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{PersistenceError, Result};

/// Read a UTF-8 file, returning `None` when it does not exist.
pub fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PersistenceError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_if_exists(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn test_read_directory_is_error() {
        let dir = tempdir().unwrap();
        let result = read_if_exists(dir.path());
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
    }
}
