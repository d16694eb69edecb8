//! Error types for the ungremlin library.
//!
//! The normalization pipeline itself never fails (see [`crate::pipeline`]);
//! these errors only arise in the file-reading conveniences used by the CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ungremlin operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ungremlin library.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file does not exist.
    #[error("input file not found: {0}")]
    NotFound(PathBuf),

    /// The input file exists but cannot be read.
    #[error("permission denied reading {0}")]
    PermissionDenied(PathBuf),

    /// The input file is not valid UTF-8.
    #[error("{path} is not valid UTF-8 (byte offset {offset})")]
    InvalidUtf8 { path: PathBuf, offset: usize },

    /// Any other I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Classifies an I/O error from reading `path` into a distinct variant.
    pub(crate) fn from_read(err: io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Error::PermissionDenied(path.to_path_buf()),
            _ => Error::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_classification() {
        let path = std::path::Path::new("missing.txt");

        let not_found = Error::from_read(io::Error::from(io::ErrorKind::NotFound), path);
        assert!(matches!(not_found, Error::NotFound(_)));

        let denied = Error::from_read(io::Error::from(io::ErrorKind::PermissionDenied), path);
        assert!(matches!(denied, Error::PermissionDenied(_)));

        let other = Error::from_read(io::Error::from(io::ErrorKind::TimedOut), path);
        assert!(matches!(other, Error::Io(_)));
    }

    #[test]
    fn test_error_messages_are_distinct() {
        let path = std::path::Path::new("input.txt");

        let not_found = Error::NotFound(path.to_path_buf()).to_string();
        let denied = Error::PermissionDenied(path.to_path_buf()).to_string();
        let bad_utf8 = Error::InvalidUtf8 {
            path: path.to_path_buf(),
            offset: 12,
        }
        .to_string();

        assert!(not_found.contains("not found"));
        assert!(denied.contains("permission denied"));
        assert!(bad_utf8.contains("not valid UTF-8"));
        assert!(bad_utf8.contains("12"));
    }
}
