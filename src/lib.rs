//! # ungremlin
//!
//! Sanitizes text that has been through lossy encoding pipelines or
//! generative-AI tools: repairs mojibake, strips invisible and control
//! Unicode characters, removes AI formatting artifacts, and collapses
//! exotic whitespace.
//!
//! ## Quick Start
//!
//! ```
//! let cleaned = ungremlin::normalize("Hello\u{00a0}World\u{2026}\u{200b}");
//! assert_eq!(cleaned, "Hello World...");
//! ```
//!
//! ## Pipeline
//!
//! [`normalize`] runs four passes in a fixed order, each feeding the next:
//!
//! 1. **Repair** ([`repair`]) - mojibake reversal, entity decoding, ANSI
//!    escape stripping, NFC normalization
//! 2. **Substitute** ([`rules`]) - the ordered character replacement table
//! 3. **Strip artifacts** ([`artifacts`]) - markdown/instruction-tag noise
//! 4. **Whitespace** ([`whitespace`]) - horizontal and vertical collapsing
//!
//! The pipeline is a pure function of its input: deterministic, lock-free,
//! and safe to call concurrently. If anything inside it faults, the fault is
//! logged and the original input comes back unchanged; `normalize` never
//! panics past its boundary and never returns partial output.

pub mod artifacts;
pub mod error;
pub mod pipeline;
pub mod repair;
pub mod rules;
pub mod whitespace;

// Re-exports
pub use error::{Error, Result};
pub use pipeline::{normalize, normalize_batch};
pub use rules::{Matcher, ReplacementRule, RuleSet};

use std::path::Path;

/// Reads a UTF-8 text file fully into memory and normalizes it.
///
/// File problems are reported as distinct, terminal errors before the
/// pipeline ever runs: [`Error::NotFound`], [`Error::PermissionDenied`], and
/// [`Error::InvalidUtf8`].
///
/// # Example
///
/// ```no_run
/// let cleaned = ungremlin::normalize_file("document.txt")?;
/// std::fs::write("document.cleaned.txt", cleaned)?;
/// # Ok::<(), ungremlin::Error>(())
/// ```
pub fn normalize_file(path: impl AsRef<Path>) -> Result<String> {
    Ok(normalize(&read_text_file(path)?))
}

/// Reads a file fully into memory, classifying failures into the distinct
/// error variants and rejecting non-UTF-8 content before the pipeline runs.
pub fn read_text_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|err| Error::from_read(err, path))?;
    String::from_utf8(bytes).map_err(|err| Error::InvalidUtf8 {
        path: path.to_path_buf(),
        offset: err.utf8_error().valid_up_to(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Hello\u{00a0}World\u{2026}\u{200b}").unwrap();

        let cleaned = normalize_file(file.path()).unwrap();
        assert_eq!(cleaned, "Hello World...");
    }

    #[test]
    fn test_normalize_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist.txt");

        let err = normalize_file(&missing).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_normalize_file_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok so far \xFF\xFE broken").unwrap();

        let err = normalize_file(file.path()).unwrap_err();
        match err {
            Error::InvalidUtf8 { offset, .. } => assert_eq!(offset, 10),
            other => panic!("expected InvalidUtf8, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_file_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "secret").unwrap();
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o000)).unwrap();

        let result = normalize_file(file.path());
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o600)).unwrap();

        // Root bypasses permission bits, so only check the classification
        // when the read actually failed.
        if let Err(err) = result {
            assert!(matches!(err, Error::PermissionDenied(_)));
        }
    }
}
