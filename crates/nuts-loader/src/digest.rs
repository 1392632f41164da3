//! # Workbook Integrity
//!
//! The published workbook is pinned to a known SHA-256. Checking the local
//! copy before reading it catches truncated or silently replaced downloads
//! before they turn into a partial region table.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{read_file, LoadError, LoadResult};

/// SHA-256 hex digest pattern: exactly 64 lowercase hex characters.
pub fn is_valid_sha256(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}

/// Lowercase hex SHA-256 of a byte slice.
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes).iter().map(|b| format!("{b:02x}")).collect()
}

/// Verify that the file at `path` hashes to `expected`.
///
/// # Errors
///
/// - [`LoadError::InvalidDigest`] if `expected` is not 64 lowercase hex chars.
/// - [`LoadError::FileNotFound`] / [`LoadError::Io`] if the file can't be read.
/// - [`LoadError::DigestMismatch`] if the contents hash differently.
pub fn verify_sha256(path: &Path, expected: &str) -> LoadResult<()> {
    if !is_valid_sha256(expected) {
        return Err(LoadError::InvalidDigest {
            digest: expected.to_string(),
        });
    }
    let actual = sha256_hex(&read_file(path)?);
    if actual != expected {
        return Err(LoadError::DigestMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }
    tracing::debug!(path = %path.display(), "workbook digest verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-256 of the ASCII bytes "abc".
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn known_vector() {
        assert_eq!(sha256_hex(b"abc"), ABC_SHA256);
    }

    #[test]
    fn digest_shape() {
        assert!(is_valid_sha256(ABC_SHA256));
        assert!(!is_valid_sha256(&ABC_SHA256.to_uppercase()));
        assert!(!is_valid_sha256("abc"));
        assert!(!is_valid_sha256(&"g".repeat(64)));
    }

    #[test]
    fn verify_matching_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        std::fs::write(&path, b"abc").unwrap();
        assert!(verify_sha256(&path, ABC_SHA256).is_ok());
    }

    #[test]
    fn verify_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        std::fs::write(&path, b"abd").unwrap();
        let err = verify_sha256(&path, ABC_SHA256).unwrap_err();
        match err {
            LoadError::DigestMismatch { expected, actual, .. } => {
                assert_eq!(expected, ABC_SHA256);
                assert_ne!(actual, ABC_SHA256);
            }
            other => panic!("expected DigestMismatch, got {other:?}"),
        }
    }

    #[test]
    fn verify_rejects_malformed_digest_before_reading() {
        let err = verify_sha256(Path::new("/nonexistent/book.xlsx"), "xyz").unwrap_err();
        assert!(matches!(err, LoadError::InvalidDigest { .. }));
    }

    #[test]
    fn verify_missing_file() {
        let err = verify_sha256(Path::new("/nonexistent/book.xlsx"), ABC_SHA256).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }
}
