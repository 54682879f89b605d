//! Application error types for user-facing error handling.
//!
//! Startup failures (missing or unrecognized file) are fatal: they are
//! logged and the process exits before any window is shown. Everything else
//! surfaces as a status message while the session keeps running.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::format::{FormatError, SUPPORTED_VERSION};

/// Errors surfaced to the user, at startup or in the status bar.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// File was not found at the specified path
    #[error("The file '{}' could not be found", path.display())]
    FileNotFound { path: PathBuf },

    /// File exists but cannot be read (permissions, locked, etc.)
    #[error("Could not read '{}': {reason}", path.display())]
    FileRead { path: PathBuf, reason: String },

    /// File is not an SCT container or its header is corrupt
    #[error("'{}' is not a recognized SCT file: {message}", path.display())]
    InvalidFormat { path: PathBuf, message: String },

    /// Container version is newer than this viewer
    #[error("'{}' uses SCT version {found}; this viewer supports version {supported}", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    /// The requested event index does not exist
    #[error("Event index {index} is out of range; the file holds {count} events")]
    EventOutOfRange { index: usize, count: usize },

    /// A single event record failed to decode
    #[error("Failed to decode event {index}: {message}")]
    EventDecode { index: usize, message: String },

    /// Settings could not be saved
    #[error("Could not save settings: {reason}")]
    SettingsSave { reason: String },
}

/// Classify an I/O failure while opening `path`.
pub fn from_io_error(path: PathBuf, error: std::io::Error) -> AppError {
    match error.kind() {
        std::io::ErrorKind::NotFound => AppError::FileNotFound { path },
        std::io::ErrorKind::PermissionDenied => AppError::FileRead {
            path,
            reason: "Permission denied".to_string(),
        },
        _ => AppError::FileRead {
            path,
            reason: error.to_string(),
        },
    }
}

/// Lift a container-header failure into a user-facing error.
pub fn from_format_error(path: &Path, error: FormatError) -> AppError {
    match error {
        FormatError::UnsupportedVersion { found } => AppError::UnsupportedVersion {
            path: path.to_path_buf(),
            found,
            supported: SUPPORTED_VERSION,
        },
        FormatError::EventOutOfRange { index, count } => {
            AppError::EventOutOfRange { index, count }
        }
        other => AppError::InvalidFormat {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_error_not_found() {
        let path = PathBuf::from("/test/run42.sct");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");

        match from_io_error(path.clone(), io_error) {
            AppError::FileNotFound { path: p } => assert_eq!(p, path),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_io_error_permission_denied() {
        let path = PathBuf::from("/test/run42.sct");
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");

        match from_io_error(path.clone(), io_error) {
            AppError::FileRead { path: p, reason } => {
                assert_eq!(p, path);
                assert!(reason.contains("Permission"));
            }
            other => panic!("Expected FileRead, got {:?}", other),
        }
    }

    #[test]
    fn test_from_format_error_version() {
        let error = from_format_error(
            Path::new("/test/run42.sct"),
            FormatError::UnsupportedVersion { found: 7 },
        );
        match error {
            AppError::UnsupportedVersion {
                found, supported, ..
            } => {
                assert_eq!(found, 7);
                assert_eq!(supported, SUPPORTED_VERSION);
            }
            other => panic!("Expected UnsupportedVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_from_format_error_magic() {
        let error = from_format_error(
            Path::new("/test/run42.sct"),
            FormatError::InvalidMagic { found: *b"ROOT" },
        );
        assert!(matches!(error, AppError::InvalidFormat { .. }));
        assert!(error.to_string().contains("not a recognized SCT file"));
    }
}
