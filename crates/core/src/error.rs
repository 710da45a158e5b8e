//! Error types for larder
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Absence of a key is never an error: reads return `Option`, removals
//! report whether anything was deleted. Errors are reserved for I/O
//! failures, corrupt backing files, and migration misconfiguration.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for larder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the store and migration runner
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (directory creation, file read/write, rename)
    ///
    /// A mutating store operation that fails to persist surfaces this to
    /// the caller; it is never logged and swallowed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Backing file exists but cannot be parsed
    ///
    /// Fatal at construction time. Starting empty over an unreadable file
    /// would mask data loss, so the open fails instead.
    #[error("corrupt backing file {path}: {reason}")]
    Corrupt {
        /// Path of the unreadable file
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Value could not be converted to or from JSON
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A migration with this name is already registered
    #[error("duplicate migration name: {0}")]
    DuplicateMigration(String),

    /// A migration's `up` found required state missing and refused to run
    #[error("migration precondition not met: {0}")]
    Precondition(String),

    /// The ledger's most recent entry has no matching registered migration
    ///
    /// Rollback aborts without touching the ledger.
    #[error("ledger references unregistered migration: {0}")]
    UnregisteredMigration(String),

    /// Invalid operation or state
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
    }

    #[test]
    fn test_error_display_corrupt() {
        let err = Error::Corrupt {
            path: PathBuf::from("/tmp/local-storage.json"),
            reason: "expected value at line 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("corrupt backing file"));
        assert!(msg.contains("local-storage.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_error_display_serialization() {
        let err = Error::Serialization("invalid type: map".to_string());
        assert!(err.to_string().contains("serialization error"));
    }

    #[test]
    fn test_error_display_duplicate_migration() {
        let err = Error::DuplicateMigration("SeedPermissions".to_string());
        let msg = err.to_string();
        assert!(msg.contains("duplicate migration"));
        assert!(msg.contains("SeedPermissions"));
    }

    #[test]
    fn test_error_display_precondition() {
        let err = Error::Precondition("Admin permission not found".to_string());
        assert!(err.to_string().contains("precondition"));
    }

    #[test]
    fn test_error_display_unregistered_migration() {
        let err = Error::UnregisteredMigration("SeedRootUser".to_string());
        let msg = err.to_string();
        assert!(msg.contains("unregistered"));
        assert!(msg.contains("SeedRootUser"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        fn returns_error() -> Result<i32> {
            Err(Error::InvalidOperation("test".to_string()))
        }

        assert_eq!(returns_result().unwrap(), 42);
        assert!(returns_error().is_err());
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = Error::Corrupt {
            path: PathBuf::from("migrations.json"),
            reason: "trailing characters".to_string(),
        };

        match err {
            Error::Corrupt { path, reason } => {
                assert_eq!(path, PathBuf::from("migrations.json"));
                assert!(reason.contains("trailing"));
            }
            _ => panic!("Wrong error variant"),
        }
    }
}
