//! Error types for Treeline operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Treeline crates. Uses `thiserror` for derive macros.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Treeline operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The graph store rejected or failed an operation.
    #[error("Store error: {0}")]
    Store(String),

    /// A seed dataset failed validation before anything was written.
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create an invalid seed error.
    pub fn invalid_seed(msg: impl Into<String>) -> Self {
        Self::InvalidSeed(msg.into())
    }

    /// Wrap an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for errors raised by the graph store itself.
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Result type alias using Treeline's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = Error::store("connection refused");
        assert_eq!(err.to_string(), "Store error: connection refused");
        assert!(err.is_store());
    }

    #[test]
    fn test_invalid_seed_display() {
        let err = Error::invalid_seed("duplicate node name 'A'");
        assert!(err.to_string().contains("duplicate node name 'A'"));
        assert!(!err.is_store());
    }

    #[test]
    fn test_io_with_path_display() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(source, "/tmp/seed.toml");
        let text = err.to_string();
        assert!(text.contains("/tmp/seed.toml"));
        assert!(text.contains("missing"));
    }

    #[test]
    fn test_io_from() {
        let source = std::io::Error::other("boom");
        let err: Error = source.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_constructors() {
        assert!(matches!(Error::config("x"), Error::Config(_)));
        assert!(matches!(Error::not_found("x"), Error::NotFound(_)));
        assert!(matches!(Error::invalid_data("x"), Error::InvalidData(_)));
        assert!(matches!(Error::serialization("x"), Error::Serialization(_)));
    }
}
