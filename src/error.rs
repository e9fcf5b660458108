//! Error types for the Panagram library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`PanagramError`] enum.
//!
//! # Examples
//!
//! ```
//! use panagram::error::{PanagramError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PanagramError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Panagram operations.
///
/// This enum represents all possible errors that can occur in the Panagram
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum PanagramError {
    /// I/O errors (dictionary files, output destinations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dictionary-related errors (loading, malformed word lists)
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Search-related errors (invalid query phrases, aborted searches)
    #[error("Search error: {0}")]
    Search(String),

    /// Resource exhausted (worker or buffer allocation failure)
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PanagramError.
pub type Result<T> = std::result::Result<T, PanagramError>;

impl PanagramError {
    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        PanagramError::Dictionary(msg.into())
    }

    /// Create a new search error.
    pub fn search<S: Into<String>>(msg: S) -> Self {
        PanagramError::Search(msg.into())
    }

    /// Create a new resource exhausted error.
    pub fn resource_exhausted<S: Into<String>>(msg: S) -> Self {
        PanagramError::ResourceExhausted(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        PanagramError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        PanagramError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PanagramError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = PanagramError::dictionary("Test dictionary error");
        assert_eq!(
            error.to_string(),
            "Dictionary error: Test dictionary error"
        );

        let error = PanagramError::search("Test search error");
        assert_eq!(error.to_string(), "Search error: Test search error");

        let error = PanagramError::resource_exhausted("out of workers");
        assert_eq!(error.to_string(), "Resource exhausted: out of workers");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let panagram_error = PanagramError::from(io_error);

        match panagram_error {
            PanagramError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
