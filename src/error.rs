//! Error types for Choco
//!
//! Provides standardized error handling across the library.

use thiserror::Error;

/// Errors that can occur in Choco
#[derive(Debug, Error)]
pub enum ChocoError {
    /// Key-value storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// A browser platform call (tabs, bookmarks, history) failed
    #[error("Platform error: {0}")]
    Platform(String),

    /// A search engine definition was rejected
    #[error("Invalid search engine: {0}")]
    InvalidEngine(String),

    /// No search engine with the given id exists
    #[error("Search engine not found: {0}")]
    EngineNotFound(String),

    /// Stored JSON had an unexpected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Choco operations
pub type ChocoResult<T> = Result<T, ChocoError>;
