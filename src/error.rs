//! Error types for the cart engine
//!
//! Cart operations themselves never fail: corrupt state and bad input degrade
//! to safe defaults. These errors cover the infrastructure underneath (storage
//! backends, configuration files, page markup).

use thiserror::Error;

/// Result type alias for fallible cart infrastructure
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur below the cart store
#[derive(Error, Debug)]
pub enum Error {
    /// A storage backend rejected a read or write
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Filesystem I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A CSS selector could not be parsed
    #[error("Invalid selector: {0}")]
    SelectorError(String),

    /// No element in the page matched a selector
    #[error("No element matches {0}")]
    ElementNotFound(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
