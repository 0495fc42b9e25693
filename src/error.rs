//! Error types for the Verifact library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`VerifactError`] enum. Constructor helpers are provided for the common
//! string-carrying variants.
//!
//! # Examples
//!
//! ```
//! use verifact::error::{Result, VerifactError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VerifactError::invalid_argument("Invalid input"))
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

/// The main error type for Verifact operations.
#[derive(Error, Debug)]
pub enum VerifactError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Text analysis errors (tokenization, filtering, normalization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Dataset errors (unreadable files, malformed rows, unknown labels)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Model training and prediction errors
    #[error("Model error: {0}")]
    Model(String),

    /// Model artifact errors (bad magic, version, checksum, decode)
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VerifactError.
pub type Result<T> = std::result::Result<T, VerifactError>;

impl VerifactError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        VerifactError::Analysis(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        VerifactError::Dataset(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        VerifactError::Model(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        VerifactError::Artifact(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        VerifactError::Serialization(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VerifactError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        VerifactError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        VerifactError::Other(format!("Internal error: {}", msg.into()))
    }
}
