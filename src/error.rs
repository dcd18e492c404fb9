//! Error types for the tweetsieve library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TweetsieveError`] enum. Per-document extraction failures are ordinary
//! values too; the batch layer turns them into zero feature blocks instead of
//! propagating them.
//!
//! # Examples
//!
//! ```
//! use tweetsieve::error::{Result, TweetsieveError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TweetsieveError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for tweetsieve operations.
#[derive(Error, Debug)]
pub enum TweetsieveError {
    /// I/O errors (artifact files, datasets)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, tagging, sentiment scoring)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Dataset loading errors (missing columns, bad labels)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Classifier errors (unfitted model, degenerate training data)
    #[error("Model error: {0}")]
    Model(String),

    /// A feature block or matrix does not have the width the fitted state expects.
    #[error("Feature width mismatch in {stage}: expected {expected} columns, got {actual}")]
    FeatureWidthMismatch {
        stage: String,
        expected: usize,
        actual: usize,
    },

    /// Binary serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TweetsieveError.
pub type Result<T> = std::result::Result<T, TweetsieveError>;

impl TweetsieveError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TweetsieveError::Analysis(msg.into())
    }

    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        TweetsieveError::Dataset(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        TweetsieveError::Model(msg.into())
    }

    /// Create a new width mismatch error for the named stage.
    pub fn width_mismatch<S: Into<String>>(stage: S, expected: usize, actual: usize) -> Self {
        TweetsieveError::FeatureWidthMismatch {
            stage: stage.into(),
            expected,
            actual,
        }
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TweetsieveError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        TweetsieveError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TweetsieveError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        TweetsieveError::Other(format!("Not found: {}", msg.into()))
    }
}

impl From<bincode::Error> for TweetsieveError {
    fn from(err: bincode::Error) -> Self {
        TweetsieveError::SerializationError(err.to_string())
    }
}
