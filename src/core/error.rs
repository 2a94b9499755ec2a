//! Error handling and error types for the iteration sampler.
//!
//! Every fallible operation in the crate returns [`Result`], which carries a
//! [`SamplerError`]. The binary wraps these in `anyhow` for top-level context.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for the iteration sampler.
#[derive(Error, Debug)]
pub enum SamplerError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Rejected value
        value: String,
        /// Constraint the value violates
        reason: String,
    },

    /// The scan root is missing or is not a directory
    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound {
        /// Requested scan root
        path: PathBuf,
    },

    /// A matched file could not be read as a delimited table
    #[error("Table error in {}: {message}", path.display())]
    Table {
        /// Offending file
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        /// Underlying error
        #[from]
        source: io::Error,
    },

    /// CSV parsing or writing errors
    #[error("CSV error: {source}")]
    Csv {
        /// Underlying error
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        /// Underlying error
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Results using SamplerError
pub type Result<T> = std::result::Result<T, SamplerError>;

impl SamplerError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        SamplerError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        SamplerError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing directory error
    pub fn directory_not_found<P: AsRef<Path>>(path: P) -> Self {
        SamplerError::DirectoryNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a table error for the given file
    pub fn table<P: AsRef<Path>, S: Into<String>>(path: P, message: S) -> Self {
        SamplerError::Table {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SamplerError::Config { .. } => "config",
            SamplerError::InvalidParameter { .. } => "invalid_parameter",
            SamplerError::DirectoryNotFound { .. } => "directory_not_found",
            SamplerError::Table { .. } => "table",
            SamplerError::IO { .. } => "io",
            SamplerError::Csv { .. } => "csv",
            SamplerError::Json { .. } => "json",
        }
    }

    /// Whether a run may skip the offending file and carry on.
    ///
    /// Only per-file failures qualify; a bad configuration or a missing scan
    /// root always aborts the run.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            SamplerError::Table { .. } | SamplerError::IO { .. } | SamplerError::Csv { .. }
        )
    }
}
