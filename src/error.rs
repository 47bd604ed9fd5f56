//! Error types for ferro-describe
//!
//! Classification of a single edit never fails. Errors come from the
//! surrounding machinery: an unsupported genetic code, input that exceeds the
//! configured length guard, and I/O or JSON handling in the front ends.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Input errors (E1xxx)
    /// Malformed input line or argument
    InvalidInput = 1001,
    /// Sequence exceeds the configured maximum length
    SequenceTooLong = 1002,

    // Translation errors (E2xxx)
    /// Genetic code table identifier not known
    UnknownGeneticCode = 2001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON serialization error
    JsonError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "invalid input",
            ErrorCode::SequenceTooLong => "sequence exceeds maximum length",
            ErrorCode::UnknownGeneticCode => "unknown genetic code table",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON serialization error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-describe operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DescribeError {
    /// No codon table exists for the requested NCBI genetic code
    #[error("Unknown genetic code table: {id}")]
    UnknownGeneticCode { id: u8 },

    /// Reference or sample sequence is longer than allowed
    #[error("Sequence too long: ref={reference}, obs={observed}, max={max}")]
    SequenceTooLong {
        reference: usize,
        observed: usize,
        max: usize,
    },

    /// Malformed input (CLI argument, input file line, config value)
    #[error("Invalid input: {msg}")]
    InvalidInput { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON serialization error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl DescribeError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        DescribeError::InvalidInput { msg: msg.into() }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DescribeError::UnknownGeneticCode { .. } => ErrorCode::UnknownGeneticCode,
            DescribeError::SequenceTooLong { .. } => ErrorCode::SequenceTooLong,
            DescribeError::InvalidInput { .. } => ErrorCode::InvalidInput,
            DescribeError::Io { .. } => ErrorCode::IoError,
            DescribeError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Get the message prefixed with its error code, e.g. `[E2001] Unknown ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for DescribeError {
    fn from(err: std::io::Error) -> Self {
        DescribeError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DescribeError {
    fn from(err: serde_json::Error) -> Self {
        DescribeError::Json {
            msg: err.to_string(),
        }
    }
}
