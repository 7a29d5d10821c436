//! Error types for TOON encoding and decoding.
//!
//! All failures surface through a single [`Error`] enum. Errors raised while
//! parsing or validating a specific piece of input carry 1-based line and
//! column locations.
//!
//! ## Error categories
//!
//! - **Parsing**: unexpected token, unterminated string, invalid escape,
//!   invalid number, unexpected end of input
//! - **Validation** (strict mode): array length mismatch, tabular row width,
//!   invalid indentation, duplicate key, blank line inside an array,
//!   path-expansion conflict
//! - **Encoding**: unsupported value shape, duplicate field from the
//!   serialization layer
//! - **Decoding**: type mismatch against the target type
//!
//! Errors are fatal to the current call; the codec performs no retry or
//! partial recovery.
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{from_str, Error, Value};
//!
//! let result: Result<Value, Error> = from_str("items[3]: a,b");
//! assert!(result.is_err()); // declared length 3, found 2 elements
//! ```

use std::fmt;
use thiserror::Error;

/// All errors that can occur during TOON encoding or decoding.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Syntax error while parsing TOON text
    #[error("parse error at line {line}, column {column}: {msg}")]
    Parse {
        line: usize,
        column: usize,
        msg: String,
    },

    /// Strict-mode validation failure
    #[error("validation error at line {line}, column {column}: {msg}")]
    Validation {
        line: usize,
        column: usize,
        msg: String,
    },

    /// Declared array length disagrees with the element count
    #[error("array length mismatch at line {line}: header declares {expected} elements, found {found}")]
    LengthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Value shape the encoder cannot represent
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Parsed value does not fit the requested target type
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Custom error raised through the serde traits
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a parse error with a 1-based location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::Error;
    ///
    /// let err = Error::parse(10, 5, "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn parse(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Error::Parse {
            line,
            column,
            msg: msg.into(),
        }
    }

    /// Creates a strict-mode validation error with a 1-based location.
    pub fn validation(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Error::Validation {
            line,
            column,
            msg: msg.into(),
        }
    }

    /// Creates an array length mismatch error.
    pub fn length_mismatch(line: usize, expected: usize, found: usize) -> Self {
        Error::LengthMismatch {
            line,
            expected,
            found,
        }
    }

    /// Creates an encoding error for shapes the encoder cannot represent.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Error::Encoding(msg.into())
    }

    /// Creates a type mismatch error against the decode target.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Creates an I/O error.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Returns the 1-based line number, when the error carries a location.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. }
            | Error::Validation { line, .. }
            | Error::LengthMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
