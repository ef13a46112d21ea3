//! Error types for flat key=value conversion.
//!
//! The flatten/unflatten core is total and never returns an error. Errors
//! come from the edges of the crate:
//!
//! - **Serde conversion**: a Rust type cannot be represented as a [`Value`](crate::Value),
//!   or a [`Value`](crate::Value) does not match the requested type
//! - **Line parsing**: a dotenv line has no `=` separator
//! - **Emission**: a list or map reached the line writer, or a non-string
//!   value was emitted on its own
//!
//! ## Examples
//!
//! ```rust
//! use serde_flatenv::dotenv::parse_lines;
//!
//! let err = parse_lines("KEY=value\nbroken").unwrap_err();
//! assert!(err.to_string().contains("line 2"));
//! ```

use std::fmt;
use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A dotenv line without a `=` separator
    #[error("invalid dotenv input line {line}: {content}")]
    InvalidLine { line: usize, content: String },

    /// A list or map was handed to the line writer
    #[error("cannot use complex value in dotenv file: {0}")]
    ComplexValue(String),

    /// Only strings can be emitted as a standalone value
    #[error("the dotenv store only supports emitting strings, got {0}")]
    UnsupportedEmit(String),

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid-line error with the 1-based line number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatenv::Error;
    ///
    /// let err = Error::invalid_line(3, "NOEQUALS");
    /// assert_eq!(err.to_string(), "invalid dotenv input line 3: NOEQUALS");
    /// ```
    pub fn invalid_line(line: usize, content: &str) -> Self {
        Error::InvalidLine {
            line,
            content: content.to_string(),
        }
    }

    /// Creates an error for a list or map that reached the line writer.
    pub fn complex_value<T: fmt::Display>(value: T) -> Self {
        Error::ComplexValue(value.to_string())
    }

    /// Creates an error for a non-string standalone emission.
    pub fn unsupported_emit(kind: &str) -> Self {
        Error::UnsupportedEmit(kind.to_string())
    }

    /// Creates an unsupported type error for types that have no [`Value`](crate::Value) form.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_flatenv::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
