//! Error types for TOON encoding and decoding.
//!
//! Every failure mode is terminal for the call that produced it: there is no
//! retry, and a decode error leaves the destination in whatever state it had
//! reached (best-effort, not transactional). Unknown keys on decode and
//! unbound fields on encode are *not* errors; both sides skip them silently.

use std::fmt;
use thiserror::Error;

/// All errors the codec can produce.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A value's runtime shape has no TOON representation.
    #[error("unsupported kind: {0}")]
    UnsupportedKind(String),

    /// A digit-bearing token failed to parse as an integer or float.
    #[error("invalid number literal {token:?} at line {line}")]
    NumberFormat { line: usize, token: String },

    /// An array-length or field-list annotation is malformed.
    #[error("malformed array header at line {line}: {msg}")]
    HeaderFormat { line: usize, msg: String },

    /// A decoded value's kind is incompatible with its typed destination slot.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// The decode target is not a record- or map-shaped destination.
    #[error("invalid decode destination: {0}")]
    InvalidDestination(String),

    /// Input ran out while a declared element count was still unmet.
    #[error("unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: String },

    /// Nesting exceeded the decoder's recursion guard.
    #[error("nesting depth limit exceeded ({0} levels)")]
    DepthLimit(usize),

    /// IO error from the writer/reader helpers.
    #[error("IO error: {0}")]
    Io(String),

    /// Generic message, used by serde's `custom` hooks.
    #[error("{0}")]
    Message(String),
}

impl Error {
    pub fn unsupported_kind(kind: impl fmt::Display) -> Self {
        Error::UnsupportedKind(kind.to_string())
    }

    pub fn number_format(line: usize, token: &str) -> Self {
        Error::NumberFormat {
            line,
            token: token.to_string(),
        }
    }

    pub fn header_format(line: usize, msg: impl fmt::Display) -> Self {
        Error::HeaderFormat {
            line,
            msg: msg.to_string(),
        }
    }

    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn invalid_destination(msg: impl fmt::Display) -> Self {
        Error::InvalidDestination(msg.to_string())
    }

    pub fn unexpected_eof(line: usize, expected: impl fmt::Display) -> Self {
        Error::UnexpectedEof {
            line,
            expected: expected.to_string(),
        }
    }

    pub fn io(msg: impl fmt::Display) -> Self {
        Error::Io(msg.to_string())
    }

    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
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
