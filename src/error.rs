//! Error types for the ECMA-SL interpreter

use crate::value::Location;
use thiserror::Error;

/// Main error type for the interpreter
///
/// Every variant is fatal to the step that raised it: the run loop performs
/// no local recovery and turns the error into a [`Fault`](crate::Fault).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EslError {
    #[error("UnsupportedOperator: {tag}")]
    UnsupportedOperator { tag: String },

    #[error("UnboundVariable: {name} is not bound in the current store")]
    UnboundVariable { name: String },

    #[error("UnknownLocation: {location} was never allocated")]
    UnknownLocation { location: Location },

    #[error("UnknownFunction: {name} is not defined and was not intercepted")]
    UnknownFunction { name: String },

    #[error("ArityMismatch: expected {expected} arguments, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("TypeError: {message}")]
    TypeError { message: String },

    #[error("RangeError: {message}")]
    RangeError { message: String },

    /// The program document could not be converted into a [`Program`](crate::Program)
    #[error("IngestError: {message}")]
    Ingest { message: String },
}

impl EslError {
    pub fn unsupported_operator(tag: impl Into<String>) -> Self {
        EslError::UnsupportedOperator { tag: tag.into() }
    }

    pub fn unbound(name: impl Into<String>) -> Self {
        EslError::UnboundVariable { name: name.into() }
    }

    pub fn unknown_location(location: Location) -> Self {
        EslError::UnknownLocation { location }
    }

    pub fn unknown_function(name: impl Into<String>) -> Self {
        EslError::UnknownFunction { name: name.into() }
    }

    pub fn arity_mismatch(expected: usize, found: usize) -> Self {
        EslError::ArityMismatch { expected, found }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        EslError::TypeError {
            message: message.into(),
        }
    }

    pub fn range_error(message: impl Into<String>) -> Self {
        EslError::RangeError {
            message: message.into(),
        }
    }

    pub fn ingest(message: impl Into<String>) -> Self {
        EslError::Ingest {
            message: message.into(),
        }
    }

    /// Short name of the error kind, without the message
    pub fn kind(&self) -> &'static str {
        match self {
            EslError::UnsupportedOperator { .. } => "UnsupportedOperator",
            EslError::UnboundVariable { .. } => "UnboundVariable",
            EslError::UnknownLocation { .. } => "UnknownLocation",
            EslError::UnknownFunction { .. } => "UnknownFunction",
            EslError::ArityMismatch { .. } => "ArityMismatch",
            EslError::TypeError { .. } => "TypeError",
            EslError::RangeError { .. } => "RangeError",
            EslError::Ingest { .. } => "IngestError",
        }
    }
}

impl From<serde_json::Error> for EslError {
    fn from(err: serde_json::Error) -> Self {
        EslError::ingest(err.to_string())
    }
}
