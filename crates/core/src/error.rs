//! Error types for recstore
//!
//! Every failure the engine can report is an input or programmer error.
//! There are no I/O-class errors: the store is purely in-memory.

use thiserror::Error;

/// Result alias used across all recstore crates
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the store, the evaluator, and the executors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Constraint tuple is malformed, names an unknown operator, has an
    /// unparseable field path, or carries an operand of the wrong shape.
    ///
    /// Reported before any record is touched; no partial mutation is applied.
    #[error("invalid constraint: {reason}")]
    InvalidConstraint {
        /// What was wrong with the constraint
        reason: String,
    },

    /// A record or patch payload was not a JSON object
    #[error("invalid record: {reason}")]
    InvalidRecord {
        /// What was wrong with the payload
        reason: String,
    },

    /// Dispatch named an operation that is not registered
    #[error("unknown operation: {name}")]
    UnknownOperation {
        /// The requested operation name
        name: String,
    },

    /// A write was attempted against a read-only store
    #[error("store is read-only, rejected operation: {operation}")]
    ReadOnly {
        /// The rejected operation name
        operation: String,
    },

    /// Configuration text could not be parsed
    #[error("configuration error: {reason}")]
    Config {
        /// Parser message
        reason: String,
    },

    /// A layer produced an output the caller did not expect
    #[error("internal error: {reason}")]
    Internal {
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Create an InvalidConstraint error
    pub fn invalid_constraint(reason: impl Into<String>) -> Self {
        Error::InvalidConstraint {
            reason: reason.into(),
        }
    }

    /// Create an InvalidRecord error
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Error::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// Create a ReadOnly error
    pub fn read_only(operation: impl Into<String>) -> Self {
        Error::ReadOnly {
            operation: operation.into(),
        }
    }

    /// True for errors caused by a bad constraint list
    pub fn is_invalid_constraint(&self) -> bool {
        matches!(self, Error::InvalidConstraint { .. })
    }
}
