//! Public types for the recstore API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Data model
pub use recstore_core::{Constraint, FieldPath, Operator, Record, RecordRef};

// Advisory type tags
pub use recstore_core::TypeTag;

// Configuration
pub use recstore_core::{AccessMode, StoreConfig};

// Errors
pub use recstore_core::{Error, Result};

// Call context and emission
pub use recstore_executor::{Context, Operation, Payload, Sink};

// Pluggable predicate
pub use recstore_engine::{Predicate, StandardPredicate};
