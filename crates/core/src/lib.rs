//! Core types for recstore
//!
//! This crate defines the data model shared by every layer:
//! - Record: open-ended field → value mapping
//! - FieldPath: path into a record (`user.name`, `items[0]`)
//! - Constraint / Operator: `{field, op, value}` selection tuples
//! - Error: the error taxonomy and `Result` alias
//! - StoreConfig / AccessMode: how a store is opened
//! - TypeTag: advisory field types advertised by the adapter

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod constraint;
pub mod error;
pub mod path;
pub mod record;
pub mod types;

pub use config::{AccessMode, StoreConfig};
pub use constraint::{constraints_from_json, Constraint, Operator};
pub use error::{Error, Result};
pub use path::{FieldPath, PathParseError, PathSegment};
pub use record::{records_from_value, Record, RecordRef};
pub use types::TypeTag;
