//! Output enum: results returned by the executor.

use recstore_core::RecordRef;

/// Result of executing a [`crate::Command`]
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// No payload
    Unit,
    /// Records emitted by query, create, update, or remove, in order
    Records(Vec<RecordRef>),
    /// Contents of a collection, or `None` if it does not exist
    Collection(Option<Vec<RecordRef>>),
    /// Boolean result
    Bool(bool),
    /// Collection names
    Names(Vec<String>),
}
