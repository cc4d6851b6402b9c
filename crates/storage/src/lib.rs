//! Storage layer for recstore
//!
//! Holds every collection in memory. Nothing is persisted.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod store;

pub use store::{Collection, CollectionHandle, CollectionStore};
