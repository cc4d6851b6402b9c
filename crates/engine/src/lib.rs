//! Constraint-matching and mutation engine for recstore
//!
//! - [`evaluator`]: decides which records satisfy a constraint list
//! - [`Engine`]: runs the query, create, update, and remove executors
//!   against a shared [`recstore_storage::CollectionStore`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod evaluator;
mod executors;

pub use engine::Engine;
pub use evaluator::{Evaluator, Predicate, StandardPredicate};
