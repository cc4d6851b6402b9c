//! The engine: a collection store paired with an evaluator
//!
//! `Engine` is a stateless facade over a shared [`CollectionStore`]. The
//! four executors are implemented as methods in [`crate::executors`]:
//!
//! | Executor | Collection lookup | Empty constraint list |
//! |----------|-------------------|-----------------------|
//! | query    | get-or-create     | every record          |
//! | create   | get-or-create     | not consulted         |
//! | update   | get-or-create     | every record          |
//! | remove   | get (no create)   | no record             |
//!
//! Each executor takes the collection lock once and holds it for the whole
//! scan, so two calls on the same collection never interleave.

use crate::evaluator::{Evaluator, Predicate, StandardPredicate};
use recstore_storage::CollectionStore;
use std::sync::Arc;

/// Constraint-matching and mutation engine
///
/// Clone is cheap: clones share the same store.
///
/// # Example
///
/// ```
/// use recstore_engine::Engine;
/// use recstore_core::{Constraint, Record};
/// use recstore_storage::CollectionStore;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let engine = Engine::new(Arc::new(CollectionStore::new()));
/// engine.create("users", vec![Record::try_from(json!({"id": 1})).unwrap()]);
///
/// let found = engine.query("users", &[Constraint::eq("id", 1)]).unwrap();
/// assert_eq!(found.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Engine<P = StandardPredicate> {
    pub(crate) store: Arc<CollectionStore>,
    pub(crate) evaluator: Evaluator<P>,
}

impl Engine<StandardPredicate> {
    /// Create an engine with the default operator set
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self::with_predicate(store, StandardPredicate)
    }
}

impl<P: Predicate> Engine<P> {
    /// Create an engine with a custom predicate
    pub fn with_predicate(store: Arc<CollectionStore>, predicate: P) -> Self {
        Self {
            store,
            evaluator: Evaluator::with_predicate(predicate),
        }
    }

    /// The shared store
    pub fn store(&self) -> &Arc<CollectionStore> {
        &self.store
    }

    /// The evaluator used by every executor
    pub fn evaluator(&self) -> &Evaluator<P> {
        &self.evaluator
    }
}
