//! Query executor: read-only resolution of matching records.

use crate::engine::Engine;
use crate::evaluator::Predicate;
use recstore_core::{Constraint, RecordRef, Result};
use tracing::debug;

impl<P: Predicate> Engine<P> {
    /// Matching records of `collection`, in collection order.
    ///
    /// Returns shared handles, not copies. An empty constraint list returns
    /// the whole collection. Creates the collection if it does not exist.
    pub fn query(&self, collection: &str, constraints: &[Constraint]) -> Result<Vec<RecordRef>> {
        let handle = self.store.get_or_create(collection);
        let records = handle.read();
        let selected = self.evaluator.select(&records, constraints)?;
        debug!(
            target: "recstore::engine",
            collection,
            constraints = constraints.len(),
            scanned = records.len(),
            matched = selected.len(),
            "query"
        );
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use crate::Engine;
    use recstore_core::{Constraint, Record};
    use recstore_storage::CollectionStore;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn rec(v: Value) -> Record {
        Record::try_from(v).unwrap()
    }

    fn seeded() -> Engine {
        let engine = Engine::new(Arc::new(CollectionStore::new()));
        engine.create(
            "c",
            vec![
                rec(json!({"id": 1, "x": 1})),
                rec(json!({"id": 2, "x": 2})),
                rec(json!({"id": 3, "x": 1})),
            ],
        );
        engine
    }

    #[test]
    fn test_query_filters_in_order() {
        let engine = seeded();
        let found = engine.query("c", &[Constraint::eq("x", 1)]).unwrap();
        assert_eq!(*found[0], rec(json!({"id": 1, "x": 1})));
        assert_eq!(*found[1], rec(json!({"id": 3, "x": 1})));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_query_empty_constraints_returns_all() {
        let engine = seeded();
        let all = engine.query("c", &[]).unwrap();
        assert_eq!(all, engine.store().find("c").unwrap());
    }

    #[test]
    fn test_query_shares_stored_records() {
        let engine = seeded();
        let found = engine.query("c", &[]).unwrap();
        let stored = engine.store().find("c").unwrap();
        assert!(Arc::ptr_eq(&found[2], &stored[2]));
    }

    #[test]
    fn test_query_unknown_collection_creates_it() {
        let engine = seeded();
        assert!(engine.query("fresh", &[]).unwrap().is_empty());
        assert!(engine.store().contains("fresh"));
    }

    #[test]
    fn test_query_no_match_is_not_an_error() {
        let engine = seeded();
        assert!(engine
            .query("c", &[Constraint::eq("x", 99)])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_query_invalid_constraint() {
        let engine = seeded();
        let bad = Constraint::parse("x", "gt", json!([1])).unwrap();
        assert!(engine.query("c", &[bad]).unwrap_err().is_invalid_constraint());
    }
}
