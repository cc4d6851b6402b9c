//! Remove executor: excision of matched records.

use crate::engine::Engine;
use crate::evaluator::Predicate;
use recstore_core::{Constraint, RecordRef, Result};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

impl<P: Predicate> Engine<P> {
    /// Remove every record of `collection` matching `constraints`.
    ///
    /// `None` or an empty list removes nothing: unlike query and update, an
    /// omitted constraint list never selects the whole collection. The
    /// collection is looked up without being created.
    ///
    /// Records are tested tail to head, and each match is pushed to the
    /// front of the result, so the removed records come back in head-to-tail
    /// order. The matches are then excised in a single `retain` pass;
    /// survivors keep their relative order.
    pub fn remove(
        &self,
        collection: &str,
        constraints: Option<&[Constraint]>,
    ) -> Result<Vec<RecordRef>> {
        let constraints = match constraints {
            Some(list) if !list.is_empty() => list,
            _ => {
                trace!(target: "recstore::engine", collection, "remove without constraints, nothing removed");
                return Ok(Vec::new());
            }
        };
        self.evaluator.validate(constraints)?;

        let Some(handle) = self.store.get(collection) else {
            trace!(target: "recstore::engine", collection, "remove on absent collection");
            return Ok(Vec::new());
        };
        let mut records = handle.write();
        let mut removed = VecDeque::new();
        let mut hits = vec![false; records.len()];

        for (i, record) in records.iter().enumerate().rev() {
            if self.evaluator.matches_validated(record, constraints) {
                hits[i] = true;
                removed.push_front(Arc::clone(record));
            }
        }

        if !removed.is_empty() {
            // retain visits every element once, in order
            let mut hits = hits.into_iter();
            records.retain(|_| !hits.next().unwrap_or(false));
        }

        debug!(
            target: "recstore::engine",
            collection,
            constraints = constraints.len(),
            removed = removed.len(),
            remaining = records.len(),
            "remove"
        );
        Ok(removed.into())
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

    fn engine_with(records: Vec<Value>) -> Engine {
        let engine = Engine::new(Arc::new(CollectionStore::new()));
        engine.create("c", records.into_iter().map(rec).collect());
        engine
    }

    fn ids(records: &[recstore_core::RecordRef]) -> Vec<Value> {
        records.iter().map(|r| r["id"].clone()).collect()
    }

    #[test]
    fn test_remove_matching_keeps_order() {
        let engine = engine_with(vec![
            json!({"id": 1, "x": 1}),
            json!({"id": 2, "x": 2}),
            json!({"id": 3, "x": 1}),
        ]);
        let removed = engine
            .remove("c", Some(&[Constraint::eq("x", 1)]))
            .unwrap();

        assert_eq!(*removed[0], rec(json!({"id": 1, "x": 1})));
        assert_eq!(*removed[1], rec(json!({"id": 3, "x": 1})));
        assert_eq!(removed.len(), 2);

        let left = engine.store().find("c").unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(*left[0], rec(json!({"id": 2, "x": 2})));
    }

    #[test]
    fn test_remove_adjacent_and_edge_matches() {
        let engine = engine_with(
            (1..=6)
                .map(|id| json!({"id": id, "hit": id % 2 == 1 || id == 6}))
                .collect(),
        );
        let removed = engine
            .remove("c", Some(&[Constraint::eq("hit", true)]))
            .unwrap();
        assert_eq!(ids(&removed), vec![json!(1), json!(3), json!(5), json!(6)]);
        assert_eq!(
            ids(&engine.store().find("c").unwrap()),
            vec![json!(2), json!(4)]
        );
    }

    #[test]
    fn test_remove_tests_tail_to_head() {
        use crate::{Predicate, StandardPredicate};
        use std::sync::Mutex;

        #[derive(Default)]
        struct RecordingPredicate {
            seen: Mutex<Vec<Value>>,
        }

        impl Predicate for RecordingPredicate {
            fn check(&self, constraint: &Constraint) -> recstore_core::Result<()> {
                StandardPredicate.check(constraint)
            }

            fn test(&self, record: &Record, constraint: &Constraint) -> bool {
                self.seen.lock().unwrap().push(record["id"].clone());
                StandardPredicate.test(record, constraint)
            }
        }

        let predicate = Arc::new(RecordingPredicate::default());
        let engine = Engine::with_predicate(Arc::new(CollectionStore::new()), Arc::clone(&predicate));
        engine.create(
            "c",
            (1..=4).map(|id| rec(json!({"id": id, "x": id % 2}))).collect(),
        );

        let removed = engine
            .remove("c", Some(&[Constraint::eq("x", 1)]))
            .unwrap();
        assert_eq!(
            *predicate.seen.lock().unwrap(),
            vec![json!(4), json!(3), json!(2), json!(1)]
        );
        assert_eq!(ids(&removed), vec![json!(1), json!(3)]);
        assert_eq!(ids(&engine.store().find("c").unwrap()), vec![json!(2), json!(4)]);
    }

    #[test]
    fn test_remove_many_matches_from_large_collection() {
        let engine = engine_with(
            (0..10_000)
                .map(|id| json!({"id": id, "even": id % 2 == 0}))
                .collect(),
        );
        let removed = engine
            .remove("c", Some(&[Constraint::eq("even", true)]))
            .unwrap();

        assert_eq!(removed.len(), 5_000);
        assert!(ids(&removed).windows(2).all(|w| w[0].as_i64() < w[1].as_i64()));
        assert_eq!(removed[0]["id"], json!(0));

        let left = engine.store().find("c").unwrap();
        assert_eq!(left.len(), 5_000);
        assert!(left
            .iter()
            .enumerate()
            .all(|(n, r)| r["id"] == json!(2 * n + 1)));
    }

    #[test]
    fn test_remove_none_removes_nothing() {
        let engine = engine_with(vec![json!({"id": 1}), json!({"id": 2})]);
        let before = engine.store().find("c").unwrap();
        assert!(engine.remove("c", None).unwrap().is_empty());
        assert_eq!(engine.store().find("c").unwrap(), before);
    }

    #[test]
    fn test_remove_empty_list_removes_nothing() {
        let engine = engine_with(vec![json!({"id": 1})]);
        assert!(engine.remove("c", Some(&[])).unwrap().is_empty());
        assert_eq!(engine.store().get("c").unwrap().len(), 1);
    }

    #[test]
    fn test_remove_no_match_leaves_collection() {
        let engine = engine_with(vec![json!({"id": 1}), json!({"id": 2})]);
        let removed = engine
            .remove("c", Some(&[Constraint::eq("id", 9)]))
            .unwrap();
        assert!(removed.is_empty());
        assert_eq!(ids(&engine.store().find("c").unwrap()), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_remove_absent_collection_does_not_create() {
        let engine = Engine::new(Arc::new(CollectionStore::new()));
        let removed = engine
            .remove("ghost", Some(&[Constraint::eq("id", 1)]))
            .unwrap();
        assert!(removed.is_empty());
        assert!(!engine.store().contains("ghost"));
    }

    #[test]
    fn test_remove_invalid_constraint_removes_nothing() {
        let engine = engine_with(vec![json!({"id": 1, "x": 1})]);
        let constraints = [
            Constraint::eq("x", 1),
            Constraint::parse("x", "lt", json!(null)).unwrap(),
        ];
        let err = engine.remove("c", Some(&constraints)).unwrap_err();
        assert!(err.is_invalid_constraint());
        assert_eq!(engine.store().get("c").unwrap().len(), 1);
    }
}
