//! Update executor: in-place shallow merge over matched records.

use crate::engine::Engine;
use crate::evaluator::Predicate;
use recstore_core::{Constraint, Record, RecordRef, Result};
use std::sync::Arc;
use tracing::debug;

impl<P: Predicate> Engine<P> {
    /// Merge `patch` into every record of `collection` matching `constraints`.
    ///
    /// Keys in `patch` overwrite or are added; other fields are left alone.
    /// An empty constraint list targets every record without evaluating it.
    /// An empty patch still reports the matched records.
    ///
    /// Returns the updated records in collection order. Constraints are
    /// validated before the collection is touched.
    pub fn update(
        &self,
        collection: &str,
        constraints: &[Constraint],
        patch: &Record,
    ) -> Result<Vec<RecordRef>> {
        self.evaluator.validate(constraints)?;
        let select_all = constraints.is_empty();

        let handle = self.store.get_or_create(collection);
        let mut records = handle.write();
        let mut updated = Vec::new();

        for slot in records.iter_mut() {
            if select_all || self.evaluator.matches_validated(slot, constraints) {
                if !patch.is_empty() {
                    // Copy-on-write: handles already given to callers keep their contents.
                    Arc::make_mut(slot).merge(patch);
                }
                updated.push(Arc::clone(slot));
            }
        }

        debug!(
            target: "recstore::engine",
            collection,
            constraints = constraints.len(),
            fields = patch.len(),
            updated = updated.len(),
            "update"
        );
        Ok(updated)
    }
}
