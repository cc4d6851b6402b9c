//! Create executor: unconditional append.

use crate::engine::Engine;
use crate::evaluator::Predicate;
use recstore_core::{Record, RecordRef};
use std::sync::Arc;
use tracing::debug;

impl<P: Predicate> Engine<P> {
    /// Append `records`, in order, to the tail of `collection`.
    ///
    /// No identifier is assigned and no uniqueness check is made. Returns the
    /// appended records themselves, in input order.
    pub fn create(&self, collection: &str, records: Vec<Record>) -> Vec<RecordRef> {
        let created: Vec<RecordRef> = records.into_iter().map(Arc::new).collect();
        let handle = self.store.get_or_create(collection);
        let mut stored = handle.write();
        stored.extend(created.iter().cloned());
        debug!(
            target: "recstore::engine",
            collection,
            created = created.len(),
            total = stored.len(),
            "create"
        );
        created
    }
}
