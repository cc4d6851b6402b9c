//! Collection store
//!
//! Maps collection names to ordered record sequences.
//!
//! # Design
//!
//! - DashMap keyed by name: get-or-create is a single `entry()` call, so a
//!   name never maps to two sequences even when racing.
//! - Each collection is an `Arc<Collection>` handle. Every operation on a
//!   name goes through the same handle, so mutation is visible to every
//!   later operation on that name.
//! - A collection's records sit behind one `RwLock`. Executors hold the lock
//!   for their whole scan-and-mutate, which makes each call atomic relative
//!   to every other call on the same collection.

use dashmap::DashMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use recstore_core::RecordRef;
use std::sync::Arc;
use tracing::{debug, trace};

/// Shared handle to a collection
pub type CollectionHandle = Arc<Collection>;

/// A named, insertion-ordered sequence of records
#[derive(Debug)]
pub struct Collection {
    name: String,
    records: RwLock<Vec<RecordRef>>,
}

impl Collection {
    /// Create a new empty collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: RwLock::new(Vec::new()),
        }
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Acquire shared access for a read-only scan
    pub fn read(&self) -> RwLockReadGuard<'_, Vec<RecordRef>> {
        self.records.read()
    }

    /// Acquire exclusive access for a scan-and-mutate
    pub fn write(&self) -> RwLockWriteGuard<'_, Vec<RecordRef>> {
        self.records.write()
    }

    /// Copy of the current record handles, in collection order
    pub fn snapshot(&self) -> Vec<RecordRef> {
        self.records.read().clone()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

/// Name → collection map
///
/// An explicit instance, constructed by the adapter and passed to the engine.
/// Dropping it drops every collection it holds.
///
/// # Example
///
/// ```
/// use recstore_storage::CollectionStore;
///
/// let store = CollectionStore::new();
/// assert!(store.find("users").is_none());
///
/// let users = store.get_or_create("users");
/// assert!(users.is_empty());
/// assert_eq!(store.find("users"), Some(vec![]));
/// ```
pub struct CollectionStore {
    collections: DashMap<String, CollectionHandle>,
}

impl CollectionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            collections: DashMap::new(),
        }
    }

    /// Create with expected number of collections
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            collections: DashMap::with_capacity(capacity),
        }
    }

    /// Get the canonical handle for `name`, creating an empty collection on
    /// first access. Never fails.
    pub fn get_or_create(&self, name: &str) -> CollectionHandle {
        if let Some(existing) = self.collections.get(name) {
            return Arc::clone(existing.value());
        }
        let handle = self
            .collections
            .entry(name.to_string())
            .or_insert_with(|| {
                trace!(target: "recstore::storage", collection = name, "lazily provisioned");
                Arc::new(Collection::new(name))
            });
        Arc::clone(handle.value())
    }

    /// Get the handle for `name` if it exists; never creates
    pub fn get(&self, name: &str) -> Option<CollectionHandle> {
        self.collections
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Reset `name` to a fresh empty collection, discarding prior contents
    pub fn create(&self, name: &str) -> CollectionHandle {
        let handle = Arc::new(Collection::new(name));
        let previous = self
            .collections
            .insert(name.to_string(), Arc::clone(&handle));
        debug!(
            target: "recstore::storage",
            collection = name,
            replaced = previous.is_some(),
            "collection created"
        );
        handle
    }

    /// Delete the mapping for `name`
    ///
    /// Returns true if a collection was removed.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.collections.remove(name).is_some();
        debug!(target: "recstore::storage", collection = name, removed, "collection removed");
        removed
    }

    /// Current contents of `name`, or `None` if absent; never creates
    pub fn find(&self, name: &str) -> Option<Vec<RecordRef>> {
        self.get(name).map(|collection| collection.snapshot())
    }

    /// Check if a collection exists
    pub fn contains(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Names of all collections, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Number of collections
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Check if the store holds no collections
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Total number of records across all collections
    pub fn total_records(&self) -> usize {
        self.collections
            .iter()
            .map(|entry| entry.value().len())
            .sum()
    }
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore")
            .field("collections", &self.len())
            .field("total_records", &self.total_records())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recstore_core::Record;
    use serde_json::json;

    fn record(v: serde_json::Value) -> RecordRef {
        Arc::new(Record::try_from(v).unwrap())
    }

    #[test]
    fn test_store_creation() {
        let store = CollectionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.total_records(), 0);
    }

    #[test]
    fn test_get_or_create_is_lazy_and_canonical() {
        let store = CollectionStore::new();
        assert!(!store.contains("users"));

        let a = store.get_or_create("users");
        let b = store.get_or_create("users");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_mutation_visible_through_later_handles() {
        let store = CollectionStore::new();
        store
            .get_or_create("users")
            .write()
            .push(record(json!({"id": 1})));

        let again = store.get_or_create("users");
        assert_eq!(again.len(), 1);
        assert_eq!(store.find("users").unwrap()[0].get("id"), Some(&json!(1)));
    }

    #[test]
    fn test_get_never_creates() {
        let store = CollectionStore::new();
        assert!(store.get("ghost").is_none());
        assert!(store.find("ghost").is_none());
        assert!(!store.contains("ghost"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_resets_contents() {
        let store = CollectionStore::new();
        store
            .get_or_create("posts")
            .write()
            .push(record(json!({"id": 1})));

        let fresh = store.create("posts");
        assert!(fresh.is_empty());
        assert_eq!(store.find("posts"), Some(vec![]));
    }

    #[test]
    fn test_remove_then_access_recreates_empty() {
        let store = CollectionStore::new();
        store
            .get_or_create("tmp")
            .write()
            .push(record(json!({"id": 1})));

        assert!(store.remove("tmp"));
        assert!(!store.remove("tmp"));
        assert!(store.find("tmp").is_none());

        let recreated = store.get_or_create("tmp");
        assert!(recreated.is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let store = CollectionStore::new();
        store.get_or_create("b");
        store.create("a");
        store.get_or_create("c");
        assert_eq!(store.names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_debug_impl() {
        let store = CollectionStore::with_capacity(4);
        let debug_str = format!("{:?}", store);
        assert!(debug_str.contains("CollectionStore"));
        assert!(debug_str.contains("total_records"));
    }

    #[test]
    fn test_concurrent_get_or_create_single_collection() {
        use std::thread;

        let store = Arc::new(CollectionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for n in 0..50 {
                        store
                            .get_or_create("shared")
                            .write()
                            .push(record(json!({"t": i, "n": n})));
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("shared").unwrap().len(), 400);
    }
}
