//! # recstore
//!
//! In-memory, constraint-driven record store.
//!
//! Records live in named, insertion-ordered collections. Reads and writes
//! select records with structured `{field, op, value}` constraints rather
//! than hand-written predicates:
//!
//! - `query`: matching records, in order (empty list: everything)
//! - `create` / `save`: append records
//! - `update`: shallow-merge a patch into matching records
//! - `remove`: excise matching records (no constraints: nothing)
//!
//! ```
//! use recstore::{Adapter, Constraint, Record};
//! use serde_json::json;
//!
//! let db = Adapter::memory();
//! db.create("c", vec![
//!     Record::try_from(json!({"id": 1, "x": 1})).unwrap(),
//!     Record::try_from(json!({"id": 2, "x": 2})).unwrap(),
//!     Record::try_from(json!({"id": 3, "x": 1})).unwrap(),
//! ]).unwrap();
//!
//! let removed = db.remove("c", Some(&[Constraint::eq("x", 1)])).unwrap();
//! assert_eq!(removed.len(), 2);
//! assert_eq!(db.query("c", &[]).unwrap().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapter;
pub mod types;

pub use adapter::Adapter;
pub use types::*;
