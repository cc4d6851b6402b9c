//! The adapter facade
//!
//! [`Adapter`] is what a host framework plugs in: it owns one store, exposes
//! connection and whole-collection management, and answers the registered
//! record operations. Every method goes through the [`Executor`].

use recstore_core::{Constraint, Error, Record, RecordRef, Result, StoreConfig, TypeTag};
use recstore_engine::{Predicate, StandardPredicate};
use recstore_executor::{Command, Context, Executor, Operation, Output, Sink};

/// In-memory record store adapter
///
/// # Example
///
/// ```
/// use recstore::{Adapter, Constraint, Record};
/// use serde_json::json;
///
/// let db = Adapter::memory();
/// db.create("users", vec![
///     Record::try_from(json!({"id": 1, "role": "admin"})).unwrap(),
///     Record::try_from(json!({"id": 2, "role": "guest"})).unwrap(),
/// ]).unwrap();
///
/// let admins = db.query("users", &[Constraint::eq("role", "admin")]).unwrap();
/// assert_eq!(admins.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Adapter<P = StandardPredicate> {
    executor: Executor<P>,
}

impl Adapter<StandardPredicate> {
    /// Open a store described by `config`
    pub fn open(config: StoreConfig) -> Self {
        Self {
            executor: Executor::new(config),
        }
    }

    /// Open a read-write store with default settings
    pub fn memory() -> Self {
        Self::open(StoreConfig::default())
    }

    /// Open a store from TOML configuration text
    pub fn from_toml_str(config: &str) -> Result<Self> {
        Ok(Self::open(StoreConfig::from_toml_str(config)?))
    }
}

impl<P: Predicate> Adapter<P> {
    /// Open a store that evaluates constraints with `predicate`
    pub fn with_predicate(config: StoreConfig, predicate: P) -> Self {
        Self {
            executor: Executor::with_predicate(config, predicate),
        }
    }

    /// The executor behind this adapter
    pub fn executor(&self) -> &Executor<P> {
        &self.executor
    }

    /// Adapter name operations are registered under
    pub fn name(&self) -> &str {
        &self.executor.config().adapter_name
    }

    /// Advisory field types this adapter advertises
    pub fn types(&self) -> &'static [TypeTag] {
        &TypeTag::SUPPORTED
    }

    /// Fully qualified names of the registered operations
    pub fn operations(&self) -> Vec<String> {
        Operation::REGISTERED
            .iter()
            .map(|op| op.qualified(self.name()))
            .collect()
    }

    // =========================================================================
    // Connection (2)
    // =========================================================================

    /// Connect. Always succeeds.
    pub fn connect(&self, name: &str) -> Result<()> {
        self.expect_unit(Command::Connect {
            name: name.to_string(),
        })
    }

    /// Disconnect. Always succeeds.
    pub fn disconnect(&self, name: &str) -> Result<()> {
        self.expect_unit(Command::Disconnect {
            name: name.to_string(),
        })
    }

    // =========================================================================
    // Collections (4)
    // =========================================================================

    /// Create `name` as a new empty collection, discarding any prior contents
    pub fn create_collection(&self, name: &str) -> Result<()> {
        self.expect_unit(Command::CreateCollection {
            name: name.to_string(),
        })
    }

    /// Delete the collection `name`; returns whether it existed
    pub fn remove_collection(&self, name: &str) -> Result<bool> {
        match self.executor.execute(Command::RemoveCollection {
            name: name.to_string(),
        })? {
            Output::Bool(removed) => Ok(removed),
            other => Err(unexpected("RemoveCollection", other)),
        }
    }

    /// Current contents of `name`, or `None` if it does not exist
    pub fn find_collection(&self, name: &str) -> Result<Option<Vec<RecordRef>>> {
        match self.executor.execute(Command::FindCollection {
            name: name.to_string(),
        })? {
            Output::Collection(contents) => Ok(contents),
            other => Err(unexpected("FindCollection", other)),
        }
    }

    /// Names of all collections, sorted
    pub fn collections(&self) -> Result<Vec<String>> {
        match self.executor.execute(Command::ListCollections)? {
            Output::Names(names) => Ok(names),
            other => Err(unexpected("ListCollections", other)),
        }
    }

    // =========================================================================
    // Records (5)
    // =========================================================================

    /// Records of `collection` matching every constraint, in order
    pub fn query(&self, collection: &str, constraints: &[Constraint]) -> Result<Vec<RecordRef>> {
        self.expect_records(Command::Query {
            collection: collection.to_string(),
            constraints: constraints.to_vec(),
        })
    }

    /// Append `records` to `collection`
    pub fn create(&self, collection: &str, records: Vec<Record>) -> Result<Vec<RecordRef>> {
        self.expect_records(Command::Create {
            collection: collection.to_string(),
            records,
        })
    }

    /// Alias of [`Adapter::create`]
    pub fn save(&self, collection: &str, records: Vec<Record>) -> Result<Vec<RecordRef>> {
        self.create(collection, records)
    }

    /// Merge `patch` into matching records of `collection`
    pub fn update(
        &self,
        collection: &str,
        constraints: &[Constraint],
        patch: Record,
    ) -> Result<Vec<RecordRef>> {
        self.expect_records(Command::Update {
            collection: collection.to_string(),
            constraints: constraints.to_vec(),
            patch,
        })
    }

    /// Remove matching records from `collection`; `None` removes nothing
    pub fn remove(
        &self,
        collection: &str,
        constraints: Option<&[Constraint]>,
    ) -> Result<Vec<RecordRef>> {
        self.expect_records(Command::Remove {
            collection: collection.to_string(),
            constraints: constraints.map(<[Constraint]>::to_vec),
        })
    }

    // =========================================================================
    // Name-based dispatch
    // =========================================================================

    /// Run a registered operation by name (`query`, `memory.update`, ...)
    pub fn execute(&self, operation: &str, ctx: Context) -> Result<Vec<RecordRef>> {
        self.executor.dispatch(operation, ctx)
    }

    /// Run a registered operation, emitting to `sink` then completing
    pub fn exec(&self, operation: &str, ctx: Context, sink: &mut dyn Sink) -> Result<()> {
        self.executor.exec(operation, ctx, sink)
    }

    fn expect_unit(&self, cmd: Command) -> Result<()> {
        let name = cmd.name();
        match self.executor.execute(cmd)? {
            Output::Unit => Ok(()),
            other => Err(unexpected(name, other)),
        }
    }

    fn expect_records(&self, cmd: Command) -> Result<Vec<RecordRef>> {
        let name = cmd.name();
        match self.executor.execute(cmd)? {
            Output::Records(records) => Ok(records),
            other => Err(unexpected(name, other)),
        }
    }
}

impl Default for Adapter<StandardPredicate> {
    fn default() -> Self {
        Self::memory()
    }
}

fn unexpected(command: &str, output: Output) -> Error {
    Error::Internal {
        reason: format!("Unexpected output for {}: {:?}", command, output),
    }
}
