//! Command executor
//!
//! Routes each [`Command`] to its handler, enforcing the configured access
//! mode first. [`Executor::dispatch`] is the name-based entry point used by a
//! surrounding action framework: it turns a registered operation name and a
//! [`Context`] into a command.

use std::sync::Arc;

use recstore_core::{Error, RecordRef, Result, StoreConfig};
use recstore_engine::{Engine, Predicate, StandardPredicate};
use recstore_storage::CollectionStore;
use tracing::{debug, warn};

use crate::command::{Command, Operation};
use crate::context::{Context, Sink};
use crate::handlers::{collections, records};
use crate::Output;

/// Executes commands against one engine
#[derive(Debug, Clone)]
pub struct Executor<P = StandardPredicate> {
    engine: Engine<P>,
    config: StoreConfig,
}

impl Executor<StandardPredicate> {
    /// Open a fresh store described by `config`
    pub fn new(config: StoreConfig) -> Self {
        Self::with_predicate(config, StandardPredicate)
    }
}

impl<P: Predicate> Executor<P> {
    /// Open a fresh store with a custom predicate
    pub fn with_predicate(config: StoreConfig, predicate: P) -> Self {
        let store = Arc::new(CollectionStore::with_capacity(config.collections.len()));
        for name in &config.collections {
            store.create(name);
        }
        debug!(
            target: "recstore::executor",
            adapter = %config.adapter_name,
            access_mode = ?config.access_mode,
            collections = config.collections.len(),
            "store opened"
        );
        Self {
            engine: Engine::with_predicate(store, predicate),
            config,
        }
    }

    /// The engine commands run against
    pub fn engine(&self) -> &Engine<P> {
        &self.engine
    }

    /// Configuration the store was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Execute a command
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        if cmd.is_write() && self.config.is_read_only() {
            warn!(target: "recstore::executor", command = cmd.name(), "write rejected on read-only store");
            return Err(Error::read_only(cmd.name()));
        }

        let adapter = self.config.adapter_name.as_str();
        match cmd {
            Command::Connect { name } => collections::connect(adapter, &name),
            Command::Disconnect { name } => collections::disconnect(adapter, &name),
            Command::CreateCollection { name } => {
                collections::create_collection(&self.engine, &name)
            }
            Command::RemoveCollection { name } => {
                collections::remove_collection(&self.engine, &name)
            }
            Command::FindCollection { name } => collections::find_collection(&self.engine, &name),
            Command::ListCollections => collections::list_collections(&self.engine),
            Command::Query {
                collection,
                constraints,
            } => records::query(&self.engine, &collection, &constraints),
            Command::Create {
                collection,
                records: data,
            } => records::create(&self.engine, &collection, data),
            Command::Update {
                collection,
                constraints,
                patch,
            } => records::update(&self.engine, &collection, &constraints, &patch),
            Command::Remove {
                collection,
                constraints,
            } => records::remove(&self.engine, &collection, constraints.as_deref()),
        }
    }

    /// Run a registered operation by name and return its emitted records
    ///
    /// Names may be bare (`query`) or qualified with the adapter name
    /// (`memory.query`).
    pub fn dispatch(&self, operation: &str, ctx: Context) -> Result<Vec<RecordRef>> {
        let op = self.resolve_operation(operation)?;
        match self.execute(ctx.into_command(op)?)? {
            Output::Records(records) => Ok(records),
            other => Err(Error::Internal {
                reason: format!("unexpected output for {}: {:?}", op, other),
            }),
        }
    }

    /// Run a registered operation, emitting its records to `sink` and then
    /// signalling completion. On error nothing is emitted.
    pub fn exec(&self, operation: &str, ctx: Context, sink: &mut dyn Sink) -> Result<()> {
        let records = self.dispatch(operation, ctx)?;
        sink.emit(&records);
        sink.complete();
        Ok(())
    }

    fn resolve_operation(&self, operation: &str) -> Result<Operation> {
        let bare = operation
            .strip_prefix(self.config.adapter_name.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(operation);
        bare.parse()
    }
}

impl Default for Executor<StandardPredicate> {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
