//! Collection and connection command handlers.
//!
//! Connect and disconnect carry no state for an in-memory store; they only log.

use recstore_core::Result;
use recstore_engine::{Engine, Predicate};
use tracing::info;

use crate::Output;

/// Handle Connect command.
pub fn connect(adapter: &str, name: &str) -> Result<Output> {
    info!(target: "recstore::executor", adapter, name, "connected");
    Ok(Output::Unit)
}

/// Handle Disconnect command.
pub fn disconnect(adapter: &str, name: &str) -> Result<Output> {
    info!(target: "recstore::executor", adapter, name, "disconnected");
    Ok(Output::Unit)
}

/// Handle CreateCollection command: reset `name` to empty.
pub fn create_collection<P: Predicate>(engine: &Engine<P>, name: &str) -> Result<Output> {
    engine.store().create(name);
    info!(target: "recstore::executor", collection = name, "collection reset");
    Ok(Output::Unit)
}

/// Handle RemoveCollection command: returns whether a collection existed.
pub fn remove_collection<P: Predicate>(engine: &Engine<P>, name: &str) -> Result<Output> {
    let removed = engine.store().remove(name);
    info!(target: "recstore::executor", collection = name, removed, "collection dropped");
    Ok(Output::Bool(removed))
}

/// Handle FindCollection command.
pub fn find_collection<P: Predicate>(engine: &Engine<P>, name: &str) -> Result<Output> {
    Ok(Output::Collection(engine.store().find(name)))
}

/// Handle ListCollections command.
pub fn list_collections<P: Predicate>(engine: &Engine<P>) -> Result<Output> {
    Ok(Output::Names(engine.store().names()))
}
