//! Record command handlers: query, create, update, remove.

use recstore_core::{Constraint, Record, Result};
use recstore_engine::{Engine, Predicate};

use crate::Output;

/// Handle Query command.
pub fn query<P: Predicate>(
    engine: &Engine<P>,
    collection: &str,
    constraints: &[Constraint],
) -> Result<Output> {
    Ok(Output::Records(engine.query(collection, constraints)?))
}

/// Handle Create command (also reached through `save`).
pub fn create<P: Predicate>(
    engine: &Engine<P>,
    collection: &str,
    records: Vec<Record>,
) -> Result<Output> {
    Ok(Output::Records(engine.create(collection, records)))
}

/// Handle Update command.
pub fn update<P: Predicate>(
    engine: &Engine<P>,
    collection: &str,
    constraints: &[Constraint],
    patch: &Record,
) -> Result<Output> {
    Ok(Output::Records(
        engine.update(collection, constraints, patch)?,
    ))
}

/// Handle Remove command.
pub fn remove<P: Predicate>(
    engine: &Engine<P>,
    collection: &str,
    constraints: Option<&[Constraint]>,
) -> Result<Output> {
    Ok(Output::Records(engine.remove(collection, constraints)?))
}
