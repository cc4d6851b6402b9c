//! Command execution layer for recstore
//!
//! The executor is the boundary a surrounding action framework talks to:
//! - [`Command`] / [`Output`]: typed request and response
//! - [`Context`] / [`Sink`]: per-call bundle and result emission
//! - [`Operation`]: registered operation names (`query`, `save`, `create`,
//!   `update`, `remove`)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod context;
mod executor;
mod handlers;
mod output;

pub use command::{Command, Operation};
pub use context::{Context, Payload, Sink};
pub use executor::Executor;
pub use output::Output;
