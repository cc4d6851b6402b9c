//! Query, create, update, and remove executors.

mod create;
mod query;
mod remove;
mod update;
