//! Command handlers, grouped by what they act on.

pub mod collections;
pub mod records;
