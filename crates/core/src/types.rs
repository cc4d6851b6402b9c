//! Advisory type tags
//!
//! The adapter advertises which field types it can hold. Tags are metadata
//! for the surrounding framework; the engine never checks records against them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field type tag advertised by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Short string
    String,
    /// Long-form text
    Text,
    /// Date or timestamp
    Date,
    /// Floating point number
    Float,
    /// Integer
    Integer,
    /// Any number
    Number,
    /// Boolean
    Boolean,
    /// Integer bit flags
    Bitmask,
    /// Array of values
    Array,
}

impl TypeTag {
    /// Tags supported by the in-memory adapter, in registration order
    pub const SUPPORTED: [TypeTag; 9] = [
        TypeTag::String,
        TypeTag::Text,
        TypeTag::Date,
        TypeTag::Float,
        TypeTag::Integer,
        TypeTag::Number,
        TypeTag::Boolean,
        TypeTag::Bitmask,
        TypeTag::Array,
    ];

    /// Name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Text => "text",
            TypeTag::Date => "date",
            TypeTag::Float => "float",
            TypeTag::Integer => "integer",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Bitmask => "bitmask",
            TypeTag::Array => "array",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
