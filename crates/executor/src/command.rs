//! Command enum: every operation the executor accepts.

use recstore_core::{Constraint, Error, Record, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operations registered under the adapter name
///
/// `save` is an alias of `create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Read matching records
    Query,
    /// Append records (alias of create)
    Save,
    /// Append records
    Create,
    /// Merge a patch into matching records
    Update,
    /// Excise matching records
    Remove,
}

impl Operation {
    /// Every registered operation
    pub const REGISTERED: [Operation; 5] = [
        Operation::Query,
        Operation::Save,
        Operation::Create,
        Operation::Update,
        Operation::Remove,
    ];

    /// Registered name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Query => "query",
            Operation::Save => "save",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Remove => "remove",
        }
    }

    /// Fully qualified name, e.g. `memory.query`
    pub fn qualified(&self, adapter: &str) -> String {
        format!("{}.{}", adapter, self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operation::REGISTERED
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| Error::UnknownOperation {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single executor command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Trivially succeeds
    Connect {
        /// Connection name
        name: String,
    },
    /// Trivially succeeds
    Disconnect {
        /// Connection name
        name: String,
    },
    /// Reset a collection to empty, creating it if needed
    CreateCollection {
        /// Collection name
        name: String,
    },
    /// Delete a collection mapping
    RemoveCollection {
        /// Collection name
        name: String,
    },
    /// Current contents of a collection, without creating it
    FindCollection {
        /// Collection name
        name: String,
    },
    /// Names of all collections
    ListCollections,
    /// Read matching records
    Query {
        /// Collection name
        collection: String,
        /// AND-ed constraints; empty selects everything
        constraints: Vec<Constraint>,
    },
    /// Append records
    Create {
        /// Collection name
        collection: String,
        /// Records to append, in order
        records: Vec<Record>,
    },
    /// Merge `patch` into matching records
    Update {
        /// Collection name
        collection: String,
        /// AND-ed constraints; empty selects everything
        constraints: Vec<Constraint>,
        /// Fields to assign
        patch: Record,
    },
    /// Excise matching records
    Remove {
        /// Collection name
        collection: String,
        /// AND-ed constraints; absent or empty removes nothing
        constraints: Option<Vec<Constraint>>,
    },
}

impl Command {
    /// Short name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Command::Connect { .. } => "connect",
            Command::Disconnect { .. } => "disconnect",
            Command::CreateCollection { .. } => "create_collection",
            Command::RemoveCollection { .. } => "remove_collection",
            Command::FindCollection { .. } => "find_collection",
            Command::ListCollections => "list_collections",
            Command::Query { .. } => "query",
            Command::Create { .. } => "create",
            Command::Update { .. } => "update",
            Command::Remove { .. } => "remove",
        }
    }

    /// True for commands that mutate the store
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::CreateCollection { .. }
                | Command::RemoveCollection { .. }
                | Command::Create { .. }
                | Command::Update { .. }
                | Command::Remove { .. }
        )
    }
}
