//! Store configuration
//!
//! [`StoreConfig`] controls how the adapter facade opens a store: its
//! registered name, whether writes are permitted, and which collections are
//! provisioned up front. It can be built in code or read from TOML:
//!
//! ```toml
//! adapter_name = "memory"
//! access_mode = "read_only"
//! collections = ["users", "posts"]
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default adapter name
pub const DEFAULT_ADAPTER_NAME: &str = "memory";

/// Controls whether the store allows writes or is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Allow both reads and writes (default).
    #[default]
    ReadWrite,
    /// Read-only mode; every write operation returns an error.
    ReadOnly,
}

/// Options for opening a store.
///
/// ```
/// use recstore_core::{AccessMode, StoreConfig};
///
/// let cfg = StoreConfig::new()
///     .access_mode(AccessMode::ReadOnly)
///     .collection("users");
/// assert!(cfg.is_read_only());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Name the adapter registers its operations under
    pub adapter_name: String,
    /// The access mode for the store
    pub access_mode: AccessMode,
    /// Collections provisioned empty when the store opens
    pub collections: Vec<String>,
}

impl StoreConfig {
    /// Create a new `StoreConfig` with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the adapter name
    pub fn adapter_name(mut self, name: impl Into<String>) -> Self {
        self.adapter_name = name.into();
        self
    }

    /// Set the access mode
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Add a collection to provision on open
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collections.push(name.into());
        self
    }

    /// True when writes are rejected
    pub fn is_read_only(&self) -> bool {
        self.access_mode == AccessMode::ReadOnly
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config {
            reason: e.to_string(),
        })
    }

    /// Render configuration as TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config {
            reason: e.to_string(),
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            adapter_name: DEFAULT_ADAPTER_NAME.to_string(),
            access_mode: AccessMode::ReadWrite,
            collections: Vec::new(),
        }
    }
}
