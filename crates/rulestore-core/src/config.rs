//! Store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default rule table name.
pub const DEFAULT_TABLE: &str = "casbin_rule";

/// Store configuration.
///
/// Connection management beyond opening a single SQLite database stays with
/// the caller; an already-opened connection can be handed to the store
/// directly instead of using this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file path. `None` opens an in-memory database.
    pub path: Option<PathBuf>,

    /// Rule table name.
    pub table: String,
}

impl StoreConfig {
    /// Configuration for a file-backed database.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Configuration for an in-memory database.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Set the rule table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_memory()
    }
}
