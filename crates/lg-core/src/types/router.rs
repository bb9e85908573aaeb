use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A router that can run lookups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterInfo {
    /// Display name
    #[serde(default)]
    pub name: String,

    /// Longer description shown in router menus
    #[serde(default)]
    pub description: String,
}

/// Router catalog document, keyed by router host label in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterCatalog {
    /// Routers by key
    #[serde(default)]
    pub routers: IndexMap<String, RouterInfo>,
}

impl RouterCatalog {
    /// Returns true if the catalog lists no routers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    /// Returns true if the key names a known router
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.routers.contains_key(key)
    }

    /// The router used when none is selected: the first one listed
    #[must_use]
    pub fn default_router(&self) -> Option<&str> {
        self.routers.keys().next().map(String::as_str)
    }
}
