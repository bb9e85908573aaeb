use serde::{Deserialize, Serialize};

/// Registry information about an autonomous system
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AsInfo {
    /// AS number (filled from the query when the backend omits it)
    #[serde(default)]
    pub as_number: u32,

    /// Short AS name
    #[serde(default)]
    pub as_name: String,

    /// Longer description, usually the organization
    #[serde(default)]
    pub as_description: String,

    /// Two-letter country code
    #[serde(default)]
    pub as_country: String,
}

impl AsInfo {
    /// One-line summary: `AS<n> <name> <description> (<country>)`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "AS{} {} {} ({})",
            self.as_number, self.as_name, self.as_description, self.as_country
        )
    }
}
