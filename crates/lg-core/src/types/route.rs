use serde::{Deserialize, Serialize};

/// One BGP path, in the fields both backends provide
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Destination prefix
    pub network: String,
    /// Local preference, if the backend reported one
    #[serde(default)]
    pub loc_prf: Option<u32>,
    /// Multi-exit discriminator
    pub metric: u32,
    /// AS path as text, `?` if unknown
    pub as_path: String,
    /// Next-hop addresses, `?` for a hop without one
    pub nexthops: Vec<String>,
    /// BGP origin attribute
    pub origin: String,
    /// Peer type (`external`, `internal`, ...)
    pub path_from: String,
    /// Peer router id
    pub peer_id: String,
    /// Whether the path is valid
    pub valid: bool,
    /// Table version
    pub version: u64,
    /// Whether any next hop is in use
    pub used: bool,
    /// Whether this is the best path
    pub best: bool,
    /// Why the path was selected as best
    pub selection_reason: String,
}

/// Attributes only the prefix-lookup backend reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDetails {
    /// RPKI origin validation state
    pub rpki_state: String,
    /// Standard communities
    pub community: Vec<String>,
    /// Extended communities
    pub ext_community: Vec<String>,
}

/// A normalized route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Fields common to both backends
    #[serde(flatten)]
    pub summary: RouteSummary,
    /// Extended fields, present for prefix lookups only
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub details: Option<RouteDetails>,
}

impl Route {
    /// Returns true if RPKI/community attributes are populated
    #[must_use]
    pub const fn has_details(&self) -> bool {
        self.details.is_some()
    }
}

impl From<RouteSummary> for Route {
    fn from(summary: RouteSummary) -> Self {
        Self {
            summary,
            details: None,
        }
    }
}

/// The origin AS of a prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteOrigin {
    /// Queried prefix as resolved by the router
    pub network: String,
    /// Originating AS number
    pub asn: u32,
}
