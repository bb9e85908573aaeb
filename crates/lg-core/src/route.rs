//! Route normalization.
//!
//! Routers answer route queries in one of two JSON shapes. A prefix lookup
//! returns `{prefix, paths: [...]}` with structured AS-path, peer and
//! best-path objects. An ASN lookup returns `{routes: {<prefix>: [...]}}`
//! with flat strings instead. [`RoutePayload`] decides the shape once, when
//! the payload is decoded, and both shapes normalize into [`Route`].

use crate::error::{GlassError, Result};
use crate::types::{Route, RouteDetails, RouteOrigin, RouteSummary};
use serde::{Deserialize, Deserializer};
use indexmap::IndexMap;
use serde_json::Value;

const UNKNOWN: &str = "?";
const AS_SET: &str = "as-set";

/// A decoded route query result
#[derive(Debug, Clone, PartialEq)]
pub enum RoutePayload {
    /// Paths under a single prefix (prefix lookups)
    Prefix(PrefixPaths),
    /// Paths keyed by prefix (ASN lookups)
    Table(RouteTable),
}

/// Paths for one prefix, with structured attributes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PrefixPaths {
    prefix: String,
    #[serde(default)]
    paths: Vec<PrefixPath>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrefixPath {
    #[serde(default)]
    aspath: Option<AsPath>,
    #[serde(default)]
    peer: Option<Peer>,
    #[serde(default)]
    rpki_validation_state: Option<String>,
    #[serde(default)]
    community: Option<CommunityList>,
    #[serde(default)]
    extended_community: Option<CommunityList>,
    #[serde(default)]
    bestpath: Option<BestPath>,
    #[serde(flatten)]
    common: PathAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct AsPath {
    #[serde(default)]
    string: Option<String>,
    #[serde(default)]
    segments: Vec<AsPathSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct AsPathSegment {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    list: Vec<AsnValue>,
}

/// Routers send ASNs as numbers, some as strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum AsnValue {
    Number(u64),
    Text(String),
}

impl AsnValue {
    fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Number(n) => u32::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Peer {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    peer_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct CommunityList {
    #[serde(default)]
    string: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BestPath {
    #[serde(default)]
    overall: bool,
    #[serde(default)]
    selection_reason: Option<String>,
}

/// Paths keyed by prefix, with flat attributes, in backend order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RouteTable {
    #[serde(default)]
    routes: IndexMap<String, Vec<TablePath>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TablePath {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    path_from: Option<String>,
    #[serde(default)]
    peer_id: Option<String>,
    /// `Some` whenever the key is present, even when its value is null
    #[serde(default, deserialize_with = "present")]
    selection_reason: Option<Option<String>>,
    #[serde(flatten)]
    common: PathAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PathAttributes {
    #[serde(default)]
    loc_prf: Option<u32>,
    #[serde(default)]
    metric: Option<u32>,
    #[serde(default)]
    nexthops: Vec<Option<NextHop>>,
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    valid: bool,
    #[serde(default)]
    version: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct NextHop {
    #[serde(default)]
    ip: Option<String>,
    #[serde(default)]
    used: bool,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn split_communities(list: Option<CommunityList>) -> Vec<String> {
    list.and_then(|c| c.string)
        .map(|s| s.split(' ').map(str::trim).filter(|c| !c.is_empty()).map(String::from).collect())
        .unwrap_or_default()
}

impl PathAttributes {
    fn summarize(
        self,
        network: &str,
        as_path: String,
        path_from: String,
        peer_id: String,
        best: bool,
        selection_reason: String,
    ) -> RouteSummary {
        let used = self.nexthops.iter().flatten().any(|hop| hop.used);
        let nexthops = self
            .nexthops
            .into_iter()
            .map(|hop| or_unknown(hop.and_then(|h| h.ip)))
            .collect();

        RouteSummary {
            network: network.to_string(),
            loc_prf: self.loc_prf,
            metric: self.metric.unwrap_or(0),
            as_path,
            nexthops,
            origin: self.origin.unwrap_or_default(),
            path_from,
            peer_id,
            valid: self.valid,
            version: self.version,
            used,
            best,
            selection_reason,
        }
    }
}

impl PrefixPath {
    fn into_route(self, network: &str) -> Route {
        let as_path = or_unknown(self.aspath.and_then(|p| p.string));
        let peer = self.peer.unwrap_or_default();
        let bestpath = self.bestpath.unwrap_or_default();

        let summary = self.common.summarize(
            network,
            as_path,
            or_unknown(peer.kind),
            or_unknown(peer.peer_id),
            bestpath.overall,
            bestpath.selection_reason.unwrap_or_default(),
        );

        Route {
            summary,
            details: Some(RouteDetails {
                rpki_state: or_unknown(self.rpki_validation_state),
                community: split_communities(self.community),
                ext_community: split_communities(self.extended_community),
            }),
        }
    }

    /// Origin ASNs from the last AS-path segment
    fn origins(&self) -> Vec<u32> {
        let Some(last) = self.aspath.as_ref().and_then(|p| p.segments.last()) else {
            return Vec::new();
        };
        if last.kind == AS_SET {
            last.list.iter().filter_map(AsnValue::as_u32).collect()
        } else {
            last.list.last().and_then(AsnValue::as_u32).into_iter().collect()
        }
    }
}

impl TablePath {
    fn into_route(self, network: &str) -> Route {
        let best = self.selection_reason.is_some();
        let selection_reason = self.selection_reason.flatten().unwrap_or_default();
        self.common
            .summarize(
                network,
                or_unknown(self.path),
                or_unknown(self.path_from),
                or_unknown(self.peer_id),
                best,
                selection_reason,
            )
            .into()
    }

    /// Origin ASNs from the last element of the flat path string.
    ///
    /// A trailing `{a,b}` element is an AS set.
    fn origins(&self) -> Vec<u32> {
        let Some(path) = self.path.as_deref().map(str::trim) else {
            return Vec::new();
        };
        if let Some(set) = path.strip_suffix('}') {
            let members = set.rsplit_once('{').map_or(set, |(_, m)| m);
            return members
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter_map(|asn| asn.parse().ok())
                .collect();
        }
        path.split_whitespace()
            .last()
            .and_then(|asn| asn.parse().ok())
            .into_iter()
            .collect()
    }
}

impl RoutePayload {
    /// Decide the shape of a route result.
    ///
    /// `null` means no route was found; any other non-object value is
    /// malformed. An object with a non-empty `prefix` is a prefix lookup,
    /// anything else is a route table (possibly empty). Paths are fully
    /// typed here, so a malformed path fails the decode.
    pub fn decode(result: &Value) -> Result<Self> {
        let object = match result {
            Value::Null => return Err(GlassError::NoRouteFound),
            Value::Object(object) => object,
            _ => return Err(GlassError::InvalidRouteFormat),
        };

        if object.get("prefix").is_some_and(is_truthy) {
            return Ok(Self::Prefix(serde_json::from_value(result.clone())?));
        }
        Ok(Self::Table(serde_json::from_value(result.clone())?))
    }

    /// The queried prefix, for prefix lookups
    #[must_use]
    pub fn network(&self) -> Option<&str> {
        match self {
            Self::Prefix(p) => Some(&p.prefix),
            Self::Table(_) => None,
        }
    }

    /// Normalize into routes, grouped by network in backend order
    #[must_use]
    pub fn into_routes(self) -> Vec<Route> {
        match self {
            Self::Prefix(p) => {
                let network = p.prefix;
                p.paths.into_iter().map(|path| path.into_route(&network)).collect()
            }
            Self::Table(table) => table
                .routes
                .into_iter()
                .flat_map(|(network, paths)| {
                    paths.into_iter().map(move |path| path.into_route(&network))
                })
                .collect(),
        }
    }

    /// Origin ASNs per network, deduplicated by `(asn, network)`.
    ///
    /// Paths without an AS path contribute nothing.
    #[must_use]
    pub fn origin_asns(&self) -> Vec<RouteOrigin> {
        let mut origins: Vec<RouteOrigin> = Vec::new();
        let mut push = |network: &str, asn: u32| {
            if !origins.iter().any(|o| o.asn == asn && o.network == network) {
                origins.push(RouteOrigin {
                    network: network.to_string(),
                    asn,
                });
            }
        };

        match self {
            Self::Prefix(p) => {
                for asn in p.paths.iter().flat_map(PrefixPath::origins) {
                    push(&p.prefix, asn);
                }
            }
            Self::Table(table) => {
                for (network, paths) in &table.routes {
                    for asn in paths.iter().flat_map(TablePath::origins) {
                        push(network, asn);
                    }
                }
            }
        }
        origins
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Decode and normalize a route result in one step
pub fn convert_route(result: &Value) -> Result<Vec<Route>> {
    Ok(RoutePayload::decode(result)?.into_routes())
}
