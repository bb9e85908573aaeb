//! Collaborator seams.
//!
//! The resolvers in this workspace never talk HTTP themselves; they go
//! through these traits so that tests can substitute in-memory fakes.

use crate::error::Result;
use crate::route::RoutePayload;
use crate::types::{AddressFamily, AsInfo, DohPacket, RecordType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method used for a DoH query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DohMethod {
    /// `GET /dns-query?dns=...`
    #[default]
    Get,
    /// `POST /dns-query` with the message as body
    Post,
}

/// Packet probes a router can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// ICMP echo
    Ping,
    /// Classic traceroute
    Traceroute,
    /// My traceroute report
    Mtr,
}

impl ProbeKind {
    /// API endpoint name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::Traceroute => "traceroute",
            Self::Mtr => "mtr",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS-over-HTTPS resolver
#[async_trait]
pub trait DohTransport: Send + Sync {
    /// Send one query and return the raw response
    async fn query(&self, name: &str, record_type: RecordType, method: DohMethod)
        -> Result<DohPacket>;

    /// Server label shown in dig-style output
    fn server_label(&self) -> String;
}

/// The per-router network information API
#[async_trait]
pub trait RouterBackend: Send + Sync {
    /// Routes covering an address or prefix
    async fn prefix_routes(&self, router: &str, address: &str) -> Result<RoutePayload>;

    /// Routes originated by an AS, for one address family
    async fn asn_routes(&self, router: &str, asn: u32, family: AddressFamily)
        -> Result<RoutePayload>;

    /// Registry information for an AS
    async fn as_info(&self, router: &str, asn: u32) -> Result<AsInfo>;

    /// Run a probe and return its text output
    async fn probe(&self, router: &str, kind: ProbeKind, host: &str) -> Result<String>;
}
