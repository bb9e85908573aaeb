//! Address-info reports by combining DNS, zone, route and AS lookups.

use crate::dns::DnsClient;
use crate::zone::ZoneResolver;
use futures_util::future::{join, join3, try_join, try_join_all};
use lg_client::LookingGlassClient;
use lg_core::{
    build_reverse_name, classify_token, AddressFamily, AddressInfo, AsInfo, DnsZoneInfo,
    DohTransport, Enrichment, GlassError, HostnameInfo, IpAddressInfo, Result,
    Route, RouteOrigin, RouterBackend, TokenKind,
};
use std::sync::Arc;
use tracing::debug;

/// Reverse-DNS findings for one address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ReverseLookup {
    hostname: Option<String>,
    addresses: Vec<String>,
}

/// Resolves tokens into [`AddressInfo`] reports and route lists.
///
/// Route, AS-info and forward A/AAAA lookups are primary: their failure
/// fails the report. PTR and zone lookups are enrichment: their failure
/// leaves the corresponding fields empty.
#[derive(Clone)]
pub struct AddressInfoResolver {
    dns: DnsClient,
    zones: ZoneResolver,
    backend: Arc<dyn RouterBackend>,
}

impl AddressInfoResolver {
    /// Create a resolver from its collaborators
    #[must_use]
    pub fn new(transport: Arc<dyn DohTransport>, backend: Arc<dyn RouterBackend>) -> Self {
        let dns = DnsClient::new(transport);
        Self {
            zones: ZoneResolver::new(dns.clone()),
            dns,
            backend,
        }
    }

    /// Create a resolver that uses one client for both DoH and the router API
    #[must_use]
    pub fn with_client(client: LookingGlassClient) -> Self {
        let transport = Arc::new(client.doh());
        Self::new(transport, Arc::new(client))
    }

    /// The underlying DNS client
    #[must_use]
    pub const fn dns(&self) -> &DnsClient {
        &self.dns
    }

    /// The underlying zone resolver
    #[must_use]
    pub const fn zones(&self) -> &ZoneResolver {
        &self.zones
    }

    /// The router API backend
    #[must_use]
    pub fn backend(&self) -> &dyn RouterBackend {
        self.backend.as_ref()
    }

    /// Build the report for one token
    pub async fn resolve_address_info(&self, router: &str, token: &str) -> Result<AddressInfo> {
        let classified = classify_token(token);
        let value = classified.value();
        match classified.kind() {
            Some(TokenKind::Hostname) => {
                Ok(AddressInfo::Hostname(self.resolve_hostname(router, value).await?))
            }
            Some(kind @ (TokenKind::Ipv4Address | TokenKind::Ipv4Prefix)) => {
                Ok(AddressInfo::Ipv4(self.resolve_ip_info(router, value, kind).await?))
            }
            Some(kind @ (TokenKind::Ipv6Address | TokenKind::Ipv6Prefix)) => {
                Ok(AddressInfo::Ipv6(self.resolve_ip_info(router, value, kind).await?))
            }
            Some(TokenKind::Asn) => {
                let asn = value
                    .parse()
                    .map_err(|_| GlassError::InvalidInput(token.to_string()))?;
                Ok(AddressInfo::As(self.backend.as_info(router, asn).await?))
            }
            None => Err(GlassError::InvalidInput(token.to_string())),
        }
    }

    async fn resolve_hostname(&self, router: &str, hostname: &str) -> Result<HostnameInfo> {
        let addresses = self.dns.resolve_simple(hostname).await?;

        let ip_infos = try_join_all(addresses.addresses().map(|ip| {
            let kind = classify_token(ip).kind().unwrap_or(TokenKind::Ipv4Address);
            self.resolve_ip_info(router, ip, kind)
        }));
        let (ip_addresses, zone) = join(ip_infos, self.zones.resolve_zone_info(hostname)).await;

        Ok(HostnameInfo {
            hostname: hostname.to_string(),
            ip_addresses: ip_addresses?,
            zone: zone.into_value(),
        })
    }

    /// Report for one address or prefix.
    ///
    /// Reverse DNS is only attempted for single addresses.
    pub async fn resolve_ip_info(
        &self,
        router: &str,
        ip: &str,
        kind: TokenKind,
    ) -> Result<IpAddressInfo> {
        let origins = async {
            let payload = self.backend.prefix_routes(router, ip).await?;
            let origins = payload.origin_asns();
            let as_info = self.resolve_origin_as_info(router, &origins).await?;
            Ok::<_, GlassError>((origins, as_info))
        };

        let (lookup, reverse, reverse_zone) = if kind.is_address() {
            let (lookup, reverse, zone) =
                join3(origins, self.reverse_lookup(ip), self.reverse_zone(ip)).await;
            (lookup, reverse.into_value(), zone.into_value())
        } else {
            (origins.await, ReverseLookup::default(), DnsZoneInfo::default())
        };
        let (origins, as_info) = lookup?;

        let mut prefixes: Vec<String> = Vec::new();
        for origin in &origins {
            if !prefixes.contains(&origin.network) {
                prefixes.push(origin.network.clone());
            }
        }

        Ok(IpAddressInfo {
            address: ip.to_string(),
            prefixes,
            reverse_hostname: reverse.hostname,
            reverse_hostname_addresses: reverse.addresses,
            reverse_zone,
            as_info,
        })
    }

    /// AS info for every distinct origin ASN, concurrently
    async fn resolve_origin_as_info(
        &self,
        router: &str,
        origins: &[RouteOrigin],
    ) -> Result<Vec<AsInfo>> {
        let mut asns: Vec<u32> = Vec::new();
        for origin in origins {
            if !asns.contains(&origin.asn) {
                asns.push(origin.asn);
            }
        }
        let infos = try_join_all(asns.into_iter().map(|asn| self.backend.as_info(router, asn))).await?;

        let mut distinct: Vec<AsInfo> = Vec::with_capacity(infos.len());
        for info in infos {
            if !distinct.contains(&info) {
                distinct.push(info);
            }
        }
        Ok(distinct)
    }

    /// First PTR name of an address and that name's own A/AAAA addresses
    async fn reverse_lookup(&self, ip: &str) -> Enrichment<ReverseLookup> {
        let ptr = match self.dns.resolve_simple(ip).await {
            Ok(records) => records.ptr.into_iter().next(),
            Err(e) => return Enrichment::from_result(Err(e), &format!("PTR {ip}")),
        };
        let Some(hostname) = ptr else {
            return Enrichment::Complete(ReverseLookup::default());
        };

        let forward = self.dns.resolve_simple(&hostname).await;
        let addresses = Enrichment::from_result(
            forward.map(|records| {
                let mut addresses: Vec<String> = Vec::new();
                for address in records.addresses() {
                    if !addresses.contains(address) {
                        addresses.push(address.clone());
                    }
                }
                addresses
            }),
            &format!("A/AAAA {hostname}"),
        );

        let degraded = addresses.reason().map(String::from);
        let lookup = ReverseLookup {
            hostname: Some(hostname),
            addresses: addresses.into_value(),
        };
        match degraded {
            Some(reason) => Enrichment::Degraded {
                value: lookup,
                reason,
            },
            None => Enrichment::Complete(lookup),
        }
    }

    async fn reverse_zone(&self, ip: &str) -> Enrichment<DnsZoneInfo> {
        match build_reverse_name(ip) {
            Ok(name) => self.zones.resolve_zone_info(&name).await,
            Err(e) => Enrichment::from_result(Err(e), &format!("reverse zone {ip}")),
        }
    }

    /// Routes for an address, prefix or ASN.
    ///
    /// An ASN is looked up in both families concurrently; IPv4 routes come
    /// first. Host names are rejected.
    pub async fn resolve_routes(&self, router: &str, token: &str) -> Result<Vec<Route>> {
        let classified = classify_token(token);
        let value = classified.value();
        match classified.kind() {
            Some(TokenKind::Asn) => {
                let asn: u32 = value
                    .parse()
                    .map_err(|_| GlassError::InvalidInput(token.to_string()))?;
                debug!(router, asn, "route lookup by ASN");
                let (v4, v6) = try_join(
                    self.backend.asn_routes(router, asn, AddressFamily::V4),
                    self.backend.asn_routes(router, asn, AddressFamily::V6),
                )
                .await?;
                let mut routes = v4.into_routes();
                routes.extend(v6.into_routes());
                Ok(routes)
            }
            Some(kind) if kind != TokenKind::Hostname => {
                debug!(router, address = value, "route lookup by prefix");
                Ok(self.backend.prefix_routes(router, value).await?.into_routes())
            }
            _ => Err(GlassError::InvalidInput(token.to_string())),
        }
    }
}
