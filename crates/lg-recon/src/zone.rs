//! Zone metadata (SOA and NS) for a domain.

use crate::dns::DnsClient;
use futures_util::future::{join, join_all};
use lg_core::{DnsAnswer, DnsZoneInfo, Enrichment, NameServerInfo, RecordType};
use tracing::{debug, warn};

/// Builds [`DnsZoneInfo`] from SOA and NS lookups.
///
/// Every lookup here is best effort: a failure degrades the result instead
/// of failing it.
#[derive(Clone)]
pub struct ZoneResolver {
    dns: DnsClient,
}

impl ZoneResolver {
    /// Create a resolver on top of a DNS client
    #[must_use]
    pub const fn new(dns: DnsClient) -> Self {
        Self { dns }
    }

    /// SOA and name servers of the zone containing `domain`.
    ///
    /// The SOA is taken from the answer section, or from the authority
    /// section when `domain` is not itself a zone apex.
    pub async fn resolve_zone_info(&self, domain: &str) -> Enrichment<DnsZoneInfo> {
        let response = match self.dns.resolve(domain, RecordType::Soa).await {
            Ok(response) => response,
            Err(e) => return Enrichment::from_result(Err(e), &format!("SOA {domain}")),
        };

        let soa = pick_soa(&response.answers).or_else(|| pick_soa(&response.authorities));
        let Some(soa) = soa else {
            debug!(domain, "no SOA record");
            return Enrichment::Complete(DnsZoneInfo::default());
        };

        let mut zone = DnsZoneInfo::from_soa(&soa.name, &soa.data);
        match self.name_servers(&zone.zone_name).await {
            Ok(name_servers) => {
                zone.name_servers = name_servers;
                Enrichment::Complete(zone)
            }
            Err(reason) => {
                warn!(zone = %zone.zone_name, reason = %reason, "enrichment degraded");
                Enrichment::Degraded {
                    value: zone,
                    reason,
                }
            }
        }
    }

    async fn name_servers(&self, zone: &str) -> Result<Vec<NameServerInfo>, String> {
        let response = self
            .dns
            .resolve(zone, RecordType::Ns)
            .await
            .map_err(|e| format!("NS {zone}: {e}"))?;

        let targets = response.data_of(RecordType::Ns);
        Ok(join_all(targets.into_iter().map(|name| self.name_server(name))).await)
    }

    /// A and AAAA of one name server, each tolerated independently
    async fn name_server(&self, name: String) -> NameServerInfo {
        let (a, aaaa) = join(
            self.dns.resolve(&name, RecordType::A),
            self.dns.resolve(&name, RecordType::Aaaa),
        )
        .await;

        let ipv4 = Enrichment::from_result(a.map(|r| r.data_of(RecordType::A)), &format!("A {name}"));
        let ipv6 = Enrichment::from_result(
            aaaa.map(|r| r.data_of(RecordType::Aaaa)),
            &format!("AAAA {name}"),
        );

        NameServerInfo {
            name,
            ipv4: ipv4.into_value(),
            ipv6: ipv6.into_value(),
        }
    }
}

fn pick_soa(records: &[DnsAnswer]) -> Option<&DnsAnswer> {
    records.iter().find(|r| r.is(RecordType::Soa))
}
