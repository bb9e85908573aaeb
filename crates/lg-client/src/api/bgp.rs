//! BGP table endpoints.

use crate::LookingGlassClient;
use lg_core::{AddressFamily, Result, Route, RouteOrigin, RoutePayload};
use serde_json::Value;

/// BGP lookups on one router
pub struct BgpApi<'a> {
    client: &'a LookingGlassClient,
    router: &'a str,
}

impl<'a> BgpApi<'a> {
    pub(crate) const fn new(client: &'a LookingGlassClient, router: &'a str) -> Self {
        Self { client, router }
    }

    /// Raw paths covering an address or prefix; no `result` means no route
    pub async fn prefix_payload(&self, address: &str) -> Result<RoutePayload> {
        let result = self
            .client
            .get_optional_result::<Value>(self.router, "v1/bgp/json", &[("address", address)])
            .await?
            .unwrap_or(Value::Null);
        RoutePayload::decode(&result)
    }

    /// Raw paths originated by an AS in one address family
    pub async fn asn_payload(&self, asn: u32, family: AddressFamily) -> Result<RoutePayload> {
        let asn = asn.to_string();
        let result = self
            .client
            .get_optional_result::<Value>(self.router, &format!("v1/bgp/asn/{family}/json"), &[("asn", &asn)])
            .await?
            .unwrap_or(Value::Null);
        RoutePayload::decode(&result)
    }

    /// Routes covering an address or prefix
    pub async fn route(&self, address: &str) -> Result<Vec<Route>> {
        Ok(self.prefix_payload(address).await?.into_routes())
    }

    /// Routes originated by an AS
    pub async fn routes_by_asn(&self, asn: u32, family: AddressFamily) -> Result<Vec<Route>> {
        Ok(self.asn_payload(asn, family).await?.into_routes())
    }

    /// Origin ASNs of the prefixes covering an address
    pub async fn origin_asns(&self, address: &str) -> Result<Vec<RouteOrigin>> {
        Ok(self.prefix_payload(address).await?.origin_asns())
    }
}
