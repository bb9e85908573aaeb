use crate::LookingGlassClient;
use async_trait::async_trait;
use lg_core::{AddressFamily, AsInfo, ProbeKind, Result, RouterBackend, RoutePayload};

#[async_trait]
impl RouterBackend for LookingGlassClient {
    async fn prefix_routes(&self, router: &str, address: &str) -> Result<RoutePayload> {
        self.bgp(router).prefix_payload(address).await
    }

    async fn asn_routes(
        &self,
        router: &str,
        asn: u32,
        family: AddressFamily,
    ) -> Result<RoutePayload> {
        self.bgp(router).asn_payload(asn, family).await
    }

    async fn as_info(&self, router: &str, asn: u32) -> Result<AsInfo> {
        Self::as_info(self, router).lookup(asn).await
    }

    async fn probe(&self, router: &str, kind: ProbeKind, host: &str) -> Result<String> {
        Self::probe(self, router).run(kind, host).await
    }
}
