//! Packet probe endpoints.

use crate::LookingGlassClient;
use lg_core::{ProbeKind, Result};

/// ping, traceroute and mtr on one router
pub struct ProbeApi<'a> {
    client: &'a LookingGlassClient,
    router: &'a str,
}

impl<'a> ProbeApi<'a> {
    pub(crate) const fn new(client: &'a LookingGlassClient, router: &'a str) -> Self {
        Self { client, router }
    }

    /// Run a probe towards `host` and return the tool's text output
    pub async fn run(&self, kind: ProbeKind, host: &str) -> Result<String> {
        self.client
            .get_result(self.router, &format!("v1/{kind}"), &[("host", host)])
            .await
    }

    /// ICMP echo
    pub async fn ping(&self, host: &str) -> Result<String> {
        self.run(ProbeKind::Ping, host).await
    }

    /// Traceroute
    pub async fn traceroute(&self, host: &str) -> Result<String> {
        self.run(ProbeKind::Traceroute, host).await
    }

    /// MTR report
    pub async fn mtr(&self, host: &str) -> Result<String> {
        self.run(ProbeKind::Mtr, host).await
    }
}
