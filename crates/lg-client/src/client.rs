//! Router API client.

use crate::api::{AsInfoApi, BgpApi, CatalogApi, ProbeApi};
use crate::config::Endpoints;
use crate::doh::HttpsDohTransport;
use lg_core::{GlassError, Result};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Every router API response wraps its payload in `{"result": ...}`;
/// a missing or null `result` decodes as `None`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) result: Option<T>,
}

/// Client for the per-router looking glass API
#[derive(Clone)]
pub struct LookingGlassClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    endpoints: Endpoints,
}

impl LookingGlassClient {
    /// Create a client for the public endpoints
    pub fn new() -> Result<Self> {
        LookingGlassClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> LookingGlassClientBuilder {
        LookingGlassClientBuilder::new()
    }

    /// The endpoints this client talks to
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    /// Access ping/traceroute/mtr on a router
    #[must_use]
    pub fn probe<'a>(&'a self, router: &'a str) -> ProbeApi<'a> {
        ProbeApi::new(self, router)
    }

    /// Access BGP table lookups on a router
    #[must_use]
    pub fn bgp<'a>(&'a self, router: &'a str) -> BgpApi<'a> {
        BgpApi::new(self, router)
    }

    /// Access AS registry lookups on a router
    #[must_use]
    pub fn as_info<'a>(&'a self, router: &'a str) -> AsInfoApi<'a> {
        AsInfoApi::new(self, router)
    }

    /// Access the router catalog
    #[must_use]
    pub fn catalog(&self) -> CatalogApi<'_> {
        CatalogApi::new(self)
    }

    /// A DoH transport sharing this client's connection pool
    #[must_use]
    pub fn doh(&self) -> HttpsDohTransport {
        HttpsDohTransport::with_http(self.inner.http.clone(), &self.inner.endpoints.doh_url)
    }

    /// GET a router endpoint and unwrap its `result`
    pub(crate) async fn get_result<T: DeserializeOwned>(
        &self,
        router: &str,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        self.get_optional_result(router, endpoint, params)
            .await?
            .ok_or_else(|| GlassError::Payload(format!("{endpoint}: missing result")))
    }

    /// Like `get_result`, but an absent `result` is `None`
    pub(crate) async fn get_optional_result<T: DeserializeOwned>(
        &self,
        router: &str,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let mut url = self.inner.endpoints.router_url(router, endpoint)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        let envelope: Envelope<T> = self.get_url(url).await?;
        Ok(envelope.result)
    }

    /// GET an absolute URL and decode the JSON body
    pub(crate) async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GlassError::Http(e.to_string()))?;

        handle_response(response).await
    }
}

/// Decode a JSON response, or turn a non-2xx status into an error
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| GlassError::Http(e.to_string()))?;
        serde_json::from_str(&body).map_err(GlassError::Json)
    } else {
        handle_error(status.as_u16(), response).await
    }
}

pub(crate) async fn handle_error<T>(status: u16, response: reqwest::Response) -> Result<T> {
    let message = response.text().await.unwrap_or_default();
    debug!(status, "request failed");
    Err(GlassError::Api {
        code: status,
        message,
    })
}

/// Builder for configuring a [`LookingGlassClient`]
pub struct LookingGlassClientBuilder {
    endpoints: Endpoints,
    timeout: Duration,
    user_agent: String,
}

impl Default for LookingGlassClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LookingGlassClientBuilder {
    /// Create a builder with the public endpoints
    #[must_use]
    pub fn new() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("looking-glass-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Replace all endpoints
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Send every request to one base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: &str) -> Self {
        self.endpoints = Endpoints::with_base_url(url);
        self
    }

    /// Set the DoH resolver URL
    #[must_use]
    pub fn doh_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints.doh_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<LookingGlassClient> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| GlassError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(LookingGlassClient {
            inner: Arc::new(ClientInner {
                http,
                endpoints: self.endpoints,
            }),
        })
    }
}
