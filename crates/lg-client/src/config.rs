//! Endpoint configuration.

use lg_core::{GlassError, Result};
use url::Url;

/// Default DNS-over-HTTPS endpoint
pub const DEFAULT_DOH_URL: &str = "https://looking-glass.nc.menhera.org/dns-query";

/// Domain under which every router serves its API (`<router>.<domain>`)
pub const DEFAULT_ROUTER_DOMAIN: &str = "looking-glass.nc.menhera.org";

/// Default router catalog document
pub const DEFAULT_CATALOG_URL: &str = "https://looking-glass.nc.menhera.org/config.json";

/// Where the looking glass services live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// DNS-over-HTTPS resolver URL
    pub doh_url: String,

    /// Parent domain of the per-router API hosts
    pub router_domain: String,

    /// Router catalog URL
    pub catalog_url: String,

    /// Send every router request here instead (useful for testing)
    pub base_url_override: Option<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            doh_url: DEFAULT_DOH_URL.to_string(),
            router_domain: DEFAULT_ROUTER_DOMAIN.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            base_url_override: None,
        }
    }
}

impl Endpoints {
    /// Point every endpoint at one base URL
    #[must_use]
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            doh_url: format!("{base}/dns-query"),
            router_domain: DEFAULT_ROUTER_DOMAIN.to_string(),
            catalog_url: format!("{base}/config.json"),
            base_url_override: Some(base.to_string()),
        }
    }

    /// `https://<router>.<router_domain>/api/<endpoint>`
    pub fn router_url(&self, router: &str, endpoint: &str) -> Result<Url> {
        let base = match &self.base_url_override {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => {
                if router.is_empty()
                    || !router
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-')
                {
                    return Err(GlassError::Config(format!("invalid router name: {router:?}")));
                }
                format!("https://{router}.{}", self.router_domain)
            }
        };
        Url::parse(&format!("{base}/api/{endpoint}"))
            .map_err(|e| GlassError::Config(format!("invalid router URL: {e}")))
    }
}
