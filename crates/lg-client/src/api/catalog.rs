//! Router catalog.

use crate::LookingGlassClient;
use lg_core::{GlassError, Result, RouterCatalog};
use url::Url;

/// The list of routers a looking glass offers
pub struct CatalogApi<'a> {
    client: &'a LookingGlassClient,
}

impl<'a> CatalogApi<'a> {
    pub(crate) const fn new(client: &'a LookingGlassClient) -> Self {
        Self { client }
    }

    /// Fetch the catalog document
    pub async fn fetch(&self) -> Result<RouterCatalog> {
        let url = Url::parse(&self.client.endpoints().catalog_url)
            .map_err(|e| GlassError::Config(format!("invalid catalog URL: {e}")))?;
        self.client.get_url(url).await
    }
}
