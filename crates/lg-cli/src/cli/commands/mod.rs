//! Command implementations.

pub mod config;
pub mod exec;
pub mod routers;
pub mod shell;

use anyhow::Result;
use looking_glass::recon::AddressInfoResolver;
use looking_glass::{CommandName, Endpoints, LookingGlassClient, RouterCatalog};
use std::path::PathBuf;

use crate::config::Config;
use crate::output::OutputFormat;
use crate::session::Session;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Router from the command line, environment or config file
    pub router: Option<String>,

    /// Command for lines without a command word
    pub default_command: CommandName,

    /// Service endpoints
    pub endpoints: Endpoints,

    /// Output format
    pub output_format: OutputFormat,

    /// Where the config file lives
    pub config_path: PathBuf,

    /// Loaded config file
    pub config: Config,
}

impl Context {
    /// Create a client for the configured endpoints.
    pub fn client(&self) -> Result<LookingGlassClient> {
        Ok(LookingGlassClient::builder()
            .endpoints(self.endpoints.clone())
            .build()?)
    }

    /// Routers from the config file, or the published catalog.
    pub async fn catalog(&self, client: &LookingGlassClient) -> Result<RouterCatalog> {
        if let Some(catalog) = self.config.catalog() {
            return Ok(catalog);
        }
        Ok(client.catalog().fetch().await?)
    }

    /// The selected router, falling back to the first catalog entry.
    pub async fn router(&self, client: &LookingGlassClient) -> Result<String> {
        if let Some(router) = &self.router {
            return Ok(router.clone());
        }
        let catalog = self.catalog(client).await?;
        catalog.default_router().map(String::from).ok_or_else(|| {
            anyhow::anyhow!(
                "No router available.\n\n\
                 Set one with one of:\n  \
                 1. --router <NAME>\n  \
                 2. LG_ROUTER environment variable\n  \
                 3. lgsh config set router <NAME>"
            )
        })
    }

    /// A session on the selected router.
    pub async fn session(&self) -> Result<Session> {
        let client = self.client()?;
        let router = self.router(&client).await?;
        Ok(Session::new(
            router,
            self.default_command,
            AddressInfoResolver::with_client(client),
        ))
    }
}
