//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use indexmap::IndexMap;
use looking_glass::{CommandName, Endpoints, RouterCatalog, RouterInfo};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// DNS-over-HTTPS resolver URL
    pub doh_url: Option<String>,

    /// Parent domain of the router API hosts
    pub router_domain: Option<String>,

    /// Router catalog URL
    pub catalog_url: Option<String>,

    /// Router to use when none is given
    pub router: Option<String>,

    /// Command to run when a line has no command word
    pub command: Option<String>,

    /// Routers to offer instead of fetching the catalog
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub routers: IndexMap<String, RouterInfo>,
}

impl Config {
    /// Default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "menhera", "lgsh")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load from a file; a missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Save to a file, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Set one key from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let owned = Some(value.to_string());
        match key {
            "router" => self.router = owned,
            "command" => {
                let command: CommandName = value.parse()?;
                self.command = Some(command.as_str().to_string());
            }
            "doh_url" => self.doh_url = owned,
            "router_domain" => self.router_domain = owned,
            "catalog_url" => self.catalog_url = owned,
            _ => anyhow::bail!(
                "Unknown config key: {key}\n\n\
                 Available keys:\n  \
                 router         - Router to use by default\n  \
                 command        - Default command (ipinfo, ping, traceroute, mtr, bgp, nslookup, whois)\n  \
                 doh_url        - DNS-over-HTTPS resolver URL\n  \
                 router_domain  - Parent domain of the router API hosts\n  \
                 catalog_url    - Router catalog URL"
            ),
        }
        Ok(())
    }

    /// The configured default command, if any
    pub fn default_command(&self) -> Result<Option<CommandName>> {
        self.command
            .as_deref()
            .map(str::parse::<CommandName>)
            .transpose()
            .context("invalid `command` in config file")
    }

    /// Endpoints with file values laid over the defaults
    pub fn endpoints(&self) -> Endpoints {
        let mut endpoints = Endpoints::default();
        if let Some(url) = &self.doh_url {
            endpoints.doh_url.clone_from(url);
        }
        if let Some(domain) = &self.router_domain {
            endpoints.router_domain.clone_from(domain);
        }
        if let Some(url) = &self.catalog_url {
            endpoints.catalog_url.clone_from(url);
        }
        endpoints
    }

    /// Routers listed in the file, as a catalog
    pub fn catalog(&self) -> Option<RouterCatalog> {
        (!self.routers.is_empty()).then(|| RouterCatalog {
            routers: self.routers.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.set("router", "tyo1").unwrap();
        config.set("command", "bgp").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.router.as_deref(), Some("tyo1"));
        assert_eq!(loaded.default_command().unwrap(), Some(CommandName::Bgp));
    }

    #[test]
    fn rejects_unknown_keys_and_commands() {
        let mut config = Config::default();
        assert!(config.set("api_key", "x").is_err());
        assert!(config.set("command", "dig").is_err());
    }

    #[test]
    fn routers_table_becomes_catalog() {
        let config: Config = toml::from_str(
            r#"
            doh_url = "https://dns.example/dns-query"

            [routers.tyo1]
            name = "Tokyo 1"
            description = "Tokyo, JP"
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoints().doh_url, "https://dns.example/dns-query");
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.default_router(), Some("tyo1"));
        assert!(Config::default().catalog().is_none());
    }

    #[test]
    fn first_router_in_file_is_the_default() {
        let config: Config = toml::from_str(
            r#"
            [routers.osa2]
            name = "Osaka 2"

            [routers.ams1]
            name = "Amsterdam 1"
            "#,
        )
        .unwrap();

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.default_router(), Some("osa2"));
    }
}
