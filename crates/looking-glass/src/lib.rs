//! Network looking glass: validate a query, ask the routers and a DoH
//! resolver, and render the answers.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use looking_glass::{format, recon::AddressInfoResolver, LookingGlassClient};
//!
//! #[tokio::main]
//! async fn main() -> looking_glass::Result<()> {
//!     let client = LookingGlassClient::new()?;
//!
//!     // Routes for a prefix, as seen from one router
//!     let routes = client.bgp("tyo1").route("2001:db8::/32").await?;
//!     println!("{}", format::format_route(&routes));
//!
//!     // Full address report: routes, origin AS, reverse DNS, zone
//!     let resolver = AddressInfoResolver::with_client(client);
//!     let info = resolver.resolve_address_info("tyo1", "example.com").await?;
//!     println!("{}", format::format_address_info("example.com", &info));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - rustls and the resolvers
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS
//! - `recon` - DNS, zone and address-info resolvers

#![doc(html_root_url = "https://docs.rs/looking-glass/0.3.0")]

// Re-export core types
pub use lg_core::*;

// Re-export clients
pub use lg_client::{
    Endpoints, HttpsDohTransport, LookingGlassClient, LookingGlassClientBuilder,
    DEFAULT_CATALOG_URL, DEFAULT_DOH_URL, DEFAULT_ROUTER_DOMAIN,
};

#[cfg(feature = "recon")]
pub use lg_recon as recon;

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
