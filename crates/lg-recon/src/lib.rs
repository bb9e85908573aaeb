//! Network-side composition for the looking glass.
//!
//! - [`DnsClient`] resolves names and addresses over a DoH transport
//! - [`ZoneResolver`] assembles SOA and NS metadata, best effort
//! - [`AddressInfoResolver`] fans out to DNS, routes and AS info to build
//!   one report per token, and looks up routes for the `bgp` command

#![doc(html_root_url = "https://docs.rs/lg-recon/0.3.0")]

pub mod dns;
pub mod enrichment;
pub mod zone;

pub use dns::DnsClient;
pub use enrichment::AddressInfoResolver;
pub use lg_core::{Enrichment, GlassError, Result};
pub use zone::ZoneResolver;
