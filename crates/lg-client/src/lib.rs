//! HTTP clients for the looking glass.
//!
//! - [`LookingGlassClient`] talks to the per-router API (probes, BGP, AS info)
//!   and fetches the router catalog
//! - [`HttpsDohTransport`] resolves names over DNS-over-HTTPS
//!
//! Both implement the collaborator traits from `lg-core`, so they plug
//! straight into the resolvers in `lg-recon`.

#![doc(html_root_url = "https://docs.rs/lg-client/0.3.0")]

mod backend;
mod client;
mod config;
mod doh;
pub mod api;

pub use client::{LookingGlassClient, LookingGlassClientBuilder};
pub use config::*;
pub use doh::{decode_response, encode_query, HttpsDohTransport};
pub use lg_core::{GlassError, Result};
