//! Core types and pure logic for the looking glass.
//!
//! - **Grammar**: [`classify_token`] and [`parse_command_line`] validate user
//!   input before anything touches the network
//! - **Routes**: [`RoutePayload`] reconciles the two router JSON shapes into
//!   [`Route`]
//! - **Formatting**: text renderers in [`format`]
//! - **Seams**: the [`DohTransport`] and [`RouterBackend`] traits implemented
//!   by the HTTP clients
//!
//! # Example
//!
//! ```rust
//! use lg_core::{parse_command_line, CommandName};
//!
//! let line = parse_command_line("ping 1.1.1.1, 8.8.8.8");
//! assert!(line.is_valid);
//! assert_eq!(line.command_name, Some(CommandName::Ping));
//! assert_eq!(line.validated_tokens, ["1.1.1.1", "8.8.8.8"]);
//! ```

#![doc(html_root_url = "https://docs.rs/lg-core/0.3.0")]

mod error;
pub mod format;
pub mod grammar;
pub mod reverse;
pub mod route;
pub mod token;
pub mod transport;
pub mod types;

pub use error::{ErrorKind, GlassError, Result};
pub use grammar::{
    parse_command_line, split_tokens, CommandLine, CommandName, ParseProgress, ParseState,
    Purpose, ValidPurpose,
};
pub use reverse::{build_reverse_name, build_reverse_name4, build_reverse_name6};
pub use route::{convert_route, RoutePayload};
pub use token::{classify_token, parse_asn, TokenClassification, TokenKind};
pub use transport::{DohMethod, DohTransport, ProbeKind, RouterBackend};
pub use types::*;
