//! # lg-cli
//!
//! Command-line front end for the looking glass.
//!
//! ## Features
//!
//! - **One-shot mode**: `lgsh ping 192.0.2.1` runs one command line and exits
//! - **Shell mode**: `lgsh` alone reads command lines from stdin
//! - **Same grammar everywhere**: lines are validated before any lookup runs
//! - **Output formats**: plain text or JSON history entries

pub mod cli;
pub mod config;
pub mod history;
pub mod output;
pub mod session;

pub use cli::run;
