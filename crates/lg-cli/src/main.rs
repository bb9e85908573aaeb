//! lgsh - looking glass shell
//!
//! Runs ping, traceroute, BGP and DNS lookups from the looking glass routers.

use anyhow::Result;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    lg_cli::run().await
}
