//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use looking_glass::CommandName;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Looking glass shell
///
/// Run ping, traceroute, MTR, BGP and DNS lookups from the looking glass
/// routers. Give a command line as arguments to run it once, or nothing
/// to read command lines from stdin.
///
/// Examples: `lgsh ping 192.0.2.1`, `lgsh show bgp AS64500`, `lgsh example.com`
#[derive(Parser, Debug)]
#[command(name = "lgsh")]
#[command(author, version)]
#[command(propagate_version = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Router to run commands on (default: first router in the catalog)
    #[arg(short, long, env = "LG_ROUTER", global = true)]
    pub router: Option<String>,

    /// Command used when a line has no command word
    #[arg(short, long, global = true)]
    pub command: Option<CommandName>,

    /// DNS-over-HTTPS resolver URL
    #[arg(long, env = "LG_DOH_URL", global = true)]
    pub doh_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, env = "LG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Command line to run once, e.g. `ping 192.0.2.1`
    #[arg(trailing_var_arg = true)]
    pub line: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the routers commands can run on
    Routers,

    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (router, command, doh_url, router_domain, catalog_url)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}
