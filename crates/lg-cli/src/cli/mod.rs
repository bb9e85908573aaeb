//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Flags and env vars win over the config file
    let mut endpoints = config.endpoints();
    if let Some(url) = cli.doh_url {
        endpoints.doh_url = url;
    }
    let default_command = match cli.command {
        Some(command) => command,
        None => config.default_command()?.unwrap_or(looking_glass::CommandName::Ipinfo),
    };

    let ctx = commands::Context {
        router: cli.router.or_else(|| config.router.clone()),
        default_command,
        endpoints,
        output_format: cli.output.unwrap_or_default(),
        config_path,
        config,
    };

    match cli.subcommand {
        Some(Commands::Routers) => commands::routers::execute(ctx).await,
        Some(Commands::Config(args)) => commands::config::execute(&ctx, args),
        None if cli.line.is_empty() => commands::shell::execute(ctx).await,
        None => commands::exec::execute(ctx, &cli.line.join(" ")).await,
    }
}

/// Log to stderr; `RUST_LOG` applies unless `-v` asks for debug output
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
