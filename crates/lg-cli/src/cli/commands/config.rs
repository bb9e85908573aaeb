//! `lgsh config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<ExitCode> {
    match args.command {
        ConfigCommands::Show => show_config(ctx)?,
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value)?,
        ConfigCommands::Path => println!("{}", ctx.config_path.display()),
    }
    Ok(ExitCode::SUCCESS)
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Text => {
            let unset = || "(not set)".dimmed().to_string();
            println!("{}", "Current Configuration:".bold());
            println!();
            println!("  {} {}", "router:".bold(), config.router.clone().unwrap_or_else(unset));
            println!("  {} {}", "command:".bold(), config.command.clone().unwrap_or_else(unset));
            println!("  {} {}", "doh_url:".bold(), config.doh_url.clone().unwrap_or_else(unset));
            println!(
                "  {} {}",
                "router_domain:".bold(),
                config.router_domain.clone().unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "catalog_url:".bold(),
                config.catalog_url.clone().unwrap_or_else(unset)
            );
            if !config.routers.is_empty() {
                let keys: Vec<&str> = config.routers.keys().map(String::as_str).collect();
                println!("  {} {}", "routers:".bold(), keys.join(", "));
            }
        }
    }

    Ok(())
}

fn set_config(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config: Config = ctx.config.clone();
    config.set(key, value)?;
    config.save_to(&ctx.config_path)?;
    println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());
    Ok(())
}
