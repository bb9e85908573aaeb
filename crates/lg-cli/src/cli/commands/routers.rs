//! `lgsh routers` - list the routers.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use super::Context;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context) -> Result<ExitCode> {
    let client = ctx.client()?;
    let catalog = ctx.catalog(&client).await?;
    let selected = ctx.router.as_deref().or_else(|| catalog.default_router());

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        OutputFormat::Text => {
            println!("{}", "Routers:".bold().underline());
            for (key, info) in &catalog.routers {
                let marker = if Some(key.as_str()) == selected { "*" } else { " " };
                println!(
                    "{} {:12} {} {}",
                    marker.green(),
                    key.cyan(),
                    info.name.bold(),
                    info.description.dimmed()
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
