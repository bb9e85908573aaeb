//! `lgsh` - interactive shell mode.

use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, IsTerminal, Write};
use std::process::ExitCode;

use super::Context;
use crate::output::{print_entry, print_help};
use crate::session::Outcome;

pub async fn execute(ctx: Context) -> Result<ExitCode> {
    let mut session = ctx.session().await?;
    let interactive = std::io::stdin().is_terminal();

    if interactive {
        println!(
            "Connected to {}. Type {} for commands, {} to quit.",
            session.router().bold(),
            "help".green(),
            "exit".red()
        );
    }

    let mut lines = std::io::stdin().lock().lines();
    loop {
        if interactive {
            print!("{} > ", session.router().cyan());
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        match session.execute(line).await {
            Outcome::Help => print_help(),
            Outcome::Cleared => {
                if interactive {
                    println!("{}", "History cleared.".dimmed());
                }
            }
            Outcome::Entry(entry) => print_entry(&entry, ctx.output_format)?,
        }
    }

    Ok(ExitCode::SUCCESS)
}
