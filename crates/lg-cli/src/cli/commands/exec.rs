//! `lgsh <command line>` - run one command line.

use anyhow::Result;
use looking_glass::parse_command_line;
use std::process::ExitCode;

use super::Context;
use crate::output::{print_entry, print_help};
use crate::session::Outcome;

pub async fn execute(ctx: Context, line: &str) -> Result<ExitCode> {
    // help needs no router
    if parse_command_line(line).is_help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    let mut session = ctx.session().await?;
    match session.execute(line).await {
        Outcome::Help => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Cleared => Ok(ExitCode::SUCCESS),
        Outcome::Entry(entry) => {
            print_entry(&entry, ctx.output_format)?;
            Ok(if entry.is_error {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}
