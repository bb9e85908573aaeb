//! Output formatting for history entries.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Prompt line followed by the result text
    #[default]
    Text,
    /// One JSON object per entry
    Json,
}

/// Grammar summary printed by `help`
pub const HELP: &str = "\
Commands:
  ping <host|address>...          ICMP echo from the router
  traceroute <host|address>...    traceroute from the router
  mtr <host|address>...           MTR report from the router
  show bgp <target>...            BGP routes (also: sh route, bgp, route)
  nslookup <host|address>...      DNS lookup over HTTPS
  whois <target>...               address report (also: ipinfo)
  help, ?                         this text
  clear, cls                      forget the session history

Targets are host names, IPv4/IPv6 addresses or prefixes, and AS numbers
(AS64500 or 64500), separated by spaces or commas. A line without a
command word runs the default command when its targets allow it.";

/// Print one entry; errors go to stderr
pub fn print_entry(entry: &HistoryEntry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(entry)?);
        }
        OutputFormat::Text => {
            let prompt = format!("{} > {}", entry.hostname.cyan(), entry.command.bold());
            if entry.is_error {
                eprintln!("{prompt}");
                eprintln!("{}", entry.result.red());
            } else {
                println!("{prompt}");
                println!("{}", entry.result.trim_end());
            }
        }
    }
    Ok(())
}

pub fn print_help() {
    println!("{HELP}");
}
