//! Command dispatch for one router.

use futures_util::future::try_join_all;
use looking_glass::format::{format_address_info, format_dns_response, format_route};
use looking_glass::recon::AddressInfoResolver;
use looking_glass::{parse_asn, parse_command_line, CommandLine, CommandName, ProbeKind, Result};
use tracing::debug;

use crate::history::{History, HistoryEntry};

/// What a command line did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `help` or `?`
    Help,
    /// `clear` or `cls`; history is now empty
    Cleared,
    /// A command ran (or was rejected) and was recorded
    Entry(HistoryEntry),
}

/// A router, a default command and the history of what ran on it
pub struct Session {
    router: String,
    default_command: CommandName,
    resolver: AddressInfoResolver,
    history: History,
}

impl Session {
    pub fn new(router: impl Into<String>, default_command: CommandName, resolver: AddressInfoResolver) -> Self {
        Self {
            router: router.into(),
            default_command,
            resolver,
            history: History::default(),
        }
    }

    pub fn router(&self) -> &str {
        &self.router
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Parse and run one command line.
    ///
    /// Invalid lines are recorded as `not valid` without any lookup.
    pub async fn execute(&mut self, text: &str) -> Outcome {
        let line = parse_command_line(text);
        if line.is_help {
            return Outcome::Help;
        }
        if line.is_clear {
            self.history.clear();
            return Outcome::Cleared;
        }

        let Some(command) = select_command(&line, self.default_command) else {
            return self.record(HistoryEntry::error(
                self.router.clone(),
                text.trim(),
                "not valid".to_string(),
            ));
        };

        let displayed = display_command(command, &line.validated_tokens);
        debug!(router = %self.router, command = %displayed, "executing");
        let entry = match self.run(command, &line.validated_tokens).await {
            Ok(result) => HistoryEntry::success(self.router.clone(), displayed, result),
            Err(e) => HistoryEntry::error(self.router.clone(), displayed, e.to_string()),
        };
        self.record(entry)
    }

    fn record(&mut self, entry: HistoryEntry) -> Outcome {
        self.history.push(entry.clone());
        Outcome::Entry(entry)
    }

    /// Run a command over every token concurrently; the first failure wins
    async fn run(&self, command: CommandName, tokens: &[String]) -> Result<String> {
        let router = self.router.as_str();
        match command {
            CommandName::Ipinfo | CommandName::Whois => {
                let reports = try_join_all(tokens.iter().map(|token| async move {
                    let info = self.resolver.resolve_address_info(router, token).await?;
                    Ok::<_, looking_glass::GlassError>(format_address_info(token, &info))
                }))
                .await?;
                Ok(reports.join("\n\n"))
            }
            CommandName::Bgp => {
                let routes = try_join_all(
                    tokens
                        .iter()
                        .map(|token| self.resolver.resolve_routes(router, token)),
                )
                .await?;
                Ok(routes
                    .iter()
                    .map(|routes| format_route(routes))
                    .collect::<Vec<_>>()
                    .join("\n\n"))
            }
            CommandName::Nslookup => {
                let dns = self.resolver.dns();
                let server = dns.server_label();
                let responses =
                    try_join_all(tokens.iter().map(|token| dns.resolve_auto(token))).await?;
                Ok(responses
                    .iter()
                    .flatten()
                    .map(|response| format_dns_response(response, &server))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            CommandName::Ping | CommandName::Traceroute | CommandName::Mtr => {
                let kind = probe_kind(command);
                let backend = self.resolver.backend();
                let results =
                    try_join_all(tokens.iter().map(|token| backend.probe(router, kind, token)))
                        .await?;
                Ok(results.join("\n\n"))
            }
        }
    }
}

/// The command a valid line runs.
///
/// An explicit command word wins. Otherwise `default` is used when the
/// tokens allow it, else the first command in menu order that they allow.
pub fn select_command(line: &CommandLine, default: CommandName) -> Option<CommandName> {
    if !line.is_valid || line.is_help || line.is_clear {
        return None;
    }
    if let Some(command) = line.command_name {
        return Some(command);
    }
    let purposes = line.valid_purpose;
    if purposes.admits(default.purpose()) {
        return Some(default);
    }
    CommandName::ALL
        .into_iter()
        .find(|command| purposes.admits(command.purpose()))
}

/// Command line as echoed in history; ASNs are shown as `AS<n>`
pub fn display_command(command: CommandName, tokens: &[String]) -> String {
    let mut parts = vec![command.display_name().to_string()];
    parts.extend(tokens.iter().map(|token| match parse_asn(token) {
        Some(asn) => format!("AS{asn}"),
        None => token.clone(),
    }));
    parts.join(" ")
}

const fn probe_kind(command: CommandName) -> ProbeKind {
    match command {
        CommandName::Traceroute => ProbeKind::Traceroute,
        CommandName::Mtr => ProbeKind::Mtr,
        _ => ProbeKind::Ping,
    }
}
