//! Command-line grammar.
//!
//! Accepted forms:
//!
//! ```text
//! ( "ping" | "traceroute" | "mtr" ) ( <ipv4address> | <ipv6address> | <hostname> )+
//! "nslookup" ( <ipv4address> | <ipv6address> | <hostname> )+
//! ( "show" | "sh" )? ( "bgp" | "route" ) <any token>+
//! ( "whois" | "ipinfo" )? <any token>+
//! ( "help" | "?" )
//! ( "clear" | "cls" )
//! ```
//!
//! Without a command word the line is "token only": every token narrows the
//! set of purposes the line could still serve.
//!
//! The grammar is a reducer over [`ParseProgress`]: each step consumes the
//! previous record and yields the next one.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::token::{classify_token, TokenKind};

/// Where the grammar is after the tokens seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseState {
    /// Nothing consumed yet
    Start,
    /// After `ping`, `traceroute` or `mtr`
    SendPacket,
    /// After `nslookup`
    DnsLookup,
    /// After `bgp` or `route`
    GetRoute,
    /// After `show`/`sh`, waiting for `bgp` or `route`
    GetRouteStart,
    /// After `whois` or `ipinfo`
    Whois,
    /// First token was not a command word
    TokenOnly,
    /// Rejected; absorbing
    Invalid,
    /// After `help` or `clear`; any further token is rejected
    End,
}

/// One kind of thing a command line can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Purpose {
    /// ping, traceroute, mtr
    SendPacket,
    /// bgp
    GetRoute,
    /// nslookup
    DnsLookup,
    /// whois, ipinfo
    Whois,
}

/// The set of purposes still compatible with every token seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidPurpose {
    /// ping, traceroute, mtr
    pub send_packet: bool,
    /// bgp
    pub get_route: bool,
    /// nslookup
    pub dns_lookup: bool,
    /// whois, ipinfo
    pub whois: bool,
}

impl ValidPurpose {
    /// The empty set
    pub const NONE: Self = Self {
        send_packet: false,
        get_route: false,
        dns_lookup: false,
        whois: false,
    };

    /// Set holding a single purpose
    #[must_use]
    pub const fn only(purpose: Purpose) -> Self {
        Self::NONE.with(purpose)
    }

    /// Purposes a first, command-less token makes eligible
    #[must_use]
    pub const fn seeded_by(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Ipv4Address | TokenKind::Ipv6Address => Self {
                send_packet: true,
                get_route: true,
                dns_lookup: true,
                whois: true,
            },
            TokenKind::Hostname => Self {
                send_packet: true,
                get_route: false,
                dns_lookup: true,
                whois: true,
            },
            TokenKind::Ipv4Prefix | TokenKind::Ipv6Prefix | TokenKind::Asn => Self {
                send_packet: false,
                get_route: true,
                dns_lookup: false,
                whois: true,
            },
        }
    }

    /// Intersect with what a further command-less token supports.
    ///
    /// Addresses narrow nothing, host names drop `get_route`, prefixes and
    /// ASNs drop `send_packet` and `dns_lookup`.
    #[must_use]
    pub const fn narrowed_by(self, kind: TokenKind) -> Self {
        match kind {
            TokenKind::Ipv4Address | TokenKind::Ipv6Address => self,
            TokenKind::Hostname => Self {
                get_route: false,
                ..self
            },
            TokenKind::Ipv4Prefix | TokenKind::Ipv6Prefix | TokenKind::Asn => Self {
                send_packet: false,
                dns_lookup: false,
                ..self
            },
        }
    }

    /// Add a purpose
    #[must_use]
    pub const fn with(self, purpose: Purpose) -> Self {
        match purpose {
            Purpose::SendPacket => Self {
                send_packet: true,
                ..self
            },
            Purpose::GetRoute => Self {
                get_route: true,
                ..self
            },
            Purpose::DnsLookup => Self {
                dns_lookup: true,
                ..self
            },
            Purpose::Whois => Self {
                whois: true,
                ..self
            },
        }
    }

    /// Returns true if the purpose is in the set
    #[must_use]
    pub const fn admits(self, purpose: Purpose) -> bool {
        match purpose {
            Purpose::SendPacket => self.send_packet,
            Purpose::GetRoute => self.get_route,
            Purpose::DnsLookup => self.dns_lookup,
            Purpose::Whois => self.whois,
        }
    }

    /// Returns true if no purpose is left
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !(self.send_packet || self.get_route || self.dns_lookup || self.whois)
    }
}

/// A command the dispatcher knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandName {
    /// Address information report
    Ipinfo,
    /// ICMP echo from the router
    Ping,
    /// Traceroute from the router
    Traceroute,
    /// MTR from the router
    Mtr,
    /// BGP table lookup
    Bgp,
    /// DNS lookup
    Nslookup,
    /// Address information report
    Whois,
}

impl CommandName {
    /// All commands in menu order
    pub const ALL: [Self; 7] = [
        Self::Ipinfo,
        Self::Ping,
        Self::Traceroute,
        Self::Mtr,
        Self::Bgp,
        Self::Nslookup,
        Self::Whois,
    ];

    /// Command word
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ipinfo => "ipinfo",
            Self::Ping => "ping",
            Self::Traceroute => "traceroute",
            Self::Mtr => "mtr",
            Self::Bgp => "bgp",
            Self::Nslookup => "nslookup",
            Self::Whois => "whois",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ipinfo => "IP Info",
            Self::Ping => "Ping",
            Self::Traceroute => "Traceroute",
            Self::Mtr => "MTR",
            Self::Bgp => "BGP",
            Self::Nslookup => "DNS Lookup",
            Self::Whois => "Whois",
        }
    }

    /// The command as echoed in history (`bgp` is shown as `show bgp`)
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bgp => "show bgp",
            other => other.as_str(),
        }
    }

    /// The purpose this command serves
    #[must_use]
    pub const fn purpose(self) -> Purpose {
        match self {
            Self::Ping | Self::Traceroute | Self::Mtr => Purpose::SendPacket,
            Self::Bgp => Purpose::GetRoute,
            Self::Nslookup => Purpose::DnsLookup,
            Self::Ipinfo | Self::Whois => Purpose::Whois,
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = crate::GlassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| crate::GlassError::InvalidInput(s.to_string()))
    }
}

/// Intermediate record threaded through [`ParseProgress::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProgress {
    /// Current state
    pub state: ParseState,
    /// Whether the tokens so far form a complete, valid line
    pub is_valid: bool,
    /// Explicit command, if one was given
    pub command_name: Option<CommandName>,
    /// Purposes still compatible with the tokens
    pub valid_purpose: ValidPurpose,
    /// Normalized token values
    pub validated_tokens: Vec<String>,
    /// `help` was given
    pub help: bool,
    /// `clear` was given
    pub clear: bool,
}

impl Default for ParseProgress {
    fn default() -> Self {
        Self {
            state: ParseState::Start,
            is_valid: false,
            command_name: None,
            valid_purpose: ValidPurpose::NONE,
            validated_tokens: Vec::new(),
            help: false,
            clear: false,
        }
    }
}

impl ParseProgress {
    /// Consume one token.
    #[must_use]
    pub fn step(self, token: &str) -> Self {
        match self.state {
            ParseState::Start => self.start(token),
            ParseState::SendPacket | ParseState::DnsLookup => {
                self.accept_if(token, |kind| kind.is_address() || kind == TokenKind::Hostname)
            }
            ParseState::GetRoute | ParseState::Whois => self.accept_if(token, |_| true),
            ParseState::GetRouteStart => match token {
                "bgp" | "route" => Self {
                    state: ParseState::GetRoute,
                    command_name: Some(CommandName::Bgp),
                    ..self
                },
                _ => self.reject(),
            },
            ParseState::TokenOnly => self.narrow(token),
            ParseState::Invalid | ParseState::End => self.reject(),
        }
    }

    /// Finish the parse.
    ///
    /// An invalid line yields no tokens, no purposes and no command.
    #[must_use]
    pub fn finish(self) -> CommandLine {
        if !self.is_valid {
            tracing::debug!(state = ?self.state, "command line rejected");
            return CommandLine {
                state: self.state,
                ..CommandLine::default()
            };
        }

        CommandLine {
            state: self.state,
            is_valid: true,
            command_name: self.command_name,
            valid_purpose: self.valid_purpose,
            validated_tokens: self.validated_tokens,
            is_help: self.help,
            is_clear: self.clear,
        }
    }

    fn start(self, token: &str) -> Self {
        match token {
            "ping" => self.command(ParseState::SendPacket, Some(CommandName::Ping)),
            "traceroute" => self.command(ParseState::SendPacket, Some(CommandName::Traceroute)),
            "mtr" => self.command(ParseState::SendPacket, Some(CommandName::Mtr)),
            "nslookup" => self.command(ParseState::DnsLookup, Some(CommandName::Nslookup)),
            "show" | "sh" => Self {
                state: ParseState::GetRouteStart,
                valid_purpose: self.valid_purpose.with(Purpose::GetRoute),
                ..self
            },
            "bgp" | "route" => self.command(ParseState::GetRoute, Some(CommandName::Bgp)),
            "whois" => self.command(ParseState::Whois, Some(CommandName::Whois)),
            "ipinfo" => self.command(ParseState::Whois, Some(CommandName::Ipinfo)),
            "help" | "?" => Self {
                state: ParseState::End,
                is_valid: true,
                help: true,
                ..self
            },
            "clear" | "cls" => Self {
                state: ParseState::End,
                is_valid: true,
                clear: true,
                ..self
            },
            _ => {
                let classified = classify_token(token);
                match classified.kind() {
                    Some(kind) => {
                        let mut validated_tokens = self.validated_tokens;
                        validated_tokens.push(classified.value().to_string());
                        Self {
                            state: ParseState::TokenOnly,
                            is_valid: true,
                            valid_purpose: ValidPurpose::seeded_by(kind),
                            validated_tokens,
                            ..self
                        }
                    }
                    None => self.reject(),
                }
            }
        }
    }

    fn command(self, state: ParseState, command_name: Option<CommandName>) -> Self {
        let valid_purpose = command_name.map_or(self.valid_purpose, |command| {
            self.valid_purpose.with(command.purpose())
        });
        Self {
            state,
            command_name,
            valid_purpose,
            ..self
        }
    }

    fn accept_if(self, token: &str, accepts: impl Fn(TokenKind) -> bool) -> Self {
        let classified = classify_token(token);
        match classified.kind() {
            Some(kind) if accepts(kind) => {
                let mut validated_tokens = self.validated_tokens;
                validated_tokens.push(classified.value().to_string());
                Self {
                    is_valid: true,
                    validated_tokens,
                    ..self
                }
            }
            _ => self.reject(),
        }
    }

    fn narrow(self, token: &str) -> Self {
        let classified = classify_token(token);
        let Some(kind) = classified.kind() else {
            return self.reject();
        };

        let valid_purpose = self.valid_purpose.narrowed_by(kind);
        if valid_purpose.is_empty() {
            return self.reject();
        }

        let mut validated_tokens = self.validated_tokens;
        validated_tokens.push(classified.value().to_string());
        Self {
            is_valid: true,
            valid_purpose,
            validated_tokens,
            ..self
        }
    }

    fn reject(self) -> Self {
        Self {
            state: ParseState::Invalid,
            is_valid: false,
            ..self
        }
    }
}

/// Outcome of parsing a whole command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandLine {
    /// Final grammar state
    pub state: ParseState,
    /// Whether the line is complete and valid
    pub is_valid: bool,
    /// Explicit command, if one was given
    pub command_name: Option<CommandName>,
    /// Purposes compatible with every token
    pub valid_purpose: ValidPurpose,
    /// Normalized token values
    pub validated_tokens: Vec<String>,
    /// The line was `help`
    pub is_help: bool,
    /// The line was `clear`
    pub is_clear: bool,
}

impl Default for CommandLine {
    fn default() -> Self {
        Self {
            state: ParseState::Start,
            is_valid: false,
            command_name: None,
            valid_purpose: ValidPurpose::NONE,
            validated_tokens: Vec::new(),
            is_help: false,
            is_clear: false,
        }
    }
}

/// Split a command line into tokens on runs of whitespace and commas.
pub fn split_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
}

/// Parse a raw command line.
#[must_use]
pub fn parse_command_line(text: &str) -> CommandLine {
    split_tokens(text)
        .fold(ParseProgress::default(), ParseProgress::step)
        .finish()
}
