//! Token classification.
//!
//! A token is one whitespace-free fragment of a command line. It is tested,
//! in order, as an ASN, an IPv4 address, an IPv4 prefix, an IPv6 address, an
//! IPv6 prefix and finally as a DNS name. The first match wins and there is
//! no fallback: a token matching none of them is invalid.

use ipnet::{Ipv4Net, Ipv6Net};
use regex::Regex;
use serde::Serialize;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

static ASN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:AS)?([0-9]+)$").expect("ASN pattern is valid"));

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9](?:[-a-z0-9]{0,61}[a-z0-9])?$").expect("label pattern is valid")
});

/// The family a valid token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// DNS host name
    Hostname,
    /// IPv4 address (also a /32 prefix)
    Ipv4Address,
    /// IPv4 prefix in CIDR notation
    Ipv4Prefix,
    /// IPv6 address (also a /128 prefix)
    Ipv6Address,
    /// IPv6 prefix in CIDR notation
    Ipv6Prefix,
    /// Autonomous system number
    Asn,
}

impl TokenKind {
    /// Single addresses of either family
    #[must_use]
    pub const fn is_address(self) -> bool {
        matches!(self, Self::Ipv4Address | Self::Ipv6Address)
    }

    /// Bare prefixes (not single addresses)
    #[must_use]
    pub const fn is_bare_prefix(self) -> bool {
        matches!(self, Self::Ipv4Prefix | Self::Ipv6Prefix)
    }
}

/// Every form a token is valid as.
///
/// A single address is also a valid prefix, so `ipv4_address` implies
/// `ipv4_prefix` and `ipv6_address` implies `ipv6_prefix`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClassification {
    /// DNS host name
    pub hostname: bool,
    /// IPv4 address
    pub ipv4_address: bool,
    /// IPv6 address
    pub ipv6_address: bool,
    /// IPv4 prefix (or address)
    pub ipv4_prefix: bool,
    /// IPv6 prefix (or address)
    pub ipv6_prefix: bool,
    /// Autonomous system number
    pub asn: bool,
    /// Lower-cased host name, bare ASN digits, or the literal token
    pub normalized_value: Option<String>,
}

impl TokenClassification {
    /// Returns true if the token matched any family
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.hostname || self.ipv4_prefix || self.ipv6_prefix || self.asn
    }

    /// The most specific family the token belongs to
    #[must_use]
    pub const fn kind(&self) -> Option<TokenKind> {
        if self.asn {
            Some(TokenKind::Asn)
        } else if self.ipv4_address {
            Some(TokenKind::Ipv4Address)
        } else if self.ipv4_prefix {
            Some(TokenKind::Ipv4Prefix)
        } else if self.ipv6_address {
            Some(TokenKind::Ipv6Address)
        } else if self.ipv6_prefix {
            Some(TokenKind::Ipv6Prefix)
        } else if self.hostname {
            Some(TokenKind::Hostname)
        } else {
            None
        }
    }

    /// Normalized value, or an empty string for invalid tokens
    #[must_use]
    pub fn value(&self) -> &str {
        self.normalized_value.as_deref().unwrap_or_default()
    }

    fn of(kind: TokenKind, value: String) -> Self {
        let mut result = Self {
            normalized_value: Some(value),
            ..Self::default()
        };
        match kind {
            TokenKind::Hostname => result.hostname = true,
            TokenKind::Ipv4Address => {
                result.ipv4_address = true;
                result.ipv4_prefix = true;
            }
            TokenKind::Ipv4Prefix => result.ipv4_prefix = true,
            TokenKind::Ipv6Address => {
                result.ipv6_address = true;
                result.ipv6_prefix = true;
            }
            TokenKind::Ipv6Prefix => result.ipv6_prefix = true,
            TokenKind::Asn => result.asn = true,
        }
        result
    }
}

/// Classify a single token.
///
/// Tokens containing whitespace are always invalid.
#[must_use]
pub fn classify_token(token: &str) -> TokenClassification {
    if token.chars().any(char::is_whitespace) {
        return TokenClassification::default();
    }

    if let Some(caps) = ASN_PATTERN.captures(token) {
        return TokenClassification::of(TokenKind::Asn, caps[1].to_string());
    }
    if token.parse::<Ipv4Addr>().is_ok() {
        return TokenClassification::of(TokenKind::Ipv4Address, token.to_string());
    }
    if token.parse::<Ipv4Net>().is_ok() {
        return TokenClassification::of(TokenKind::Ipv4Prefix, token.to_string());
    }
    if token.parse::<Ipv6Addr>().is_ok() {
        return TokenClassification::of(TokenKind::Ipv6Address, token.to_string());
    }
    if token.parse::<Ipv6Net>().is_ok() {
        return TokenClassification::of(TokenKind::Ipv6Prefix, token.to_string());
    }

    let name = token.strip_suffix('.').unwrap_or(token);
    if name.split('.').all(|label| LABEL_PATTERN.is_match(label)) {
        return TokenClassification::of(TokenKind::Hostname, name.to_lowercase());
    }

    TokenClassification::default()
}

/// Parse the numeric part of an ASN token (`AS65000`, `as65000` or `65000`).
#[must_use]
pub fn parse_asn(token: &str) -> Option<u32> {
    ASN_PATTERN
        .captures(token)
        .and_then(|caps| caps[1].parse().ok())
}
