//! Reverse DNS names for addresses.

use crate::error::{GlassError, Result};
use crate::token::{classify_token, TokenKind};

/// `192.0.2.1` -> `1.2.0.192.in-addr.arpa`
pub fn build_reverse_name4(ip: &str) -> Result<String> {
    let octets: Vec<&str> = ip.split('.').collect();
    if octets.len() != 4 {
        return Err(GlassError::InvalidAddress(ip.to_string()));
    }
    let reversed: Vec<&str> = octets.into_iter().rev().collect();
    Ok(format!("{}.in-addr.arpa", reversed.join(".")))
}

/// `2001:db8::1` -> `1.0.0.0. ... .8.b.d.0.1.0.0.2.ip6.arpa`
///
/// A `::` elision is expanded to zero groups first so that the address
/// explodes into exactly 32 nibbles.
pub fn build_reverse_name6(ip: &str) -> Result<String> {
    let invalid = || GlassError::InvalidAddress(ip.to_string());

    let groups: Vec<&str> = match ip.split_once("::") {
        Some((left, right)) => {
            let left: Vec<&str> = left.split(':').filter(|g| !g.is_empty()).collect();
            let right: Vec<&str> = right.split(':').filter(|g| !g.is_empty()).collect();
            let missing = 8_usize
                .checked_sub(left.len() + right.len())
                .ok_or_else(invalid)?;
            left.into_iter()
                .chain(std::iter::repeat("0").take(missing))
                .chain(right)
                .collect()
        }
        None => ip.split(':').collect(),
    };

    let mut nibbles = Vec::with_capacity(32);
    for group in groups {
        if group.len() > 4 || !group.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        nibbles.extend(format!("{group:0>4}").to_ascii_lowercase().chars());
    }
    if nibbles.len() != 32 {
        return Err(invalid());
    }

    let reversed: Vec<String> = nibbles.iter().rev().map(char::to_string).collect();
    Ok(format!("{}.ip6.arpa", reversed.join(".")))
}

/// Reverse name for an IPv4 or IPv6 address literal
pub fn build_reverse_name(ip: &str) -> Result<String> {
    match classify_token(ip).kind() {
        Some(TokenKind::Ipv4Address) => build_reverse_name4(ip),
        Some(TokenKind::Ipv6Address) => build_reverse_name6(ip),
        _ => Err(GlassError::InvalidAddress(ip.to_string())),
    }
}
