use super::indent;
use crate::types::{AddressInfo, AsInfo, DnsZoneInfo, IpAddressInfo};
use std::fmt::Write;

fn zone_lines(zone: &DnsZoneInfo) -> Vec<String> {
    if zone.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![
        format!("Zone: {}", zone.zone_name),
        format!("  Primary Name Server: {}", zone.primary_name_server),
        format!("  Admin Contact: {}", zone.admin_contact),
        format!("  Serial: {}", zone.serial),
        format!("  Refresh: {}", zone.refresh),
        format!("  Retry: {}", zone.retry),
        format!("  Expire: {}", zone.expire),
        format!("  Minimum TTL: {}", zone.minimum),
    ];
    if !zone.name_servers.is_empty() {
        lines.push("  Name Servers:".to_string());
        for ns in &zone.name_servers {
            let addresses: Vec<&str> = ns.ipv4.iter().chain(&ns.ipv6).map(String::as_str).collect();
            if addresses.is_empty() {
                lines.push(format!("    {}", ns.name));
            } else {
                lines.push(format!("    {} ({})", ns.name, addresses.join(", ")));
            }
        }
    }
    lines
}

/// Render SOA and NS metadata. An empty zone renders as nothing.
#[must_use]
pub fn format_zone_info(zone: &DnsZoneInfo) -> String {
    indent(&zone_lines(zone), 0)
}

fn ip_block(out: &mut String, ip: &IpAddressInfo) {
    let _ = writeln!(out, "\n  IP Address: {}", ip.address);
    if let Some(hostname) = &ip.reverse_hostname {
        let _ = writeln!(out, "  Reverse Hostname: {hostname}");
        let _ = writeln!(
            out,
            "  Reverse Hostname Addresses: {}",
            ip.reverse_hostname_addresses.join(", ")
        );
    }
    let _ = writeln!(out, "  Prefixes: {}", ip.prefixes.join(", "));
    out.push_str(&indent(&zone_lines(&ip.reverse_zone), 2));

    let origins = ip.distinct_as_info();
    if !origins.is_empty() {
        out.push_str("  AS Information:\n");
        for info in origins {
            let _ = writeln!(out, "    Origin AS: {}", info.summary());
        }
    }
}

fn as_block(out: &mut String, info: &AsInfo) {
    let _ = writeln!(out, "AS Info for AS{}:", info.as_number);
    let _ = writeln!(out, "  Name: {}", info.as_name);
    let _ = writeln!(out, "  Description: {}", info.as_description);
    let _ = writeln!(out, "  Country: {}", info.as_country);
}

/// Render an address-info report for the token `input`.
#[must_use]
pub fn format_address_info(input: &str, info: &AddressInfo) -> String {
    let mut out = String::new();
    match info {
        AddressInfo::Hostname(host) => {
            let _ = writeln!(out, "IP Info for {input}:");
            for ip in &host.ip_addresses {
                ip_block(&mut out, ip);
            }
            let zone = zone_lines(&host.zone);
            if !zone.is_empty() {
                out.push('\n');
                out.push_str(&indent(&zone, 2));
            }
        }
        AddressInfo::Ipv4(ip) | AddressInfo::Ipv6(ip) => {
            let _ = writeln!(out, "IP Info for {input}:");
            ip_block(&mut out, ip);
        }
        AddressInfo::As(info) => as_block(&mut out, info),
    }
    out
}
