use super::{AsInfo, DnsZoneInfo};
use serde::{Deserialize, Serialize};

/// Everything known about one IP address or prefix
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAddressInfo {
    /// The address or prefix as queried
    pub address: String,
    /// Prefixes the router announces that cover it
    pub prefixes: Vec<String>,
    /// First PTR name, if any
    pub reverse_hostname: Option<String>,
    /// A/AAAA addresses of the PTR name
    pub reverse_hostname_addresses: Vec<String>,
    /// Zone of the reverse name
    pub reverse_zone: DnsZoneInfo,
    /// Origin AS information, one entry per distinct origin
    #[serde(rename = "as")]
    pub as_info: Vec<AsInfo>,
}

impl IpAddressInfo {
    /// Origin AS entries with duplicates removed, first occurrence kept
    #[must_use]
    pub fn distinct_as_info(&self) -> Vec<&AsInfo> {
        let mut seen: Vec<&AsInfo> = Vec::with_capacity(self.as_info.len());
        for info in &self.as_info {
            if !seen.contains(&info) {
                seen.push(info);
            }
        }
        seen
    }
}

/// Everything known about a host name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostnameInfo {
    /// The host name as queried
    pub hostname: String,
    /// One entry per A/AAAA address
    pub ip_addresses: Vec<IpAddressInfo>,
    /// Zone of the host name
    pub zone: DnsZoneInfo,
}

/// Report for one token, by token kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "info")]
pub enum AddressInfo {
    /// DNS name
    Hostname(HostnameInfo),
    /// IPv4 address or prefix
    #[serde(rename = "IPv4")]
    Ipv4(IpAddressInfo),
    /// IPv6 address or prefix
    #[serde(rename = "IPv6")]
    Ipv6(IpAddressInfo),
    /// Autonomous system
    #[serde(rename = "AS")]
    As(AsInfo),
}

impl AddressInfo {
    /// The IP blocks in this report, in display order
    #[must_use]
    pub fn ip_addresses(&self) -> Vec<&IpAddressInfo> {
        match self {
            Self::Hostname(host) => host.ip_addresses.iter().collect(),
            Self::Ipv4(ip) | Self::Ipv6(ip) => vec![ip],
            Self::As(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_info(n: u32) -> AsInfo {
        AsInfo {
            as_number: n,
            as_name: format!("NET{n}"),
            ..AsInfo::default()
        }
    }

    #[test]
    fn distinct_origins() {
        let info = IpAddressInfo {
            as_info: vec![as_info(1), as_info(2), as_info(1)],
            ..IpAddressInfo::default()
        };
        let distinct = info.distinct_as_info();
        assert_eq!(distinct.len(), 2);
        assert_eq!(distinct[1].as_number, 2);
    }

    #[test]
    fn tagged_serialization() {
        let report = AddressInfo::As(as_info(63806));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["type"], "AS");
        assert_eq!(json["info"]["as_number"], 63806);
        assert!(report.ip_addresses().is_empty());
    }
}
