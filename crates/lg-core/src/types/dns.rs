use crate::error::{GlassError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Record types the looking glass queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name
    Cname,
    /// Mail exchange
    Mx,
    /// Name server
    Ns,
    /// Reverse pointer
    Ptr,
    /// Start of authority
    Soa,
    /// Text
    Txt,
}

impl RecordType {
    /// Mnemonic as used on the wire and in output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = GlassError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "NS" => Ok(Self::Ns),
            "PTR" => Ok(Self::Ptr),
            "SOA" => Ok(Self::Soa),
            "TXT" => Ok(Self::Txt),
            _ => Err(GlassError::InvalidInput(s.to_string())),
        }
    }
}

/// One entry of the question section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsQuestion {
    /// Query class, always `IN`
    pub class: String,
    /// Query type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Queried name
    pub name: String,
}

impl DnsQuestion {
    /// An `IN` class question
    #[must_use]
    pub fn internet(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            class: "IN".to_string(),
            record_type: record_type.to_string(),
            name: name.into(),
        }
    }
}

/// One resource record, with its data already rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DnsAnswer {
    /// Record class
    pub class: String,
    /// Record type mnemonic
    #[serde(rename = "type")]
    pub record_type: String,
    /// Owner name
    pub name: String,
    /// Time to live in seconds
    pub ttl: u32,
    /// Presentation form of the record data
    pub data: String,
}

impl DnsAnswer {
    /// Returns true if the record has the given type
    #[must_use]
    pub fn is(&self, record_type: RecordType) -> bool {
        self.record_type == record_type.as_str()
    }
}

/// A normalized DNS response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsResponse {
    /// Response code mnemonic (`NOERROR`, `NXDOMAIN`, ...)
    pub rcode: String,
    /// Question section
    pub questions: Vec<DnsQuestion>,
    /// Answer section
    pub answers: Vec<DnsAnswer>,
    /// Authority section
    #[serde(default)]
    pub authorities: Vec<DnsAnswer>,
    /// Message id
    pub id: u16,
    /// When the response arrived
    pub time: DateTime<Utc>,
    /// Round trip time in milliseconds
    pub query_time: u64,
}

impl DnsResponse {
    /// Data strings of answers of the given type
    #[must_use]
    pub fn data_of(&self, record_type: RecordType) -> Vec<String> {
        self.answers
            .iter()
            .filter(|a| a.is(record_type))
            .map(|a| a.data.clone())
            .collect()
    }
}

/// A response as handed back by a DoH transport, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DohPacket {
    /// Message id
    #[serde(default)]
    pub id: Option<u16>,
    /// Response code mnemonic
    #[serde(default)]
    pub rcode: Option<String>,
    /// Answer section
    #[serde(default)]
    pub answers: Option<Vec<RawAnswer>>,
    /// Authority section
    #[serde(default)]
    pub authority: Option<Vec<RawAnswer>>,
}

/// An unvalidated record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnswer {
    /// Record class
    #[serde(default)]
    pub class: Option<String>,
    /// Record type mnemonic
    #[serde(default, rename = "type")]
    pub record_type: Option<String>,
    /// Owner name
    #[serde(default)]
    pub name: Option<String>,
    /// Time to live
    #[serde(default)]
    pub ttl: Option<i64>,
    /// Presentation form of the record data
    #[serde(default)]
    pub data: Option<String>,
}

impl TryFrom<RawAnswer> for DnsAnswer {
    type Error = GlassError;

    fn try_from(raw: RawAnswer) -> Result<Self> {
        let (Some(class), Some(record_type), Some(name), Some(ttl)) =
            (raw.class, raw.record_type, raw.name, raw.ttl)
        else {
            return Err(GlassError::InvalidAnswerFormat);
        };
        let ttl = u32::try_from(ttl).map_err(|_| GlassError::InvalidAnswerFormat)?;

        Ok(Self {
            class,
            record_type,
            name,
            ttl,
            data: raw.data.unwrap_or_default(),
        })
    }
}

/// Convert a list of raw records, failing on the first malformed one
pub fn validate_answers(raw: Option<Vec<RawAnswer>>) -> Result<Vec<DnsAnswer>> {
    raw.unwrap_or_default()
        .into_iter()
        .map(DnsAnswer::try_from)
        .collect()
}

/// Name server of a zone and its addresses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameServerInfo {
    /// Host name of the server
    pub name: String,
    /// IPv4 addresses
    pub ipv4: Vec<String>,
    /// IPv6 addresses
    pub ipv6: Vec<String>,
}

/// SOA and NS metadata of a zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsZoneInfo {
    /// Zone apex
    pub zone_name: String,
    /// SOA MNAME
    pub primary_name_server: String,
    /// SOA RNAME
    pub admin_contact: String,
    /// Zone serial
    pub serial: u32,
    /// Refresh interval
    pub refresh: u32,
    /// Retry interval
    pub retry: u32,
    /// Expire limit
    pub expire: u32,
    /// Negative caching TTL
    pub minimum: u32,
    /// Authoritative servers
    pub name_servers: Vec<NameServerInfo>,
}

impl DnsZoneInfo {
    /// Build zone metadata from the presentation form of an SOA record.
    ///
    /// Missing or unparsable numeric fields become 0.
    #[must_use]
    pub fn from_soa(zone_name: impl Into<String>, data: &str) -> Self {
        let fields: Vec<&str> = data.split_whitespace().collect();
        let text = |i: usize| fields.get(i).map_or_else(String::new, |s| (*s).to_string());
        let number = |i: usize| fields.get(i).and_then(|s| s.parse().ok()).unwrap_or(0);

        Self {
            zone_name: zone_name.into(),
            primary_name_server: text(0),
            admin_contact: text(1),
            serial: number(2),
            refresh: number(3),
            retry: number(4),
            expire: number(5),
            minimum: number(6),
            name_servers: Vec::new(),
        }
    }

    /// Returns true if no SOA record was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zone_name.is_empty()
    }
}

/// A/AAAA/PTR data strings for one name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleRecords {
    /// IPv4 addresses
    #[serde(rename = "A")]
    pub a: Vec<String>,
    /// IPv6 addresses
    #[serde(rename = "AAAA")]
    pub aaaa: Vec<String>,
    /// Reverse names
    #[serde(rename = "PTR")]
    pub ptr: Vec<String>,
}

impl SimpleRecords {
    /// A then AAAA addresses
    pub fn addresses(&self) -> impl Iterator<Item = &String> {
        self.a.iter().chain(&self.aaaa)
    }
}

/// Answers grouped by record type
pub type RecordsByType = BTreeMap<String, Vec<DnsAnswer>>;

/// Deduplicate answers by full-record equality, then group them by type.
///
/// Within a type, records keep their first-seen order.
#[must_use]
pub fn group_by_type<I>(answers: I) -> RecordsByType
where
    I: IntoIterator<Item = DnsAnswer>,
{
    let mut grouped = RecordsByType::new();
    for answer in answers {
        let bucket = grouped.entry(answer.record_type.clone()).or_default();
        if !bucket.contains(&answer) {
            bucket.push(answer);
        }
    }
    grouped
}
