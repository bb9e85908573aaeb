//! DNS-over-HTTPS transport (RFC 8484).

use crate::client::handle_error;
use crate::config::DEFAULT_DOH_URL;
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RData, Record, RecordType as WireType};
use lg_core::{DohMethod, DohPacket, DohTransport, GlassError, RawAnswer, RecordType, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use tracing::debug;
use url::Url;

const DNS_MESSAGE: &str = "application/dns-message";

/// Resolver speaking the DoH wire format over HTTPS
#[derive(Clone)]
pub struct HttpsDohTransport {
    http: HttpClient,
    url: String,
    server_label: String,
}

impl HttpsDohTransport {
    /// Transport for the default resolver
    #[must_use]
    pub fn new() -> Self {
        Self::with_http(HttpClient::new(), DEFAULT_DOH_URL)
    }

    /// Transport using an existing HTTP client
    #[must_use]
    pub fn with_http(http: HttpClient, url: &str) -> Self {
        Self {
            http,
            url: url.to_string(),
            server_label: server_label(url),
        }
    }

    /// Resolver URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn exchange(&self, wire: Vec<u8>, method: DohMethod) -> Result<Vec<u8>> {
        let request = match method {
            DohMethod::Get => {
                let mut url = Url::parse(&self.url)
                    .map_err(|e| GlassError::Config(format!("invalid DoH URL: {e}")))?;
                url.query_pairs_mut()
                    .append_pair("dns", &URL_SAFE_NO_PAD.encode(&wire));
                debug!(url = %url, "DoH GET request");
                self.http.get(url)
            }
            DohMethod::Post => {
                debug!(url = %self.url, "DoH POST request");
                self.http
                    .post(&self.url)
                    .header(CONTENT_TYPE, DNS_MESSAGE)
                    .body(wire)
            }
        };

        let response = request
            .header(ACCEPT, DNS_MESSAGE)
            .send()
            .await
            .map_err(|e| GlassError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return handle_error(status.as_u16(), response).await;
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| GlassError::Http(e.to_string()))?;
        Ok(body.to_vec())
    }
}

impl Default for HttpsDohTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DohTransport for HttpsDohTransport {
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        method: DohMethod,
    ) -> Result<DohPacket> {
        let wire = encode_query(name, record_type)?;
        let body = self.exchange(wire, method).await?;
        decode_response(&body)
    }

    fn server_label(&self) -> String {
        self.server_label.clone()
    }
}

/// `host#port` of the resolver, as `dig` prints its server
fn server_label(url: &str) -> String {
    Url::parse(url).map_or_else(
        |_| url.to_string(),
        |u| {
            let host = u.host_str().unwrap_or_default().to_string();
            match u.port_or_known_default() {
                Some(port) => format!("{host}#{port}"),
                None => host,
            }
        },
    )
}

const fn wire_type(record_type: RecordType) -> WireType {
    match record_type {
        RecordType::A => WireType::A,
        RecordType::Aaaa => WireType::AAAA,
        RecordType::Cname => WireType::CNAME,
        RecordType::Mx => WireType::MX,
        RecordType::Ns => WireType::NS,
        RecordType::Ptr => WireType::PTR,
        RecordType::Soa => WireType::SOA,
        RecordType::Txt => WireType::TXT,
    }
}

/// Build a recursive query with id 0
pub fn encode_query(name: &str, record_type: RecordType) -> Result<Vec<u8>> {
    let fqdn = format!("{}.", name.trim_end_matches('.'));
    let name = Name::from_ascii(&fqdn).map_err(|e| GlassError::InvalidInput(format!("{fqdn}: {e}")))?;

    let mut message = Message::new();
    message
        .set_id(0)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(name, wire_type(record_type)));

    message.to_vec().map_err(|e| GlassError::Dns(e.to_string()))
}

/// Parse a wire response into a raw packet
pub fn decode_response(body: &[u8]) -> Result<DohPacket> {
    let message = Message::from_vec(body).map_err(|e| GlassError::Dns(e.to_string()))?;

    Ok(DohPacket {
        id: Some(message.id()),
        rcode: Some(rcode_mnemonic(message.response_code())),
        answers: Some(message.answers().iter().map(raw_answer).collect()),
        authority: Some(message.name_servers().iter().map(raw_answer).collect()),
    })
}

fn rcode_mnemonic(code: ResponseCode) -> String {
    let value = u16::from(code);
    let name = match value {
        0 => "NOERROR",
        1 => "FORMERR",
        2 => "SERVFAIL",
        3 => "NXDOMAIN",
        4 => "NOTIMP",
        5 => "REFUSED",
        6 => "YXDOMAIN",
        7 => "YXRRSET",
        8 => "NXRRSET",
        9 => "NOTAUTH",
        10 => "NOTZONE",
        _ => return format!("RCODE{value}"),
    };
    name.to_string()
}

fn bare_name(name: &Name) -> String {
    let text = name.to_string();
    text.strip_suffix('.').unwrap_or(&text).to_string()
}

fn record_data(data: &RData) -> String {
    match data {
        RData::SOA(soa) => format!(
            "{} {} {} {} {} {} {}",
            bare_name(soa.mname()),
            bare_name(soa.rname()),
            soa.serial(),
            soa.refresh(),
            soa.retry(),
            soa.expire(),
            soa.minimum()
        ),
        RData::TXT(txt) => txt
            .txt_data()
            .iter()
            .map(|part| String::from_utf8_lossy(part))
            .collect(),
        RData::PTR(ptr) => bare_name(&ptr.0),
        RData::NS(ns) => bare_name(&ns.0),
        RData::CNAME(cname) => bare_name(&cname.0),
        RData::MX(mx) => format!("{} {}", mx.preference(), bare_name(mx.exchange())),
        other => other.to_string(),
    }
}

fn raw_answer(record: &Record) -> RawAnswer {
    RawAnswer {
        class: Some(record.dns_class().to_string()),
        record_type: Some(record.record_type().to_string()),
        name: Some(bare_name(record.name())),
        ttl: Some(i64::from(record.ttl())),
        data: Some(record_data(record.data())),
    }
}
