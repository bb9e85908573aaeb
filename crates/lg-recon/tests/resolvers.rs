use async_trait::async_trait;
use lg_core::{
    AddressFamily, AddressInfo, AsInfo, DohMethod, DohPacket, DohTransport, GlassError,
    ProbeKind, RawAnswer, RecordType, Result, RouterBackend, RoutePayload,
};
use lg_recon::{AddressInfoResolver, DnsClient, ZoneResolver};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

fn rr(name: &str, record_type: &str, data: &str) -> RawAnswer {
    RawAnswer {
        class: Some("IN".into()),
        record_type: Some(record_type.into()),
        name: Some(name.into()),
        ttl: Some(300),
        data: Some(data.into()),
    }
}

#[derive(Default)]
struct FakeDoh {
    answers: HashMap<(String, RecordType), DohPacket>,
    failing: HashSet<(String, RecordType)>,
    queries: Mutex<Vec<(String, RecordType)>>,
}

impl FakeDoh {
    fn answer(mut self, name: &str, record_type: RecordType, records: Vec<RawAnswer>) -> Self {
        self.answers.insert(
            (name.into(), record_type),
            DohPacket {
                answers: Some(records),
                ..DohPacket::default()
            },
        );
        self
    }

    fn authority(mut self, name: &str, record_type: RecordType, records: Vec<RawAnswer>) -> Self {
        self.answers.insert(
            (name.into(), record_type),
            DohPacket {
                rcode: Some("NXDOMAIN".into()),
                authority: Some(records),
                ..DohPacket::default()
            },
        );
        self
    }

    fn fail(mut self, name: &str, record_type: RecordType) -> Self {
        self.failing.insert((name.into(), record_type));
        self
    }

    fn asked(&self, record_type: RecordType) -> Vec<String> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, t)| *t == record_type)
            .map(|(n, _)| n.clone())
            .collect()
    }
}

#[async_trait]
impl DohTransport for FakeDoh {
    async fn query(&self, name: &str, record_type: RecordType, _: DohMethod) -> Result<DohPacket> {
        let key = (name.to_string(), record_type);
        self.queries.lock().unwrap().push(key.clone());
        if self.failing.contains(&key) {
            return Err(GlassError::Api {
                code: 503,
                message: String::new(),
            });
        }
        Ok(self.answers.get(&key).cloned().unwrap_or_default())
    }

    fn server_label(&self) -> String {
        "fake#443".into()
    }
}

#[derive(Default)]
struct FakeRouter {
    prefixes: HashMap<String, Value>,
    asns: HashMap<(u32, AddressFamily), Value>,
    as_info: HashMap<u32, AsInfo>,
}

impl FakeRouter {
    fn prefix(mut self, address: &str, result: Value) -> Self {
        self.prefixes.insert(address.into(), result);
        self
    }

    fn asn(mut self, asn: u32, family: AddressFamily, result: Value) -> Self {
        self.asns.insert((asn, family), result);
        self
    }

    fn as_info(mut self, asn: u32, name: &str) -> Self {
        self.as_info.insert(
            asn,
            AsInfo {
                as_number: asn,
                as_name: name.into(),
                as_description: format!("{name} Inc."),
                as_country: "JP".into(),
            },
        );
        self
    }
}

#[async_trait]
impl RouterBackend for FakeRouter {
    async fn prefix_routes(&self, _: &str, address: &str) -> Result<RoutePayload> {
        RoutePayload::decode(self.prefixes.get(address).unwrap_or(&Value::Null))
    }

    async fn asn_routes(&self, _: &str, asn: u32, family: AddressFamily) -> Result<RoutePayload> {
        RoutePayload::decode(self.asns.get(&(asn, family)).unwrap_or(&json!({})))
    }

    async fn as_info(&self, _: &str, asn: u32) -> Result<AsInfo> {
        self.as_info.get(&asn).cloned().ok_or(GlassError::Api {
            code: 500,
            message: String::new(),
        })
    }

    async fn probe(&self, _: &str, kind: ProbeKind, host: &str) -> Result<String> {
        Ok(format!("{kind} {host}"))
    }
}

fn prefix_result(prefix: &str, origin_segments: Value) -> Value {
    json!({
        "prefix": prefix,
        "paths": [{
            "aspath": {"string": "64500 64501", "segments": origin_segments},
            "nexthops": [{"ip": "198.51.100.1", "used": true}],
            "valid": true
        }]
    })
}

const REVERSE_V4: &str = "1.2.0.192.in-addr.arpa";

fn soa(zone: &str) -> RawAnswer {
    rr(
        zone,
        "SOA",
        "ns1.example.net hostmaster.example.net 2024010101 7200 3600 1209600 300",
    )
}

// DnsClient

#[tokio::test]
async fn resolve_fills_question_and_defaults() {
    let doh = FakeDoh::default().answer("example.com", RecordType::A, vec![rr("example.com", "A", "192.0.2.1")]);
    let dns = DnsClient::new(Arc::new(doh));

    let response = dns.resolve("example.com", RecordType::A).await.unwrap();
    assert_eq!(response.rcode, "NOERROR");
    assert_eq!(response.id, 0);
    assert_eq!(response.questions[0].name, "example.com");
    assert_eq!(response.questions[0].record_type, "A");
    assert_eq!(response.questions[0].class, "IN");
    assert_eq!(response.answers[0].data, "192.0.2.1");
    assert_eq!(dns.server_label(), "fake#443");
}

#[tokio::test]
async fn malformed_answer_fails_the_query() {
    let mut broken = rr("example.com", "A", "192.0.2.1");
    broken.ttl = None;
    let dns = DnsClient::new(Arc::new(FakeDoh::default().answer(
        "example.com",
        RecordType::A,
        vec![broken],
    )));

    let err = dns.resolve("example.com", RecordType::A).await.unwrap_err();
    assert!(matches!(err, GlassError::InvalidAnswerFormat));
}

#[tokio::test]
async fn resolve_auto_by_token_kind() {
    let doh = Arc::new(
        FakeDoh::default()
            .answer("example.com", RecordType::A, vec![rr("example.com", "A", "192.0.2.1")])
            .answer(REVERSE_V4, RecordType::Ptr, vec![rr(REVERSE_V4, "PTR", "host.example.com")]),
    );
    let dns = DnsClient::new(doh.clone());

    let forward = dns.resolve_auto("example.com").await.unwrap();
    assert_eq!(forward.len(), 2);
    assert_eq!(forward[0].questions[0].record_type, "A");
    assert_eq!(forward[1].questions[0].record_type, "AAAA");

    let reverse = dns.resolve_simple("192.0.2.1").await.unwrap();
    assert_eq!(reverse.ptr, vec!["host.example.com"]);
    assert_eq!(doh.asked(RecordType::Ptr), vec![REVERSE_V4]);

    assert!(matches!(
        dns.resolve_auto("192.0.2.0/24").await,
        Err(GlassError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn resolve_full_auto_groups_and_dedups() {
    let doh = FakeDoh::default()
        .answer(
            "example.com",
            RecordType::A,
            vec![rr("example.com", "A", "192.0.2.1"), rr("example.com", "A", "192.0.2.1")],
        )
        .answer(
            "example.com",
            RecordType::Aaaa,
            vec![rr("example.com", "CNAME", "cdn.example.net"), rr("cdn.example.net", "AAAA", "2001:db8::1")],
        );
    let dns = DnsClient::new(Arc::new(doh));

    let grouped = dns.resolve_full_auto("example.com").await.unwrap();
    assert_eq!(grouped["A"].len(), 1);
    assert_eq!(grouped["AAAA"][0].data, "2001:db8::1");
    assert_eq!(grouped["CNAME"][0].data, "cdn.example.net");
}

// ZoneResolver

#[tokio::test]
async fn zone_from_authority_with_name_servers() {
    let doh = FakeDoh::default()
        .authority("www.example.com", RecordType::Soa, vec![soa("example.com")])
        .answer(
            "example.com",
            RecordType::Ns,
            vec![rr("example.com", "NS", "ns1.example.net"), rr("example.com", "NS", "ns2.example.net")],
        )
        .answer("ns1.example.net", RecordType::A, vec![rr("ns1.example.net", "A", "192.0.2.53")])
        .answer("ns1.example.net", RecordType::Aaaa, vec![rr("ns1.example.net", "AAAA", "2001:db8::53")])
        .fail("ns2.example.net", RecordType::A)
        .answer("ns2.example.net", RecordType::Aaaa, vec![rr("ns2.example.net", "AAAA", "2001:db8::54")]);
    let zones = ZoneResolver::new(DnsClient::new(Arc::new(doh)));

    let zone = zones.resolve_zone_info("www.example.com").await;
    assert!(!zone.is_degraded());
    let zone = zone.into_value();
    assert_eq!(zone.zone_name, "example.com");
    assert_eq!(zone.primary_name_server, "ns1.example.net");
    assert_eq!(zone.serial, 2_024_010_101);
    assert_eq!(zone.minimum, 300);
    assert_eq!(zone.name_servers.len(), 2);
    assert_eq!(zone.name_servers[0].ipv4, vec!["192.0.2.53"]);
    assert!(zone.name_servers[1].ipv4.is_empty());
    assert_eq!(zone.name_servers[1].ipv6, vec!["2001:db8::54"]);
}

#[tokio::test]
async fn zone_soa_failure_degrades_to_empty() {
    let zones = ZoneResolver::new(DnsClient::new(Arc::new(
        FakeDoh::default().fail("example.com", RecordType::Soa),
    )));

    let zone = zones.resolve_zone_info("example.com").await;
    assert!(zone.is_degraded());
    assert!(zone.reason().unwrap().contains("SOA example.com"));
    let zone = zone.into_value();
    assert!(zone.is_empty());
    assert!(zone.name_servers.is_empty());
}

#[tokio::test]
async fn zone_without_soa_is_empty_but_complete() {
    let zones = ZoneResolver::new(DnsClient::new(Arc::new(FakeDoh::default())));
    let zone = zones.resolve_zone_info("example.com").await;
    assert!(!zone.is_degraded());
    assert_eq!(zone.into_value().serial, 0);
}

#[tokio::test]
async fn zone_ns_failure_keeps_soa() {
    let doh = FakeDoh::default()
        .answer("example.com", RecordType::Soa, vec![soa("example.com")])
        .fail("example.com", RecordType::Ns);
    let zones = ZoneResolver::new(DnsClient::new(Arc::new(doh)));

    let zone = zones.resolve_zone_info("example.com").await;
    assert!(zone.is_degraded());
    assert_eq!(zone.value().admin_contact, "hostmaster.example.net");
    assert!(zone.value().name_servers.is_empty());
}

// AddressInfoResolver

fn resolver(doh: FakeDoh, router: FakeRouter) -> (Arc<FakeDoh>, AddressInfoResolver) {
    let doh = Arc::new(doh);
    (doh.clone(), AddressInfoResolver::new(doh, Arc::new(router)))
}

#[tokio::test]
async fn ipv4_address_report() {
    let doh = FakeDoh::default()
        .answer(REVERSE_V4, RecordType::Ptr, vec![rr(REVERSE_V4, "PTR", "host.example.com")])
        .answer("host.example.com", RecordType::A, vec![rr("host.example.com", "A", "192.0.2.1")])
        .answer("host.example.com", RecordType::Aaaa, vec![rr("host.example.com", "AAAA", "2001:db8::1")])
        .authority(REVERSE_V4, RecordType::Soa, vec![soa("2.0.192.in-addr.arpa")]);
    let router = FakeRouter::default()
        .prefix(
            "192.0.2.1",
            prefix_result("192.0.2.0/24", json!([{"type": "as-set", "list": [64501, 64502]}])),
        )
        .as_info(64501, "ALPHA")
        .as_info(64502, "BETA");
    let (_, resolver) = resolver(doh, router);

    let report = resolver.resolve_address_info("tyo1", "192.0.2.1").await.unwrap();
    let AddressInfo::Ipv4(ip) = report else {
        panic!("expected an IPv4 report, got {report:?}");
    };
    assert_eq!(ip.address, "192.0.2.1");
    assert_eq!(ip.prefixes, vec!["192.0.2.0/24"]);
    assert_eq!(ip.reverse_hostname.as_deref(), Some("host.example.com"));
    assert_eq!(ip.reverse_hostname_addresses, vec!["192.0.2.1", "2001:db8::1"]);
    assert_eq!(ip.reverse_zone.zone_name, "2.0.192.in-addr.arpa");
    let names: Vec<&str> = ip.as_info.iter().map(|a| a.as_name.as_str()).collect();
    assert_eq!(names, vec!["ALPHA", "BETA"]);
}

#[tokio::test]
async fn ptr_failure_degrades_the_report() {
    let doh = FakeDoh::default()
        .fail(REVERSE_V4, RecordType::Ptr)
        .fail(REVERSE_V4, RecordType::Soa);
    let router = FakeRouter::default()
        .prefix(
            "192.0.2.1",
            prefix_result("192.0.2.0/24", json!([{"type": "as-sequence", "list": [64500, 64501]}])),
        )
        .as_info(64501, "ALPHA");
    let (_, resolver) = resolver(doh, router);

    let report = resolver.resolve_address_info("tyo1", "192.0.2.1").await.unwrap();
    let ip = report.ip_addresses()[0].clone();
    assert_eq!(ip.reverse_hostname, None);
    assert!(ip.reverse_hostname_addresses.is_empty());
    assert!(ip.reverse_zone.is_empty());
    assert_eq!(ip.as_info[0].as_number, 64501);
}

#[tokio::test]
async fn as_info_failure_fails_the_report() {
    let router = FakeRouter::default().prefix(
        "192.0.2.1",
        prefix_result("192.0.2.0/24", json!([{"type": "as-sequence", "list": [64999]}])),
    );
    let (_, resolver) = resolver(FakeDoh::default(), router);

    let err = resolver
        .resolve_address_info("tyo1", "192.0.2.1")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn missing_route_fails_the_report() {
    let (_, resolver) = resolver(FakeDoh::default(), FakeRouter::default());
    let err = resolver
        .resolve_address_info("tyo1", "203.0.113.9")
        .await
        .unwrap_err();
    assert!(matches!(err, GlassError::NoRouteFound));
}

#[tokio::test]
async fn prefixes_skip_reverse_dns() {
    let router = FakeRouter::default()
        .prefix(
            "2001:db8::/32",
            prefix_result("2001:db8::/32", json!([{"type": "as-sequence", "list": [64501]}])),
        )
        .as_info(64501, "ALPHA");
    let (doh, resolver) = resolver(FakeDoh::default(), router);

    let report = resolver
        .resolve_address_info("tyo1", "2001:db8::/32")
        .await
        .unwrap();
    assert!(matches!(report, AddressInfo::Ipv6(_)));
    assert!(doh.asked(RecordType::Ptr).is_empty());
    assert!(doh.asked(RecordType::Soa).is_empty());
}

#[tokio::test]
async fn hostname_report_covers_every_address() {
    let doh = FakeDoh::default()
        .answer("Example.com", RecordType::A, vec![rr("example.com", "A", "bogus")])
        .answer("example.com", RecordType::A, vec![rr("example.com", "A", "192.0.2.1")])
        .answer("example.com", RecordType::Aaaa, vec![rr("example.com", "AAAA", "2001:db8::1")])
        .answer("example.com", RecordType::Soa, vec![soa("example.com")]);
    let router = FakeRouter::default()
        .prefix("192.0.2.1", prefix_result("192.0.2.0/24", json!([{"type": "as-sequence", "list": [64501]}])))
        .prefix("2001:db8::1", prefix_result("2001:db8::/32", json!([{"type": "as-sequence", "list": [64501]}])))
        .as_info(64501, "ALPHA");
    let (_, resolver) = resolver(doh, router);

    let report = resolver
        .resolve_address_info("tyo1", "Example.com.")
        .await
        .unwrap();
    let AddressInfo::Hostname(host) = report else {
        panic!("expected a hostname report");
    };
    assert_eq!(host.hostname, "example.com");
    let addresses: Vec<&str> = host.ip_addresses.iter().map(|i| i.address.as_str()).collect();
    assert_eq!(addresses, vec!["192.0.2.1", "2001:db8::1"]);
    assert_eq!(host.ip_addresses[1].prefixes, vec!["2001:db8::/32"]);
    assert_eq!(host.zone.zone_name, "example.com");
}

#[tokio::test]
async fn asn_report_and_bad_tokens() {
    let (_, resolver) = resolver(FakeDoh::default(), FakeRouter::default().as_info(63806, "MENHERA"));

    let report = resolver.resolve_address_info("tyo1", "AS63806").await.unwrap();
    assert!(matches!(report, AddressInfo::As(ref info) if info.as_name == "MENHERA"));

    let err = resolver.resolve_address_info("tyo1", "not a token").await.unwrap_err();
    assert_eq!(err.to_string(), "\"not a token\" is not valid");
}

#[tokio::test]
async fn routes_by_asn_are_v4_then_v6() {
    let router = FakeRouter::default()
        .asn(64500, AddressFamily::V6, json!({"routes": {"2001:db8::/32": [{"path": "64500"}]}}))
        .asn(64500, AddressFamily::V4, json!({"routes": {"192.0.2.0/24": [{"path": "64500"}]}}));
    let (_, resolver) = resolver(FakeDoh::default(), router);

    let routes = resolver.resolve_routes("tyo1", "as64500").await.unwrap();
    let networks: Vec<&str> = routes.iter().map(|r| r.summary.network.as_str()).collect();
    assert_eq!(networks, vec!["192.0.2.0/24", "2001:db8::/32"]);
}

#[tokio::test]
async fn routes_for_prefix_and_rejected_hostname() {
    let router = FakeRouter::default().prefix(
        "192.0.2.0/24",
        prefix_result("192.0.2.0/24", json!([{"type": "as-sequence", "list": [64501]}])),
    );
    let (_, resolver) = resolver(FakeDoh::default(), router);

    let routes = resolver.resolve_routes("tyo1", "192.0.2.0/24").await.unwrap();
    assert_eq!(routes.len(), 1);
    assert!(routes[0].has_details());

    let err = resolver.resolve_routes("tyo1", "example.com").await.unwrap_err();
    assert!(matches!(err, GlassError::InvalidInput(ref t) if t == "example.com"));
}

#[tokio::test]
async fn probes_go_straight_to_the_backend() {
    let (_, resolver) = resolver(FakeDoh::default(), FakeRouter::default());
    let text = resolver
        .backend()
        .probe("tyo1", ProbeKind::Traceroute, "192.0.2.1")
        .await
        .unwrap();
    assert_eq!(text, "traceroute 192.0.2.1");
}
