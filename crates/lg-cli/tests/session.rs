use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record};
use lg_cli::history::HistoryEntry;
use lg_cli::session::{Outcome, Session};
use looking_glass::recon::AddressInfoResolver;
use looking_glass::{CommandName, LookingGlassClient};
use serde_json::json;
use std::net::Ipv4Addr;
use std::time::Duration;
use wiremock::matchers::{path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session(server: &MockServer) -> Session {
    let client = LookingGlassClient::builder()
        .base_url(&server.uri())
        .build()
        .unwrap();
    Session::new("tyo1", CommandName::Ipinfo, AddressInfoResolver::with_client(client))
}

fn a_response() -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_message_type(MessageType::Response)
        .set_response_code(ResponseCode::NoError)
        .add_answer(Record::from_rdata(
            Name::from_ascii("example.com.").unwrap(),
            120,
            RData::A(A(Ipv4Addr::new(192, 0, 2, 10))),
        ));
    message.to_vec().unwrap()
}

fn entry(outcome: Outcome) -> HistoryEntry {
    match outcome {
        Outcome::Entry(entry) => entry,
        other => panic!("expected an entry, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_becomes_an_error_entry() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1/ping"))
        .and(query_param("host", "192.0.2.1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session(&server);
    let entry = entry(session.execute("ping 192.0.2.1").await);

    assert!(entry.is_error);
    assert_eq!(entry.hostname, "tyo1");
    assert_eq!(entry.command, "ping 192.0.2.1");
    assert_eq!(entry.result, "HTTP error! status: 502");
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn asn_routes_list_v4_before_v6() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1/bgp/asn/v4/json"))
        .and(query_param("asn", "64500"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(100))
                .set_body_json(json!({
                    "result": {"routes": {"192.0.2.0/24": [{"path": "64500", "nexthops": []}]}}
                })),
        )
        .mount(&server)
        .await;
    Mock::given(path("/api/v1/bgp/asn/v6/json"))
        .and(query_param("asn", "64500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"routes": {"2001:db8::/32": [{"path": "64500", "nexthops": []}]}}
        })))
        .mount(&server)
        .await;

    let mut session = session(&server);
    let entry = entry(session.execute("bgp AS64500").await);

    assert!(!entry.is_error, "{}", entry.result);
    assert_eq!(entry.command, "show bgp AS64500");
    let v4 = entry.result.find("192.0.2.0/24").unwrap();
    let v6 = entry.result.find("2001:db8::/32").unwrap();
    assert!(v4 < v6);
}

#[tokio::test]
async fn nslookup_prints_dig_style_answers() {
    let server = MockServer::start().await;
    Mock::given(path("/dns-query"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/dns-message")
                .set_body_bytes(a_response()),
        )
        .mount(&server)
        .await;

    let mut session = session(&server);
    let entry = entry(session.execute("nslookup example.com").await);

    assert!(!entry.is_error, "{}", entry.result);
    assert_eq!(entry.command, "nslookup example.com");
    assert!(entry.result.contains(";; ANSWER SECTION:"));
    assert!(entry.result.contains("192.0.2.10"));
}

#[tokio::test]
async fn prefix_report_and_history() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1/bgp/json"))
        .and(query_param("address", "192.0.2.0/24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "prefix": "192.0.2.0/24",
                "paths": [{
                    "aspath": {"string": "64500", "segments": [{"type": "as-sequence", "list": [64500]}]},
                    "peer": {"type": "external", "peerId": "198.51.100.1"},
                    "bestpath": {"overall": true},
                    "nexthops": [{"ip": "198.51.100.1", "used": true}],
                    "origin": "IGP",
                    "valid": true,
                    "version": 1
                }]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(path("/api/v1/as_info"))
        .and(query_param("asn", "64500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"as_name": "EXAMPLE", "as_description": "Example Net", "as_country": "JP"}
        })))
        .mount(&server)
        .await;

    let mut session = session(&server);

    // no command word: the default command runs
    let report = entry(session.execute("192.0.2.0/24").await);
    assert!(!report.is_error, "{}", report.result);
    assert!(report.result.contains("IP Info for 192.0.2.0/24:"));
    assert!(report.result.contains("Prefixes: 192.0.2.0/24"));
    assert!(report.result.contains("Origin AS: AS64500 EXAMPLE"));

    let rejected = entry(session.execute("ping AS64500").await);
    assert!(rejected.is_error);
    assert_eq!(rejected.result, "not valid");

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.execute("clear").await, Outcome::Cleared);
    assert!(session.history().is_empty());
}
