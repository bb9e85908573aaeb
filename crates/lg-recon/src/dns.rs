//! DNS resolution over a DoH transport.

use chrono::Utc;
use futures_util::future::{join, try_join_all};
use lg_core::{
    build_reverse_name, classify_token, group_by_type, validate_answers, DnsQuestion,
    DnsResponse, DohMethod, DohTransport, GlassError, RecordType, RecordsByType, Result,
    SimpleRecords, TokenKind,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Name and address lookups
#[derive(Clone)]
pub struct DnsClient {
    transport: Arc<dyn DohTransport>,
    method: DohMethod,
}

impl DnsClient {
    /// Create a client that queries with GET
    #[must_use]
    pub fn new(transport: Arc<dyn DohTransport>) -> Self {
        Self {
            transport,
            method: DohMethod::Get,
        }
    }

    /// Use a different HTTP method for queries
    #[must_use]
    pub fn with_method(mut self, method: DohMethod) -> Self {
        self.method = method;
        self
    }

    /// Label of the resolver, for dig-style output
    #[must_use]
    pub fn server_label(&self) -> String {
        self.transport.server_label()
    }

    /// Send one query and normalize the answer.
    ///
    /// Fails with `InvalidAnswerFormat` if any record lacks its class, type,
    /// name or TTL.
    pub async fn resolve(&self, name: &str, record_type: RecordType) -> Result<DnsResponse> {
        debug!(name, %record_type, "DNS query");
        let started = Instant::now();
        let packet = self.transport.query(name, record_type, self.method).await?;
        let query_time = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        Ok(DnsResponse {
            rcode: packet.rcode.unwrap_or_else(|| "NOERROR".to_string()),
            questions: vec![DnsQuestion::internet(name, record_type)],
            answers: validate_answers(packet.answers)?,
            authorities: validate_answers(packet.authority)?,
            id: packet.id.unwrap_or(0),
            time: Utc::now(),
            query_time,
        })
    }

    /// A and AAAA for a host name, PTR for an address
    pub async fn resolve_auto(&self, name: &str) -> Result<Vec<DnsResponse>> {
        match classify_token(name).kind() {
            Some(TokenKind::Hostname) => {
                let (a, aaaa) = join(
                    self.resolve(name, RecordType::A),
                    self.resolve(name, RecordType::Aaaa),
                )
                .await;
                Ok(vec![a?, aaaa?])
            }
            Some(kind) if kind.is_address() => {
                let reverse = build_reverse_name(name)?;
                Ok(vec![self.resolve(&reverse, RecordType::Ptr).await?])
            }
            _ => Err(GlassError::InvalidInput(name.to_string())),
        }
    }

    /// Like [`resolve_auto`](Self::resolve_auto), reduced to data strings
    pub async fn resolve_simple(&self, name: &str) -> Result<SimpleRecords> {
        let mut records = SimpleRecords::default();
        for response in self.resolve_auto(name).await? {
            records.a.extend(response.data_of(RecordType::A));
            records.aaaa.extend(response.data_of(RecordType::Aaaa));
            records.ptr.extend(response.data_of(RecordType::Ptr));
        }
        Ok(records)
    }

    /// Query several types at once; answers are deduplicated and grouped
    pub async fn resolve_full(&self, name: &str, types: &[RecordType]) -> Result<RecordsByType> {
        let responses =
            try_join_all(types.iter().map(|record_type| self.resolve(name, *record_type))).await?;
        Ok(group_by_type(
            responses.into_iter().flat_map(|response| response.answers),
        ))
    }

    /// A and AAAA for a host name, PTR for an address, grouped by type
    pub async fn resolve_full_auto(&self, name: &str) -> Result<RecordsByType> {
        match classify_token(name).kind() {
            Some(TokenKind::Hostname) => {
                self.resolve_full(name, &[RecordType::A, RecordType::Aaaa])
                    .await
            }
            Some(kind) if kind.is_address() => self.resolve_full_by_ptr(name).await,
            _ => Err(GlassError::InvalidInput(name.to_string())),
        }
    }

    /// PTR records for an address, grouped by type
    pub async fn resolve_full_by_ptr(&self, address: &str) -> Result<RecordsByType> {
        let reverse = build_reverse_name(address)?;
        self.resolve_full(&reverse, &[RecordType::Ptr]).await
    }
}
