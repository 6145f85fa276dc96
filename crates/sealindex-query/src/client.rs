//! Aggregation query client backed by `reqwest`.
//!
//! One POST fetches all seven entity collections in a single round trip.
//! Every failure mode — transport error, non-2xx status, a query-error
//! payload, a missing `data` object — yields `Err`; no partial snapshot is
//! ever surfaced.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

use sealindex_core::event::EventKind;

use crate::error::QueryError;
use crate::types::ActivitySnapshot;

// ─── Query document ──────────────────────────────────────────────────────────

/// The fixed aggregation query, generated from the core field maps so the
/// selection can never drift from what the handlers store.
pub fn aggregate_query() -> &'static str {
    static QUERY: OnceLock<String> = OnceLock::new();
    QUERY.get_or_init(|| {
        let mut q = String::from("query AllSealEncryptActivity {\n");
        for kind in EventKind::ALL {
            q.push_str("  ");
            q.push_str(kind.entity_type());
            q.push_str(" {\n    id\n");
            for field in kind.field_map() {
                q.push_str("    ");
                q.push_str(field.normalized);
                q.push('\n');
            }
            q.push_str("  }\n");
        }
        q.push('}');
        q
    })
}

// ─── Fetcher contract ────────────────────────────────────────────────────────

/// Anything that can produce an aggregate snapshot.
///
/// The polling consumer is generic over this so tests can substitute a stub
/// for the HTTP client.
#[async_trait]
pub trait ActivityFetcher: Send + Sync {
    async fn fetch_all(&self) -> Result<ActivitySnapshot, QueryError>;
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// HTTP client for the aggregation endpoint.
pub struct AggregateClient {
    endpoint: String,
    http: reqwest::Client,
}

impl AggregateClient {
    /// Create a client for the given GraphQL endpoint URL.
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("failed to build reqwest client");

        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    /// Create with the default 30 s request timeout.
    pub fn default_for(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, Duration::from_secs(30))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch all seven collections in one round trip.
    pub async fn fetch_all(&self) -> Result<ActivitySnapshot, QueryError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": aggregate_query() }))
            .send()
            .await
            .map_err(|e| QueryError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(QueryError::Status {
                status: resp.status().as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| QueryError::Http(e.to_string()))?;
        decode_body(&body)
    }
}

#[async_trait]
impl ActivityFetcher for AggregateClient {
    async fn fetch_all(&self) -> Result<ActivitySnapshot, QueryError> {
        AggregateClient::fetch_all(self).await
    }
}

// ─── Response decoding ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<ActivitySnapshot>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Decode a 2xx response body into a snapshot.
///
/// A non-empty `errors` array rejects the whole response even when `data`
/// is present — all-or-nothing per poll.
pub(crate) fn decode_body(body: &str) -> Result<ActivitySnapshot, QueryError> {
    let resp: GraphQlResponse = serde_json::from_str(body)?;
    if let Some(errors) = resp.errors {
        if !errors.is_empty() {
            return Err(QueryError::GraphQl(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }
    }
    resp.data.ok_or(QueryError::MissingData)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_selects_every_collection_and_field() {
        let q = aggregate_query();
        for kind in EventKind::ALL {
            assert!(q.contains(kind.entity_type()), "missing {kind}");
            for field in kind.field_map() {
                assert!(q.contains(field.normalized));
            }
        }
        // Normalized names only — the emitted casing never reaches the wire
        assert!(!q.contains("Revokeuser"));
        assert!(q.contains("revokeUser"));
    }

    #[test]
    fn decode_surfaces_items_in_order() {
        let body = serde_json::json!({
            "data": {
                "SealEncrypt_DocumentAdded": [
                    { "id": "1_100_0", "addedBy": "0xA", "cid": "QmA", "user": "0x1" },
                    { "id": "1_100_1", "addedBy": "0xB", "cid": "QmB", "user": "0x2" },
                    { "id": "1_102_0", "addedBy": "0xC", "cid": "QmC", "user": "0x3" }
                ]
            }
        })
        .to_string();

        let snapshot = decode_body(&body).unwrap();
        assert_eq!(snapshot.document_added.len(), 3);
        let ids: Vec<_> = snapshot.document_added.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1_100_0", "1_100_1", "1_102_0"]);
    }

    #[test]
    fn decode_rejects_error_payload() {
        let body = serde_json::json!({
            "data": { "SealEncrypt_AdminAdded": [] },
            "errors": [{ "message": "field 'bogus' not found" }]
        })
        .to_string();

        let err = decode_body(&body).unwrap_err();
        match err {
            QueryError::GraphQl(messages) => {
                assert_eq!(messages, vec!["field 'bogus' not found"]);
            }
            other => panic!("expected GraphQl error, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_missing_data() {
        let err = decode_body("{}").unwrap_err();
        assert!(matches!(err, QueryError::MissingData));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let err = decode_body("not json").unwrap_err();
        assert!(matches!(err, QueryError::Deserialization(_)));
    }
}
