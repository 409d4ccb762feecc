//! Query Endpoint Protocol
//!
//! Defines the single public endpoint and its request body. The same body is
//! replayed unchanged when a node forwards a request to a peer.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Public endpoint accepting `{"sql": "<statement>"}`.
pub const ENDPOINT_QUERY: &str = "/query";

/// Header set on forwarded requests, carrying the forwarding node's address.
/// A node receiving it from one of its configured peers executes locally
/// instead of routing again. The value is not authenticated, so the header
/// only belongs on a closed peer network.
pub const HEADER_FORWARDED_BY: &str = "x-shard-forwarded-by";

/// Body of the `202 Accepted` reply sent when a request was handed to a peer.
pub const FORWARDED_ACK: &str = "forwarded";

// --- Data Transfer Objects ---

/// A query submitted by a client (or replayed by a peer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The statement, passed verbatim to the owning node's store.
    pub sql: String,

    /// Optional declared shard key. When absent the statement text itself is
    /// hashed, so two spellings of the same query may land on different nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_key: Option<String>,
}

impl QueryRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            shard_key: None,
        }
    }

    pub fn with_shard_key(mut self, key: impl Into<String>) -> Self {
        self.shard_key = Some(key.into());
        self
    }

    /// The string hashed to decide ownership.
    pub fn routing_key(&self) -> &str {
        self.shard_key.as_deref().unwrap_or(&self.sql)
    }
}
