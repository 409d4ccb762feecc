//! Error taxonomy shared by the routing, query and transport layers.

use thiserror::Error;

/// Failure of a single inbound request, as seen by the transport layer.
///
/// Both variants are client-visible and map to `400 Bad Request`.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The request body is not a valid `{"sql": ...}` object.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// The local store rejected the statement or its rows could not be read.
    #[error("{0}")]
    Execution(#[from] ExecutionError),
}

/// The local store rejected or failed a statement.
///
/// Carries the store's own message verbatim.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExecutionError {
    message: String,
}

impl ExecutionError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<rusqlite::Error> for ExecutionError {
    fn from(err: rusqlite::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Outbound dispatch to a peer failed.
///
/// Only ever logged: forwarding is best-effort and the caller has already
/// been told the request is in flight.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("forward to {peer} failed: {source}")]
    Transport {
        peer: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("peer {peer} answered {status}")]
    Status {
        peer: String,
        status: reqwest::StatusCode,
    },
}

/// Invalid startup configuration. Aborts the process before it listens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate peer address: {0}")]
    DuplicatePeer(String),

    #[error("peer list contains this node's own address: {0}")]
    SelfReference(String),

    #[error("node address must not be empty")]
    EmptyAddress,

    #[error("invalid listen address {addr}: {reason}")]
    ListenAddr { addr: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
