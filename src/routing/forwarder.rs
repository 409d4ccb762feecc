use std::time::Duration;

use crate::cluster::types::peer_base_url;
use crate::error::{ConfigError, ForwardError};
use crate::server::protocol::{ENDPOINT_QUERY, HEADER_FORWARDED_BY, QueryRequest};

/// Outbound seam of the router: hands a request to a peer without waiting
/// for the peer's answer.
pub trait Forwarder: Send + Sync {
    /// Dispatches `request` to `peer` in the background. Failures are the
    /// implementation's to log; the caller only learns that a forward was
    /// attempted.
    fn forward(&self, peer: &str, request: &QueryRequest);
}

/// Replays the query body to `http://<peer>/query` over HTTP.
pub struct HttpForwarder {
    http_client: reqwest::Client,
    origin: String,
}

impl HttpForwarder {
    /// `origin` is this node's address, sent in the forwarded-by header.
    pub fn new(origin: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            origin: origin.into(),
        })
    }

    /// Sends one request and waits for the peer's status. Used by the
    /// background task spawned from [`Forwarder::forward`].
    pub async fn send(
        client: &reqwest::Client,
        origin: &str,
        peer: &str,
        request: &QueryRequest,
    ) -> Result<reqwest::StatusCode, ForwardError> {
        let url = format!("{}{}", peer_base_url(peer), ENDPOINT_QUERY);

        let response = client
            .post(url)
            .header(HEADER_FORWARDED_BY, origin)
            .json(request)
            .send()
            .await
            .map_err(|source| ForwardError::Transport {
                peer: peer.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status {
                peer: peer.to_string(),
                status,
            });
        }
        Ok(status)
    }
}

impl Forwarder for HttpForwarder {
    fn forward(&self, peer: &str, request: &QueryRequest) {
        let client = self.http_client.clone();
        let origin = self.origin.clone();
        let peer = peer.to_string();
        let request = request.clone();

        tokio::spawn(async move {
            match Self::send(&client, &origin, &peer, &request).await {
                Ok(status) => tracing::debug!("Forward to {} answered {}", peer, status),
                Err(e) => tracing::warn!("{}", e),
            }
        });
    }
}
