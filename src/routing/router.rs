use std::sync::Arc;

use super::forwarder::Forwarder;
use super::ownership::{is_owner, resolve_owner};
use crate::cluster::types::ClusterConfig;
use crate::error::ExecutionError;
use crate::query::executor::QueryExecutor;
use crate::query::types::ResultTable;
use crate::server::protocol::QueryRequest;

/// Which peer receives a request this node does not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ForwardPolicy {
    /// Always the first peer in the list, whichever node actually owns the
    /// key. The receiving peer executes it.
    #[default]
    FirstPeer,
    /// The peer with the minimal placement digest.
    Owner,
}

/// Where a request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Local,
    Forward { peer: String },
}

/// How a request reached this node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// Straight from a client; subject to routing.
    Client,
    /// Relayed by a peer; always executed here.
    Forwarded,
}

/// Result of dispatching one request.
#[derive(Debug)]
pub enum Outcome {
    Local(ResultTable),
    /// Handed to `peer`. Accepted, not confirmed.
    Forwarded { peer: String },
}

/// Decides where `key` is executed.
pub fn route(cluster: &ClusterConfig, policy: ForwardPolicy, key: &str) -> Route {
    let peers = cluster.peers();
    if peers.is_empty() || is_owner(cluster.self_addr(), peers, key) {
        return Route::Local;
    }

    let peer = match policy {
        ForwardPolicy::FirstPeer => peers[0].as_str(),
        ForwardPolicy::Owner => resolve_owner(cluster.self_addr(), peers, key),
    };

    Route::Forward {
        peer: peer.to_string(),
    }
}

pub struct QueryRouter {
    cluster: Arc<ClusterConfig>,
    policy: ForwardPolicy,
    executor: QueryExecutor,
    forwarder: Arc<dyn Forwarder>,
}

impl QueryRouter {
    pub fn new(
        cluster: Arc<ClusterConfig>,
        policy: ForwardPolicy,
        executor: QueryExecutor,
        forwarder: Arc<dyn Forwarder>,
    ) -> Self {
        Self {
            cluster,
            policy,
            executor,
            forwarder,
        }
    }

    /// How a request arrived, given the forwarded-by header (if any).
    ///
    /// Only an origin listed in the peer set counts as a relay; anything else
    /// is routed like a client request.
    pub fn classify_hop(&self, forwarded_by: Option<&str>) -> Hop {
        match forwarded_by {
            Some(origin) if self.cluster.peers().iter().any(|peer| peer == origin) => {
                tracing::debug!("Received forwarded request from {}", origin);
                Hop::Forwarded
            }
            Some(origin) => {
                tracing::warn!("Ignoring forwarded-by header from unknown node {}", origin);
                Hop::Client
            }
            None => Hop::Client,
        }
    }

    /// Executes the request locally or forwards it to exactly one peer.
    ///
    /// Only local execution can fail; a forward is reported as soon as it
    /// has been dispatched.
    pub async fn dispatch(&self, request: QueryRequest, hop: Hop) -> Result<Outcome, ExecutionError> {
        let decision = match hop {
            Hop::Forwarded => Route::Local,
            Hop::Client => route(&self.cluster, self.policy, request.routing_key()),
        };

        match decision {
            Route::Local => {
                tracing::debug!("Executing locally ({:?})", hop);
                let table = self.executor.execute_blocking(request.sql).await?;
                Ok(Outcome::Local(table))
            }
            Route::Forward { peer } => {
                tracing::debug!("Not owner, forwarding to {}", peer);
                self.forwarder.forward(&peer, &request);
                Ok(Outcome::Forwarded { peer })
            }
        }
    }
}
