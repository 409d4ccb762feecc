use crate::error::ConfigError;
use std::collections::HashSet;

/// Identity of the local node plus the peers it knows about.
///
/// Construction validates the peer set: blank entries are dropped, and
/// duplicates or a peer equal to `self_addr` are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    self_addr: String,
    peers: Vec<String>,
}

impl ClusterConfig {
    pub fn new<I, S>(self_addr: impl Into<String>, peers: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let self_addr = self_addr.into().trim().to_string();
        if self_addr.is_empty() {
            return Err(ConfigError::EmptyAddress);
        }

        let mut seen = HashSet::new();
        let mut validated = Vec::new();
        for peer in peers {
            let peer = peer.as_ref().trim();
            if peer.is_empty() {
                continue;
            }
            if peer == self_addr {
                return Err(ConfigError::SelfReference(peer.to_string()));
            }
            if !seen.insert(peer.to_string()) {
                return Err(ConfigError::DuplicatePeer(peer.to_string()));
            }
            validated.push(peer.to_string());
        }

        Ok(Self {
            self_addr,
            peers: validated,
        })
    }

    /// A node with no peers. Owns every key.
    pub fn standalone(self_addr: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(self_addr, std::iter::empty::<&str>())
    }

    pub fn self_addr(&self) -> &str {
        &self.self_addr
    }

    pub fn peers(&self) -> &[String] {
        &self.peers
    }

    pub fn first_peer(&self) -> Option<&str> {
        self.peers.first().map(String::as_str)
    }

    pub fn is_standalone(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Base URL for reaching a peer over HTTP.
///
/// `:7002` is shorthand for `localhost:7002`; an address that already has a
/// scheme is used unchanged.
pub fn peer_base_url(peer: &str) -> String {
    let peer = peer.trim_end_matches('/');
    if peer.starts_with("http://") || peer.starts_with("https://") {
        peer.to_string()
    } else if peer.starts_with(':') {
        format!("http://localhost{}", peer)
    } else {
        format!("http://{}", peer)
    }
}
