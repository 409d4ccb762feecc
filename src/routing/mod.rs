//! Ownership & Routing Module
//!
//! Decides which node executes a request and sends it there.
//!
//! ## Core Concepts
//! - **Placement digest**: `FNV-1a(addr + routing_key)`, computed for this node and every peer.
//! - **Ownership**: A node owns a key when no peer's digest is strictly lower than its own. With no
//!   peers it owns everything. This is not a consistent-hash ring: changing the peer list moves a large
//!   share of keys, and nothing migrates data.
//! - **Forwarding**: A non-owner relays the request to one peer (the first in the list by default) and
//!   returns at once. The peer's result is never awaited or relayed back.
//! - **Single hop**: A relayed request is always executed by the node that receives it.

pub mod forwarder;
pub mod hash;
pub mod ownership;
pub mod router;

#[cfg(test)]
mod tests;
