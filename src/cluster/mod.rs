//! Static Cluster View
//!
//! Holds this node's identity and the fixed list of peers it shares keys with.
//!
//! ## Core Concepts
//! - **Node Identity**: The address string this node is known by. Peers must list it the same way,
//!   since the string itself is hashed when deciding ownership.
//! - **Peer Set**: An ordered, duplicate-free list of the other nodes. Order matters: the first peer
//!   is the default forwarding target.
//! - **Immutability**: Both are built once at startup and shared read-only (`Arc<ClusterConfig>`).
//!   There is no join/leave protocol.

pub mod types;
