//! Sharded Query Node Library
//!
//! This library crate defines the modules that make up a single query node.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! Every node knows a fixed list of peers. For each request it hashes a routing key (the statement
//! itself unless a shard key is given) together with every node address; the node with the lowest
//! digest owns the key. Owners execute against their embedded SQLite store, everyone else relays the
//! request to a single peer and answers `202 Accepted` straight away.
//!
//! ## Architecture Modules
//! - **`cluster`**: This node's identity and its static, validated peer set.
//! - **`routing`**: Placement hash, ownership rule, the `QueryRouter`, and the outbound forwarder.
//! - **`query`**: The local data store contract, its SQLite implementation, and result tables.
//! - **`server`**: The HTTP endpoint (`POST /query`) and its wire types.
//! - **`config`**: Command line parsing into a validated `NodeConfig`.
//! - **`error`**: Decode, execution, forward and configuration errors.

pub mod cluster;
pub mod config;
pub mod error;
pub mod query;
pub mod routing;
pub mod server;
