//! Process configuration: command line parsing and validation.

use clap::Parser;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use crate::cluster::types::ClusterConfig;
use crate::error::ConfigError;
use crate::routing::router::ForwardPolicy;

/// Sharded SQL query node
#[derive(Parser, Debug)]
#[command(name = "shard-node")]
#[command(about = "Executes SQL it owns, forwards the rest to a peer")]
pub struct Args {
    /// Address this node listens on and is known by (`:7001` listens on all interfaces)
    #[arg(long, default_value = ":7001")]
    pub addr: String,

    /// Comma-separated peer addresses, written the way peers name themselves
    #[arg(long, value_delimiter = ',')]
    pub peers: Vec<String>,

    /// SQLite database file (in-memory when omitted)
    #[arg(long)]
    pub db: Option<String>,

    /// Do not create and seed the demo `kv` table
    #[arg(long)]
    pub no_seed: bool,

    /// Which peer receives requests this node does not own
    #[arg(long, value_enum, default_value_t = ForwardPolicy::FirstPeer)]
    pub forward_to: ForwardPolicy,

    /// Timeout for forwarded requests, in milliseconds
    #[arg(long)]
    pub forward_timeout_ms: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated node settings, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub cluster: ClusterConfig,
    pub bind_addr: SocketAddr,
    pub db_path: Option<String>,
    pub seed: bool,
    pub forward_policy: ForwardPolicy,
    pub forward_timeout: Option<Duration>,
    pub log_level: tracing::Level,
}

impl NodeConfig {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let bind_addr = parse_listen_addr(&args.addr)?;
        let cluster = ClusterConfig::new(args.addr, &args.peers)?;

        Ok(Self {
            cluster,
            bind_addr,
            db_path: args.db,
            seed: !args.no_seed,
            forward_policy: args.forward_to,
            forward_timeout: args.forward_timeout_ms.map(Duration::from_millis),
            log_level: if args.verbose {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            },
        })
    }
}

/// Resolves a listen address. A bare `:port` binds every interface.
pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    let full = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };

    let invalid = |reason: String| ConfigError::ListenAddr {
        addr: addr.to_string(),
        reason,
    };

    full.to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("no address resolved".to_string()))
}
