use clap::Parser;
use shard_node::config::{Args, NodeConfig};
use shard_node::query::executor::QueryExecutor;
use shard_node::query::store::SqliteStore;
use shard_node::routing::forwarder::HttpForwarder;
use shard_node::routing::router::QueryRouter;
use shard_node::server;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = NodeConfig::from_args(Args::parse())?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    tracing::info!("Starting node {}", config.cluster.self_addr());
    if config.cluster.is_standalone() {
        tracing::info!("No peers configured, every key is owned locally");
    } else {
        tracing::info!("Peers: {:?}", config.cluster.peers());
    }

    // 1. Local store:
    let store = match &config.db_path {
        Some(path) => SqliteStore::open(path)?,
        None => SqliteStore::open_in_memory()?,
    };
    if config.seed {
        store.seed_demo()?;
    }

    // 2. Routing:
    let cluster = Arc::new(config.cluster.clone());
    let forwarder = HttpForwarder::new(cluster.self_addr(), config.forward_timeout)?;
    let router = Arc::new(QueryRouter::new(
        cluster,
        config.forward_policy,
        QueryExecutor::new(Arc::new(store)),
        Arc::new(forwarder),
    ));

    // 3. HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        "HTTP server listening on {} (forward policy: {:?})",
        config.bind_addr,
        config.forward_policy
    );

    server::serve(listener, router).await?;

    Ok(())
}
