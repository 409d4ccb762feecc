//! HTTP Transport Module
//!
//! Exposes the router over a single JSON endpoint.
//!
//! ## Responsibilities
//! - **Decoding**: Parses `{"sql": ...}` bodies; malformed input never reaches the router.
//! - **Dispatch**: Hands decoded requests to `QueryRouter`, marking requests relayed by a peer so they
//!   are executed rather than routed again.
//! - **Encoding**: Rows as a JSON array, failures and forward acknowledgments as plain text.

pub mod handlers;
pub mod protocol;


use axum::Extension;
use axum::Router;
use axum::routing::post;
use std::sync::Arc;

use crate::routing::router::QueryRouter;
use handlers::handle_query;
use protocol::ENDPOINT_QUERY;

pub fn app(router: Arc<QueryRouter>) -> Router {
    Router::new()
        .route(ENDPOINT_QUERY, post(handle_query))
        .layer(Extension(router))
}

/// Serves `app` on an already bound listener until the process stops.
pub async fn serve(listener: tokio::net::TcpListener, router: Arc<QueryRouter>) -> std::io::Result<()> {
    axum::serve(listener, app(router)).await
}
