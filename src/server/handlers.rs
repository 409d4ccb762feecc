use axum::Extension;
use axum::Json;
use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::Instrument;

use super::protocol::{FORWARDED_ACK, HEADER_FORWARDED_BY, QueryRequest};
use crate::error::NodeError;
use crate::routing::router::{Outcome, QueryRouter};

/// `POST /query`.
///
/// - `200` + JSON rows when executed here
/// - `202` + `forwarded` when handed to a peer
/// - `400` + plain-text message on a malformed body or a rejected statement
pub async fn handle_query(
    Extension(router): Extension<Arc<QueryRouter>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("query", %request_id);

    async move {
        let request: QueryRequest = match serde_json::from_slice(&body) {
            Ok(req) => req,
            Err(e) => return error_response(NodeError::from(e)),
        };

        let forwarded_by = headers
            .get(HEADER_FORWARDED_BY)
            .and_then(|value| value.to_str().ok());
        let hop = router.classify_hop(forwarded_by);

        match router.dispatch(request, hop).await {
            Ok(Outcome::Local(table)) => (StatusCode::OK, Json(table)).into_response(),
            Ok(Outcome::Forwarded { peer }) => {
                tracing::info!("Forwarded to {}", peer);
                (StatusCode::ACCEPTED, FORWARDED_ACK).into_response()
            }
            Err(e) => error_response(NodeError::from(e)),
        }
    }
    .instrument(span)
    .await
}

fn error_response(err: NodeError) -> Response {
    match &err {
        NodeError::Decode(e) => tracing::debug!("Rejecting malformed request: {}", e),
        NodeError::Execution(e) => tracing::debug!("Statement failed: {}", e),
    }
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}
