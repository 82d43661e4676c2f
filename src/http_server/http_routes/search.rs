use axum::{
    Json,
    body::{Body, Bytes},
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Response, StatusCode, header},
};
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc::channel;
use tokio_stream::wrappers::ReceiverStream;

use crate::http_server::{error::ApiError, state::AppState};
use crate::services::search::{SearchEvent, run_search};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SearchInput {
    /// One "title - artist" entry per item.
    items: Vec<String>,
}

/// Streams one NDJSON event per search step, ending with `{"type":"done"}`.
#[axum::debug_handler]
pub async fn search(
    State(app_state): State<Arc<AppState>>,
    input: Result<Json<SearchInput>, JsonRejection>,
) -> Result<Response<Body>, ApiError> {
    let Json(input) =
        input.map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))?;
    if input.items.is_empty() {
        return Err(ApiError::bad_request("The item list must not be empty"));
    }

    tracing::info!("Searching {} items", input.items.len());

    // Small buffer: the search loop notices a closed stream quickly and stops
    // calling the server.
    let (tx, rx) = channel::<SearchEvent>(4);

    tokio::spawn(async move {
        run_search(app_state.navidrome.as_ref(), input.items, tx).await;
        // When this task exits, tx is dropped, and the response stream ends cleanly.
    });

    let json_stream = ReceiverStream::new(rx).map(|event| {
        let mut line = serde_json::to_vec(&event)
            .map_err(|e| std::io::Error::other(format!("json encode: {e}")))?;
        line.push(b'\n');
        Ok::<Bytes, std::io::Error>(Bytes::from(line))
    });

    let mut response = Response::new(Body::from_stream(json_stream));
    *response.status_mut() = StatusCode::OK;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/x-ndjson; charset=utf-8"),
    );
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    Ok(response)
}
