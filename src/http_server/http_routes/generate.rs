use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::http_server::state::AppState;
use crate::matching::Candidate;
use crate::services::playlist::{GenerateError, generate_playlist};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInput {
    #[serde(default)]
    playlist_name: String,
    #[serde(default)]
    songs: Vec<Candidate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl GenerateResponse {
    fn failure(status: StatusCode, error: String) -> Response {
        (
            status,
            Json(GenerateResponse {
                success: false,
                message: None,
                error: Some(error),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let status = if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        GenerateResponse::failure(status, self.to_string())
    }
}

/// Creates the playlist on the server from the songs the user picked.
#[axum::debug_handler]
pub async fn generate(
    State(app_state): State<Arc<AppState>>,
    input: Result<Json<GenerateInput>, JsonRejection>,
) -> Response {
    let Json(input) = match input {
        Ok(input) => input,
        Err(e) => {
            return GenerateResponse::failure(
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {e}"),
            );
        }
    };

    match generate_playlist(
        app_state.navidrome.as_ref(),
        &input.playlist_name,
        &input.songs,
    )
    .await
    {
        Ok(request) => (
            StatusCode::OK,
            Json(GenerateResponse {
                success: true,
                message: Some(format!(
                    "Playlist \"{}\" created on the server with {} songs",
                    request.name,
                    request.song_ids.len()
                )),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
