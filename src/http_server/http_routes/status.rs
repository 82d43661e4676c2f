use axum::{Json, extract::State};
use std::sync::Arc;

use crate::http_server::state::AppState;
use crate::services::navidrome::{ConnectionStatus, connection_status};

pub async fn status(State(app_state): State<Arc<AppState>>) -> Json<ConnectionStatus> {
    Json(connection_status(app_state.navidrome.as_ref(), &app_state.server_info).await)
}
