pub mod client;

use serde::Serialize;

use crate::navidrome::NavidromeError;
use crate::ports::navidrome::NavidromeClient;

/// Static facts about the configured server, reported alongside the ping result.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub server_url: String,
    pub user: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionErrorKind {
    NetworkError,
    AuthError,
    ApiError,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub connected: bool,
    pub server_url: String,
    pub user: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ConnectionErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConnectionErrorKind {
    fn from_error(error: &NavidromeError) -> Self {
        match error {
            NavidromeError::InvalidUrl(_) | NavidromeError::Transport(_) => Self::NetworkError,
            NavidromeError::Auth(_) => Self::AuthError,
            NavidromeError::Decode(_) | NavidromeError::Api { .. } => Self::ApiError,
        }
    }
}

/// Pings the server and classifies any failure.
pub async fn connection_status(
    client: &dyn NavidromeClient,
    info: &ServerInfo,
) -> ConnectionStatus {
    let result = client.ping().await;

    let (error_kind, message) = match &result {
        Ok(()) => (None, None),
        Err(e) => {
            tracing::warn!("Navidrome connection check failed: {}", e);
            (Some(ConnectionErrorKind::from_error(e)), Some(e.to_string()))
        }
    };

    ConnectionStatus {
        connected: result.is_ok(),
        server_url: info.server_url.clone(),
        user: info.user.clone(),
        version: info.version.clone(),
        error_kind,
        message,
    }
}
