use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
};

/// A request rejected before any work started, answered with a plain-text message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

// Tell axum how to convert `ApiError` into a response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response<Body> {
        tracing::debug!("Rejecting request ({}): {}", self.status, self.message);
        (self.status, self.message).into_response()
    }
}
