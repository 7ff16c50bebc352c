use crate::error::RelayError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::RoomNotFound(_) | RelayError::PeerNotFound { .. } => StatusCode::NOT_FOUND,
            RelayError::CoordinatorUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::TransportWrite { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
