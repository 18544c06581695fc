/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "message": "Chat Not Found",
 *   "status": 404
 * }
 * ```
 *
 * The `message` key is what chat front ends display to the user.
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("[Server] Request failed: {}", self);
        } else {
            tracing::debug!("[Server] Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = serde_json::json!({
            "message": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
