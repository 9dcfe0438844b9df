pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

pub use server::{create_router, ApiServer, AppState};

use crate::error::TaskPulseError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

impl IntoResponse for TaskPulseError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(code = self.to_error_code(), "request failed: {}", self);
        }
        (status, Json(self.to_error_response())).into_response()
    }
}
