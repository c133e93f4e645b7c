use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid calculator input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        };
        let error_message = self.to_string();

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
