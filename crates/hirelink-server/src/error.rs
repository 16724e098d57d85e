use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-handling failures surfaced at the HTTP boundary.
///
/// Store failures become a 500 with the underlying message attached for
/// diagnostics; retries, if any, belong to the store client. Degradable
/// conditions (unknown locations, malformed stored media) never reach here.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "message": msg }),
            ),
            AppError::Database(err) => {
                tracing::error!(error = %err, "query execution failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "success": false,
                        "message": "Internal server error",
                        "error": err.to_string(),
                    }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
