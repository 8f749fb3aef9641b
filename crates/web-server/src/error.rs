use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Store failure reported to the client with the driver's own message.
    #[error("{0}")]
    Database(#[from] DbError),

    /// Store failure reported to the client with a fixed message only.
    #[error("{message}")]
    Masked {
        message: &'static str,
        #[source]
        source: DbError,
    },

    /// The request body did not match the expected shape.
    #[error("{0}")]
    InvalidBody(#[from] JsonRejection),
}

impl AppError {
    /// Adapter for `map_err` on read endpoints that hide the underlying error.
    pub fn masked(message: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| AppError::Masked { message, source }
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Bodies use the `{"detail": "..."}` shape existing clients expect.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (StatusCode::INTERNAL_SERVER_ERROR, db_err.to_string())
            }
            AppError::Masked { message, source } => {
                tracing::error!(error = ?source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::InvalidBody(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body.");
                (rejection.status(), rejection.body_text())
            }
        };

        let body = Json(json!({ "detail": detail }));
        (status, body).into_response()
    }
}
