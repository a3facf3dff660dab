// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Application error taxonomy. Everything a handler can fail with ends up
// here, so the HTTP mapping lives in exactly one place.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    // A referenced entity id did not resolve (or resolved to a disabled row).
    #[error("{0} not found")]
    NotFound(&'static str),

    // The underlying fetch/write failed: network, permission, schema mismatch.
    #[error("store error")]
    StoreError(#[from] sqlx::Error),

    // Invalid fixed configuration, e.g. a non-positive basis unit price.
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    #[error("internal error")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Return every field-level detail the validator collected.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NotFound(entity) => {
                let body = Json(json!({ "error": format!("{entity} not found") }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }

            // StoreError, ConfigError and InternalServerError all become 500.
            // `tracing` logs the detailed message `thiserror` gives us.
            ref e => {
                tracing::error!("internal server error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl AppError {
    /// Builds a `ValidationError` for a single field without going through
    /// the derive machinery. Used by service-level guards.
    pub fn invalid_field(field: &'static str, message: &'static str) -> Self {
        let mut error = validator::ValidationError::new("invalid");
        error.message = Some(message.into());
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, error);
        AppError::ValidationError(errors)
    }
}
