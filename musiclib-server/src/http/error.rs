//! API error type with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::ValidationError;
use crate::service::CatalogError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed path, query or body (400)
    BadRequest { message: String },

    /// Catalog failure, mapped by kind
    Catalog(CatalogError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Catalog(err) => match err {
                CatalogError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                CatalogError::InvalidParams(_) => (StatusCode::BAD_REQUEST, "invalid_params"),
                CatalogError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                CatalogError::CannotEnrich { .. } => (StatusCode::NOT_FOUND, "cannot_enrich"),
                CatalogError::UpstreamUnavailable(_) => {
                    (StatusCode::BAD_GATEWAY, "upstream_unavailable")
                }
                CatalogError::Timeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
                CatalogError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let message = match &self {
            Self::BadRequest { message } => message.clone(),
            Self::Catalog(CatalogError::Internal(e)) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                "an internal error occurred".to_owned()
            }
            Self::Catalog(CatalogError::UpstreamUnavailable(e)) => {
                tracing::warn!("Metadata lookup failed: {}", e);
                "metadata service unavailable".to_owned()
            }
            Self::Catalog(e) => e.to_string(),
        };

        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::bad_request(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::bad_request(e.body_text())
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Catalog(CatalogError::Validation(e))
    }
}
