use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ApiFailure;
use models::payload::REQUIRED_FIELDS;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const MSG_INCOMPLETE: &str = "Data tidak lengkap";
pub const MSG_NOT_FOUND: &str = "Data tidak ditemukan";
pub const MSG_NO_ROUTE: &str = "Endpoint tidak ditemukan";

/// Every failure a handler can produce. Rendered as
/// `{success: false, error}` with the status picked from the variant.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required fields: {0:?}")]
    Validation(Vec<&'static str>),
    #[error("record not found")]
    NotFound,
    #[error("malformed query: {0}")]
    InvalidQuery(String),
    #[error("{0}")]
    Store(String),
    #[error("route not found")]
    RouteNotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert a service failure, logging store faults with the operation name.
    pub fn from_service(op: &'static str, e: ServiceError) -> Self {
        if let ServiceError::Db(ref msg) = e {
            error!(op, err = %msg, "store operation failed");
        }
        e.into()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::MissingFields(fields) => ApiError::Validation(fields),
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Db(msg) => ApiError::Store(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(missing) => ApiFailure::missing_fields(MSG_INCOMPLETE, REQUIRED_FIELDS.to_vec(), missing),
            ApiError::NotFound => ApiFailure::new(MSG_NOT_FOUND),
            ApiError::InvalidQuery(msg) | ApiError::Store(msg) => ApiFailure::new(msg),
            ApiError::RouteNotFound => ApiFailure::new(MSG_NO_ROUTE),
        };
        (status, Json(body)).into_response()
    }
}
