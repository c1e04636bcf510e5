use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: missing {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn db(e: impl std::fmt::Display) -> Self { Self::Db(e.to_string()) }
}

/// Column coercion failures surface as store failures, the same way a
/// relational store rejects a value it cannot cast.
impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::MissingFields(fields) => Self::MissingFields(fields),
            ModelError::InvalidColumn(msg) => Self::Db(msg),
        }
    }
}
