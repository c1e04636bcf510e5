use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Required fields that were absent or falsy, in declaration order.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// A value the store cannot hold in its column type.
    #[error("{0}")]
    InvalidColumn(String),
}
