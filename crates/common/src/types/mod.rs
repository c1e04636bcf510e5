use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform success envelope: `{success: true, [message], [count], data}`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, message: None, count: None, data }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: Some(message.into()), count: None, data }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Listing envelope; `count` always mirrors `data.len()`.
    pub fn listing(data: Vec<T>) -> Self {
        Self { success: true, message: None, count: Some(data.len()), data }
    }
}

/// Uniform failure envelope: `{success: false, error}` plus optional
/// field lists for validation failures.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ApiFailure {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<&'static str>>,
}

impl ApiFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into(), required: None, missing: None }
    }

    pub fn missing_fields(error: impl Into<String>, required: Vec<&'static str>, missing: Vec<&'static str>) -> Self {
        Self { success: false, error: error.into(), required: Some(required), missing: Some(missing) }
    }
}
