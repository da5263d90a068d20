// src/models/common.rs
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body for failures the relay produces itself. Upstream bodies are never wrapped in it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorMessage {
    pub error: String,
}

impl ErrorMessage {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
