//! Trait abstraction for the field service to enable mocking in tests

use crate::engine::NormalizedField;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// The remote call failed; kept apart from field-keyed validation errors
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Server responded with {0}")]
    Status(u16),
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Single request/response operation that hands a field to the backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FieldTransport: Send + Sync {
    /// Send the field and return the decoded JSON reply
    async fn save_field(&self, field: &NormalizedField) -> Result<Value, TransportError>;
}
