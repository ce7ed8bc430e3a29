//! HTTP client for the field service
//!
//! Posts normalized fields as JSON and decodes the JSON reply.

use super::traits::{FieldTransport, TransportError};
use crate::engine::NormalizedField;
use async_trait::async_trait;
use serde_json::Value;

/// Default field service address
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

const FIELDS_API: &str = "/api/fields";

/// reqwest-backed [`FieldTransport`]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, FIELDS_API)
    }

    async fn post(&self, field: &NormalizedField) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(field)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl FieldTransport for HttpTransport {
    async fn save_field(&self, field: &NormalizedField) -> Result<Value, TransportError> {
        tracing::debug!(
            "Sending field to {}: {}",
            self.endpoint(),
            serde_json::to_string(field).unwrap_or_default()
        );

        let result = self.post(field).await;
        if let Err(e) = &result {
            tracing::error!("Error submitting field: {}", e);
        }
        result
    }
}
