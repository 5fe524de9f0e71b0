//! Transport collaborator.

use async_trait::async_trait;
use derive_getters::Getters;
use mosaic_core::{ApiKey, Endpoint};
use mosaic_error::TransportError;
use serde_json::Value;

/// Everything a transport needs to perform one backend call.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct OutboundRequest {
    /// Logical endpoint
    endpoint: Endpoint,
    /// Resolved URL for the endpoint under the snapshot's base URL
    url: String,
    /// JSON request body
    body: Value,
    /// Credential from the snapshot taken at dispatch
    credential: Option<ApiKey>,
}

impl OutboundRequest {
    /// Create an outbound request.
    pub fn new(endpoint: Endpoint, url: String, body: Value, credential: Option<ApiKey>) -> Self {
        Self {
            endpoint,
            url,
            body,
            credential,
        }
    }
}

/// Sends a request body to a logical endpoint and returns raw JSON.
///
/// Implementations own HTTP semantics: authorization headers, status mapping,
/// timeouts. Non-success statuses must come back as
/// [`mosaic_error::TransportErrorKind::Status`]. The core does not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one call.
    async fn send(&self, request: OutboundRequest) -> Result<Value, TransportError>;
}
