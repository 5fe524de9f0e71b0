//! Generation request type.

use crate::Modality;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One generation request. Immutable once built.
///
/// Options are copied verbatim into the outbound body, so backend-specific
/// knobs (`temperature`, `aspect_ratio`, `duration`, ...) need no code change.
///
/// # Examples
///
/// ```
/// use mosaic_core::{GenerationRequest, Modality};
///
/// let request = GenerationRequest::builder()
///     .modality(Modality::Video)
///     .prompt("a lighthouse at dusk")
///     .model_id("video-model")
///     .option("duration", 5)
///     .build()
///     .unwrap();
/// assert_eq!(request.option("duration"), Some(&serde_json::json!(5)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct GenerationRequest {
    /// What to generate
    modality: Modality,
    /// User prompt
    prompt: String,
    /// Backend model identifier
    model_id: String,
    /// Extra body fields
    #[builder(default)]
    #[serde(default)]
    options: Map<String, Value>,
}

impl GenerationRequest {
    /// Creates a new builder for GenerationRequest.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Look up one option.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

impl GenerationRequestBuilder {
    /// Add a single option, keeping any set before.
    pub fn option(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.options
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    fn validate(&self) -> Result<(), String> {
        if self.prompt.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err("prompt must not be empty".to_string());
        }
        if self.model_id.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err("model_id must not be empty".to_string());
        }
        Ok(())
    }
}
