//! Outbound request bodies.

use mosaic_core::{Endpoint, GenerationRequest, Modality, MosaicConfig};
use mosaic_interface::OutboundRequest;
use serde_json::{Map, Value, json};

/// Option key that turns an image generation into an edit of that image.
pub const EDIT_SOURCE_OPTION: &str = "image";

/// Logical endpoint serving `request`.
pub fn endpoint_for(request: &GenerationRequest) -> Endpoint {
    match request.modality() {
        Modality::Text => Endpoint::Responses,
        Modality::Image if request.option(EDIT_SOURCE_OPTION).is_some() => Endpoint::ImageEdits,
        Modality::Image => Endpoint::ImageGenerations,
        Modality::Video => Endpoint::VideoGenerations,
    }
}

/// Build the backend call for `request` against one configuration snapshot.
///
/// Text requests carry `messages` (the configured system prompt first, if
/// any). Image and video generations carry `prompt` and `n = 1`. Every
/// request option is then copied into the body verbatim and may override
/// those fields. Nothing else is added: durations, sizes and models only
/// appear when the caller supplied them.
///
/// # Examples
///
/// ```
/// use mosaic_core::{GenerationRequest, Modality, MosaicConfig};
/// use mosaic_orchestrator::build_outbound;
///
/// let request = GenerationRequest::builder()
///     .modality(Modality::Image)
///     .prompt("a red kite")
///     .model_id("image-model")
///     .build()
///     .unwrap();
/// let outbound = build_outbound(&MosaicConfig::default(), &request);
/// assert_eq!(outbound.url(), "https://api.x.ai/v1/images/generations");
/// assert_eq!(outbound.body()["n"], 1);
/// ```
pub fn build_outbound(config: &MosaicConfig, request: &GenerationRequest) -> OutboundRequest {
    let endpoint = endpoint_for(request);
    let mut body = Map::new();
    body.insert("model".to_string(), json!(request.model_id()));

    match endpoint {
        Endpoint::Responses => {
            let mut messages = Vec::new();
            if let Some(system) = config.system_prompt().as_deref().filter(|s| !s.trim().is_empty()) {
                messages.push(json!({"role": "system", "content": system}));
            }
            messages.push(json!({"role": "user", "content": request.prompt()}));
            body.insert("messages".to_string(), Value::Array(messages));
        }
        Endpoint::ImageEdits => {
            body.insert("prompt".to_string(), json!(request.prompt()));
        }
        Endpoint::ImageGenerations | Endpoint::VideoGenerations => {
            body.insert("prompt".to_string(), json!(request.prompt()));
            body.insert("n".to_string(), json!(1));
        }
    }

    for (key, value) in request.options() {
        body.insert(key.clone(), value.clone());
    }

    OutboundRequest::new(
        endpoint,
        config.endpoint_url(endpoint),
        Value::Object(body),
        config.api_key().clone(),
    )
}
