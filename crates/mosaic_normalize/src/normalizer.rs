//! Response normalization entry point.

use crate::TEXT_SHAPES;
use crate::media::{describe, locate_item, primary_media, thumbnail_media};
use mosaic_core::{CanonicalResponse, Modality};
use mosaic_error::NormalizeError;
use serde_json::Value;
use tracing::{debug, instrument};

/// Maps raw backend JSON to a [`CanonicalResponse`].
///
/// Every historical response shape is an entry in [`TEXT_SHAPES`],
/// [`ITEM_CONTAINERS`](crate::ITEM_CONTAINERS) or
/// [`MEDIA_KEYS`](crate::MEDIA_KEYS); supporting a new spelling is a table
/// edit. Nothing here touches the filesystem.
///
/// # Examples
///
/// ```
/// use mosaic_core::{CanonicalResponse, Modality};
/// use mosaic_normalize::SchemaNormalizer;
///
/// let raw = serde_json::json!({"choices": [{"message": {"content": "hello"}}]});
/// let response = SchemaNormalizer::new().normalize(Modality::Text, &raw).unwrap();
/// assert_eq!(response, CanonicalResponse::Text { content: "hello".to_string() });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaNormalizer;

impl SchemaNormalizer {
    /// Create a normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize a parsed response for `modality`.
    #[instrument(skip(self, raw), fields(modality = %modality))]
    pub fn normalize(
        &self,
        modality: Modality,
        raw: &Value,
    ) -> Result<CanonicalResponse, NormalizeError> {
        match modality {
            Modality::Text => self.normalize_text(raw),
            Modality::Image => {
                let item = locate_item(modality, raw)?;
                let media = primary_media(item).ok_or_else(|| {
                    NormalizeError::media_unavailable(modality.to_string(), "item has no url or inline data")
                })?;
                debug!(?media, "Normalized image response");
                Ok(CanonicalResponse::Image { media })
            }
            Modality::Video => {
                let item = locate_item(modality, raw)?;
                let media = primary_media(item).ok_or_else(|| {
                    NormalizeError::media_unavailable(modality.to_string(), "item has no url or inline data")
                })?;
                let thumbnail = thumbnail_media(item);
                debug!(?media, has_thumbnail = thumbnail.is_some(), "Normalized video response");
                Ok(CanonicalResponse::Video { media, thumbnail })
            }
        }
    }

    /// Parse and normalize a response body.
    ///
    /// Text that is not JSON at all is an unrecognized shape.
    pub fn normalize_str(
        &self,
        modality: Modality,
        body: &str,
    ) -> Result<CanonicalResponse, NormalizeError> {
        let raw: Value = serde_json::from_str(body).map_err(|e| {
            NormalizeError::unrecognized(modality.to_string(), format!("invalid JSON: {}", e))
        })?;
        self.normalize(modality, &raw)
    }

    fn normalize_text(&self, raw: &Value) -> Result<CanonicalResponse, NormalizeError> {
        for shape in TEXT_SHAPES {
            if let Some(content) = (shape.decode)(raw) {
                debug!(shape = shape.name, len = content.len(), "Normalized text response");
                return Ok(CanonicalResponse::Text {
                    content: content.to_string(),
                });
            }
        }
        Err(NormalizeError::unrecognized(
            Modality::Text.to_string(),
            describe(raw),
        ))
    }
}
