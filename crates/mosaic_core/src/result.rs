//! Canonical result types.

use crate::{MediaIntent, MediaSource, Modality, Thumbnail};
use serde::{Deserialize, Serialize};

/// The shape-independent outcome of one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationResult {
    /// Text reply; an empty string is a valid reply
    Text {
        /// Reply content
        content: String,
    },
    /// Generated image
    Image {
        /// Materialized image
        source: MediaSource,
    },
    /// Generated video
    Video {
        /// Materialized video
        source: MediaSource,
        /// Preview image, possibly filled in later
        thumbnail: Thumbnail,
    },
}

impl GenerationResult {
    /// Modality of this result.
    pub fn modality(&self) -> Modality {
        match self {
            GenerationResult::Text { .. } => Modality::Text,
            GenerationResult::Image { .. } => Modality::Image,
            GenerationResult::Video { .. } => Modality::Video,
        }
    }

    /// Primary media source, if any.
    pub fn source(&self) -> Option<&MediaSource> {
        match self {
            GenerationResult::Text { .. } => None,
            GenerationResult::Image { source } | GenerationResult::Video { source, .. } => {
                Some(source)
            }
        }
    }

    /// Copy of this result with its video thumbnail replaced.
    ///
    /// Non-video results are returned unchanged.
    pub fn with_thumbnail(&self, thumbnail: Thumbnail) -> Self {
        match self {
            GenerationResult::Video { source, .. } => GenerationResult::Video {
                source: source.clone(),
                thumbnail,
            },
            other => other.clone(),
        }
    }
}

/// A normalized response whose media has not been materialized yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalResponse {
    /// Text reply
    Text {
        /// Reply content
        content: String,
    },
    /// Image reference
    Image {
        /// Primary media
        media: MediaIntent,
    },
    /// Video reference
    Video {
        /// Primary media
        media: MediaIntent,
        /// Thumbnail shipped with the response, if any
        thumbnail: Option<MediaIntent>,
    },
}

impl CanonicalResponse {
    /// Modality of this response.
    pub fn modality(&self) -> Modality {
        match self {
            CanonicalResponse::Text { .. } => Modality::Text,
            CanonicalResponse::Image { .. } => Modality::Image,
            CanonicalResponse::Video { .. } => Modality::Video,
        }
    }
}
