//! Media source types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A renderable media reference.
///
/// There is no empty variant: a response without a URL or inline bytes is a
/// `MediaUnavailable` failure rather than a zero-valued source.
///
/// # Examples
///
/// ```
/// use mosaic_core::MediaSource;
///
/// let remote = MediaSource::Remote { url: "https://example.com/a.mp4".to_string() };
/// assert_eq!(remote.locator(), "https://example.com/a.mp4");
/// assert!(remote.local_path().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaSource {
    /// Media fetched by the renderer from a URL
    Remote {
        /// Location of the media
        url: String,
    },
    /// Media decoded from an inline payload into a scratch file
    Inline {
        /// Scratch file holding the decoded bytes
        local_path: PathBuf,
        /// MIME type reported by the payload, or the kind's default
        mime_hint: String,
    },
}

impl MediaSource {
    /// URL or filesystem path, whichever this source carries.
    pub fn locator(&self) -> String {
        match self {
            MediaSource::Remote { url } => url.clone(),
            MediaSource::Inline { local_path, .. } => local_path.display().to_string(),
        }
    }

    /// Local file backing an inline source.
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            MediaSource::Remote { .. } => None,
            MediaSource::Inline { local_path, .. } => Some(local_path),
        }
    }

    /// True if this source is a remote URL.
    pub fn is_remote(&self) -> bool {
        matches!(self, MediaSource::Remote { .. })
    }
}

/// Preview image for a video result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Thumbnail {
    /// Thumbnail shipped with the response
    Provided {
        /// Materialized thumbnail media
        source: MediaSource,
    },
    /// First frame extracted locally from the video
    Extracted {
        /// Scratch file holding the frame
        local_path: PathBuf,
    },
    /// No thumbnail; a valid terminal state, not an error
    #[default]
    None,
}

impl Thumbnail {
    /// True unless this is `Thumbnail::None`.
    pub fn is_some(&self) -> bool {
        !matches!(self, Thumbnail::None)
    }
}

/// Media reference as found in a response, before materialization.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaIntent {
    /// A URL; materializes to `MediaSource::Remote` unchanged
    Url(String),
    /// Encoded bytes carried in the response body
    Inline {
        /// Encoded payload, possibly a `data:` URL
        data: String,
        /// MIME type named by the payload, if any
        mime_hint: Option<String>,
    },
}

impl MediaIntent {
    /// Build an inline intent without a MIME hint.
    pub fn inline(data: impl Into<String>) -> Self {
        MediaIntent::Inline {
            data: data.into(),
            mime_hint: None,
        }
    }
}

// Inline payloads can be megabytes; keep them out of logs.
impl std::fmt::Debug for MediaIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaIntent::Url(url) => f.debug_tuple("Url").field(url).finish(),
            MediaIntent::Inline { data, mime_hint } => f
                .debug_struct("Inline")
                .field("data_len", &data.len())
                .field("mime_hint", mime_hint)
                .finish(),
        }
    }
}
