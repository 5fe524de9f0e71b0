//! Temp artifact types.

use crate::Modality;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identifier of one generation attempt.
///
/// Every artifact written on behalf of an attempt is owned by its id, and the
/// result log is keyed by it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct ResultId(uuid::Uuid);

impl ResultId {
    /// Allocate a fresh random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ResultId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a scratch file holds, which fixes its name prefix and extension.
///
/// File names follow `{prefix}_{token}.{ext}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ArtifactKind {
    /// Decoded inline image
    Image,
    /// Decoded inline video
    Video,
    /// Provided-inline or extracted video thumbnail
    Thumbnail,
}

impl ArtifactKind {
    /// Every kind, in sweep-pattern order.
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Image,
        ArtifactKind::Video,
        ArtifactKind::Thumbnail,
    ];

    /// File name prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Image => "image",
            ArtifactKind::Video => "video",
            ArtifactKind::Thumbnail => "thumb",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Image | ArtifactKind::Thumbnail => "jpg",
            ArtifactKind::Video => "mp4",
        }
    }

    /// MIME type assumed when the payload did not carry one.
    pub fn default_mime(&self) -> &'static str {
        match self {
            ArtifactKind::Image | ArtifactKind::Thumbnail => "image/jpeg",
            ArtifactKind::Video => "video/mp4",
        }
    }

    /// The artifact kind used for a modality's primary media.
    pub fn for_modality(modality: Modality) -> Option<Self> {
        match modality {
            Modality::Text => None,
            Modality::Image => Some(ArtifactKind::Image),
            Modality::Video => Some(ArtifactKind::Video),
        }
    }

    /// File name for the given unique token.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_core::ArtifactKind;
    ///
    /// assert_eq!(ArtifactKind::Video.file_name("abc"), "video_abc.mp4");
    /// ```
    pub fn file_name(&self, token: &str) -> String {
        format!("{}_{}.{}", self.prefix(), token, self.extension())
    }
}

/// A file on scratch storage owned by one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TempArtifact {
    /// Absolute path inside the scratch directory
    path: PathBuf,
    /// What the file holds
    kind: ArtifactKind,
    /// When the artifact was created
    created_at: DateTime<Utc>,
    /// Attempt that owns the file
    owner: ResultId,
}

impl TempArtifact {
    /// Create an artifact record stamped with the current time.
    pub fn new(path: impl Into<PathBuf>, kind: ArtifactKind, owner: ResultId) -> Self {
        Self {
            path: path.into(),
            kind,
            created_at: Utc::now(),
            owner,
        }
    }

    /// Borrow the path as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.path
    }
}
