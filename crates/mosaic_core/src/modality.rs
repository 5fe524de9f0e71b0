//! Generation modalities.

use serde::{Deserialize, Serialize};

/// The kind of artifact a request asks the backend to generate.
///
/// # Examples
///
/// ```
/// use mosaic_core::Modality;
/// use std::str::FromStr;
///
/// assert_eq!(Modality::from_str("Video").unwrap(), Modality::Video);
/// assert_eq!(Modality::Image.to_string(), "image");
/// ```
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
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Modality {
    /// Conversational text reply
    Text,
    /// Still image
    Image,
    /// Video clip
    Video,
}

impl Modality {
    /// True for modalities whose result is a media file.
    pub fn is_media(&self) -> bool {
        !matches!(self, Modality::Text)
    }
}
