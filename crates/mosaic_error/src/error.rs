//! Crate-level error union and failure classification.

use crate::{
    ConfigError, DecodeError, NormalizeError, NormalizeErrorKind, StorageError, ThumbnailError,
    TransportError,
};

/// Crate-level error variants.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From, derive_more::Display)]
pub enum MosaicErrorKind {
    /// Transport collaborator failure
    #[display("{}", _0)]
    Transport(TransportError),
    /// Response did not match a known shape, or carried no media
    #[display("{}", _0)]
    Normalize(NormalizeError),
    /// Inline payload could not be decoded
    #[display("{}", _0)]
    Decode(DecodeError),
    /// Scratch storage failure
    #[display("{}", _0)]
    Storage(StorageError),
    /// Thumbnail extraction failure
    #[display("{}", _0)]
    Thumbnail(ThumbnailError),
    /// Configuration failure
    #[display("{}", _0)]
    Config(ConfigError),
}

/// Coarse failure classes handed to the presentation layer.
///
/// Every [`MosaicError`] maps to exactly one class, so no failure reaches a
/// caller unclassified.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display,
)]
pub enum FailureClass {
    /// Network or backend failure
    #[display("transport_failure")]
    TransportFailure,
    /// No known response shape matched
    #[display("unrecognized_response_shape")]
    UnrecognizedResponseShape,
    /// Malformed inline payload
    #[display("decode_error")]
    DecodeError,
    /// No usable media reference
    #[display("media_unavailable")]
    MediaUnavailable,
    /// Thumbnail extraction failed (recovered locally)
    #[display("thumbnail_extraction_failed")]
    ThumbnailExtractionFailed,
    /// Scratch storage failure
    #[display("storage_failure")]
    Storage,
    /// Configuration or credential failure
    #[display("configuration_failure")]
    Configuration,
}

/// Mosaic error with kind discrimination.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Mosaic Error: {}", _0)]
pub struct MosaicError(Box<MosaicErrorKind>);

impl MosaicError {
    /// Create a new error from a kind.
    pub fn new(kind: MosaicErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MosaicErrorKind {
        &self.0
    }

    /// Classify this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_error::{DecodeError, FailureClass, MosaicError};
    ///
    /// let err = MosaicError::from(DecodeError::new("bad padding"));
    /// assert_eq!(err.class(), FailureClass::DecodeError);
    /// ```
    pub fn class(&self) -> FailureClass {
        match self.kind() {
            MosaicErrorKind::Transport(_) => FailureClass::TransportFailure,
            MosaicErrorKind::Normalize(e) => match e.kind {
                NormalizeErrorKind::UnrecognizedResponseShape { .. } => {
                    FailureClass::UnrecognizedResponseShape
                }
                NormalizeErrorKind::MediaUnavailable { .. } => FailureClass::MediaUnavailable,
            },
            MosaicErrorKind::Decode(_) => FailureClass::DecodeError,
            MosaicErrorKind::Storage(_) => FailureClass::Storage,
            MosaicErrorKind::Thumbnail(_) => FailureClass::ThumbnailExtractionFailed,
            MosaicErrorKind::Config(_) => FailureClass::Configuration,
        }
    }
}

impl std::error::Error for MosaicError {}

// Generic From implementation for any type that converts to MosaicErrorKind
impl<T> From<T> for MosaicError
where
    T: Into<MosaicErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Mosaic operations.
pub type MosaicResult<T> = std::result::Result<T, MosaicError>;
