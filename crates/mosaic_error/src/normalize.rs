//! Response normalization error types.

/// Why a backend response could not be turned into a canonical result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum NormalizeErrorKind {
    /// None of the known response shapes matched
    #[display("Unrecognized {} response shape: {}", modality, detail)]
    UnrecognizedResponseShape {
        /// Modality the response was parsed for
        modality: String,
        /// What was found instead
        detail: String,
    },
    /// A media item was present but carried neither a URL nor inline data
    #[display("No usable {} media in response: {}", modality, detail)]
    MediaUnavailable {
        /// Modality the response was parsed for
        modality: String,
        /// Where the lookup stopped
        detail: String,
    },
}

/// Normalization error with location tracking.
///
/// # Examples
///
/// ```
/// use mosaic_error::{NormalizeError, NormalizeErrorKind};
///
/// let err = NormalizeError::new(NormalizeErrorKind::UnrecognizedResponseShape {
///     modality: "text".to_string(),
///     detail: "object keys: [foo]".to_string(),
/// });
/// assert!(format!("{}", err).contains("Unrecognized text response shape"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Normalize Error: {} at line {} in {}", kind, line, file)]
pub struct NormalizeError {
    /// The kind of error that occurred
    pub kind: NormalizeErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl NormalizeError {
    /// Create a new normalization error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NormalizeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an unrecognized shape.
    #[track_caller]
    pub fn unrecognized(modality: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(NormalizeErrorKind::UnrecognizedResponseShape {
            modality: modality.into(),
            detail: detail.into(),
        })
    }

    /// Shorthand for a media item without any usable reference.
    #[track_caller]
    pub fn media_unavailable(modality: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(NormalizeErrorKind::MediaUnavailable {
            modality: modality.into(),
            detail: detail.into(),
        })
    }
}
