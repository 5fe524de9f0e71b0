//! Thumbnail extraction error types.
//!
//! These never reach a `generate` caller: the thumbnail resolver logs them and
//! settles on "no thumbnail".

/// Specific thumbnail extraction failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ThumbnailErrorKind {
    /// The extractor ran and failed (codec, corrupt stream, network probe)
    #[display("Frame extraction failed: {}", _0)]
    ExtractionFailed(String),
    /// The extractor did not finish in time
    #[display("Frame extraction timed out after {}s", _0)]
    Timeout(u64),
    /// The video is not accessible for probing
    #[display("Video source unavailable: {}", _0)]
    SourceUnavailable(String),
}

/// Thumbnail error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Thumbnail Error: {} at line {} in {}", kind, line, file)]
pub struct ThumbnailError {
    /// The kind of error that occurred
    pub kind: ThumbnailErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ThumbnailError {
    /// Create a new ThumbnailError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ThumbnailErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
