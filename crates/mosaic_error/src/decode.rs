//! Inline payload decode errors.

/// A malformed inline payload.
///
/// Fatal to the generation result that carried it: a broken inline payload is
/// never downgraded to a URL fallback.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Decode Error: {} at line {} in {}", message, line, file)]
pub struct DecodeError {
    /// What the decoder rejected
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl DecodeError {
    /// Create a new DecodeError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_error::DecodeError;
    ///
    /// let err = DecodeError::new("Invalid symbol 33, offset 0.");
    /// assert!(format!("{}", err).starts_with("Decode Error"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
