//! Transport error types.

/// Transport failure conditions reported by the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// Backend could not be reached
    Unreachable(String),
    /// Backend answered with a non-success status
    Status {
        /// HTTP-style status code
        status: u16,
        /// Body or reason returned by the backend
        message: String,
    },
    /// The request did not complete in time
    Timeout,
    /// Anything else the transport could not classify
    Other(String),
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportErrorKind::Unreachable(msg) => write!(f, "Backend unreachable: {}", msg),
            TransportErrorKind::Status { status, message } => {
                write!(f, "Backend returned status {}: {}", status, message)
            }
            TransportErrorKind::Timeout => write!(f, "Request timed out"),
            TransportErrorKind::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// Transport error with location tracking.
///
/// Surfaced to the caller as-is; the core never retries a transport failure.
///
/// # Examples
///
/// ```
/// use mosaic_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::Status {
///     status: 401,
///     message: "invalid api key".to_string(),
/// });
/// assert!(format!("{}", err).contains("401"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transport Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for TransportError {}
