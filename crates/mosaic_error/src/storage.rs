//! Scratch storage error types.

/// Kinds of scratch storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// I/O error during a storage operation
    #[display("I/O error: {}", _0)]
    Io(String),
    /// Scratch directory missing or not a directory
    #[display("Invalid scratch directory: {}", _0)]
    InvalidScratchDir(String),
    /// Artifact path does not live inside the scratch directory
    #[display("Path outside scratch directory: {}", _0)]
    OutsideScratchDir(String),
    /// Artifact registry lock was poisoned by a panicking writer
    #[display("Artifact registry poisoned")]
    RegistryPoisoned,
    /// Artifact naming pattern failed to compile
    #[display("Invalid naming pattern: {}", _0)]
    NamingPattern(String),
    /// The manager was closed and accepts no new artifacts
    #[display("Scratch storage closed")]
    Closed,
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use mosaic_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Io("disk full".to_string()));
/// assert!(format!("{}", err).contains("disk full"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Wrap an I/O error, keeping the offending path in the message.
    #[track_caller]
    pub fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        Self::new(StorageErrorKind::Io(format!("{}: {}", context, err)))
    }
}
