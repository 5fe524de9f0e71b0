//! Scratch file naming convention: `{prefix}_{token}.{ext}`.

use mosaic_core::ArtifactKind;
use mosaic_error::{StorageError, StorageErrorKind};
use regex::Regex;

/// Generates and recognizes artifact file names.
///
/// Tokens are 32 lowercase hex digits (a v4 UUID without hyphens), so a name
/// like `image_notes.jpg` a user dropped into the directory never matches.
#[derive(Debug, Clone)]
pub struct ArtifactNaming {
    pattern: Regex,
}

impl ArtifactNaming {
    /// Compile the recognizer for every [`ArtifactKind`].
    pub fn new() -> Result<Self, StorageError> {
        let alternatives: Vec<String> = ArtifactKind::ALL
            .iter()
            .map(|kind| {
                format!(
                    r"{}_[0-9a-f]{{32}}\.{}",
                    regex::escape(kind.prefix()),
                    regex::escape(kind.extension())
                )
            })
            .collect();
        let pattern = Regex::new(&format!("^(?:{})$", alternatives.join("|")))
            .map_err(|e| StorageError::new(StorageErrorKind::NamingPattern(e.to_string())))?;
        Ok(Self { pattern })
    }

    /// Fresh file name for `kind`.
    pub fn generate(&self, kind: ArtifactKind) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        kind.file_name(&token)
    }

    /// True if `file_name` follows the convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_storage::ArtifactNaming;
    ///
    /// let naming = ArtifactNaming::new().unwrap();
    /// assert!(naming.matches("video_0123456789abcdef0123456789abcdef.mp4"));
    /// assert!(!naming.matches("video_0123456789abcdef0123456789abcdef.jpg"));
    /// assert!(!naming.matches("notes.txt"));
    /// ```
    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.is_match(file_name)
    }
}
