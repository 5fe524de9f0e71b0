//! Frame extraction collaborator.

use async_trait::async_trait;
use mosaic_core::MediaSource;
use mosaic_error::ThumbnailError;
use std::path::Path;

/// Writes the first frame of a video as a JPEG.
///
/// Called off the request path. The destination is a reserved scratch path;
/// implementations write it and nothing else, and leave cleanup of a partial
/// file to the reservation.
#[async_trait]
pub trait FrameExtractor: Send + Sync {
    /// Extract the first frame of `source` into `dest`.
    async fn extract_first_frame(
        &self,
        source: &MediaSource,
        dest: &Path,
    ) -> Result<(), ThumbnailError>;
}
