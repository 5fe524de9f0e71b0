//! Video thumbnail fallback chain.

use crate::MediaMaterializer;
use mosaic_core::{ArtifactKind, MediaIntent, MediaSource, ResultId, Thumbnail, ThumbnailSettings};
use mosaic_error::{FailureClass, MosaicError, ThumbnailError, ThumbnailErrorKind};
use mosaic_interface::FrameExtractor;
use mosaic_storage::ArtifactReservation;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Extraction attempts per video: the first try plus one retry.
pub const EXTRACTION_ATTEMPTS: u32 = 2;

/// Picks a preview for a video result.
///
/// Order: a thumbnail the backend shipped, then the video's first frame,
/// then [`Thumbnail::None`]. Resolution never fails; every failure along the
/// chain is logged and the next step is tried.
#[derive(Clone)]
pub struct ThumbnailResolver {
    materializer: MediaMaterializer,
    extractor: Arc<dyn FrameExtractor>,
    settings: ThumbnailSettings,
}

impl std::fmt::Debug for ThumbnailResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailResolver")
            .field("materializer", &self.materializer)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ThumbnailResolver {
    /// Create a resolver with default settings.
    pub fn new(materializer: MediaMaterializer, extractor: Arc<dyn FrameExtractor>) -> Self {
        Self {
            materializer,
            extractor,
            settings: ThumbnailSettings::default(),
        }
    }

    /// Copy of this resolver using `settings`.
    pub fn with_settings(&self, settings: ThumbnailSettings) -> Self {
        Self {
            settings,
            ..self.clone()
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &ThumbnailSettings {
        &self.settings
    }

    /// Run the whole chain.
    #[instrument(skip(self, video, provided), fields(owner = %owner))]
    pub async fn resolve(
        &self,
        video: &MediaSource,
        provided: Option<MediaIntent>,
        owner: ResultId,
    ) -> Thumbnail {
        if let Some(thumbnail) = self.resolve_provided(provided, owner).await {
            return thumbnail;
        }
        self.extract(video, owner).await
    }

    /// Materialize a thumbnail shipped with the response.
    ///
    /// Returns `None` when there was none or it could not be decoded; the
    /// caller then falls back to [`extract`](Self::extract).
    pub async fn resolve_provided(
        &self,
        provided: Option<MediaIntent>,
        owner: ResultId,
    ) -> Option<Thumbnail> {
        let intent = provided?;
        match self
            .materializer
            .materialize_async(intent, ArtifactKind::Thumbnail, owner)
            .await
        {
            Ok(source) => Some(Thumbnail::Provided { source }),
            Err(e) => {
                warn!(%owner, error = %e, "Provided thumbnail unusable, falling back to extraction");
                None
            }
        }
    }

    /// Extract the first frame of `video` into a scratch artifact.
    ///
    /// Inline videos whose file is gone, and remote videos when remote probing
    /// is disabled, yield [`Thumbnail::None`] without calling the extractor.
    #[instrument(skip(self, video), fields(owner = %owner, video = %video.locator()))]
    pub async fn extract(&self, video: &MediaSource, owner: ResultId) -> Thumbnail {
        match video {
            MediaSource::Inline { local_path, .. } if !local_path.is_file() => {
                debug!("Video file no longer exists, skipping extraction");
                return Thumbnail::None;
            }
            MediaSource::Remote { .. } if !*self.settings.probe_remote() => {
                debug!("Remote probing disabled, skipping extraction");
                return Thumbnail::None;
            }
            _ => {}
        }

        let timeout = Duration::from_secs(*self.settings.timeout_secs());
        let mut attempt = 0;
        let outcome = loop {
            attempt += 1;
            match self.attempt(video, owner, timeout).await {
                Ok(reservation) => break reservation.commit().map_err(MosaicError::from),
                Err(e) if attempt < EXTRACTION_ATTEMPTS => {
                    debug!(attempt, error = %e, "Frame extraction failed, retrying");
                    tokio::time::sleep(Duration::from_millis(*self.settings.retry_delay_ms()))
                        .await;
                }
                Err(e) => break Err(e),
            }
        };

        match outcome {
            Ok(artifact) => {
                debug!(path = %artifact.path().display(), "Extracted first frame");
                Thumbnail::Extracted {
                    local_path: artifact.path().clone(),
                }
            }
            Err(e) => {
                warn!(
                    class = %FailureClass::ThumbnailExtractionFailed,
                    attempts = attempt,
                    error = %e,
                    "Thumbnail extraction failed"
                );
                Thumbnail::None
            }
        }
    }

    /// One extractor run into a fresh reservation.
    ///
    /// The reservation lives inside the spawned run, so its path stays
    /// registered until the extractor returns, even after `timeout` gives up
    /// on it. A late frame is then deleted when the run drops the reservation.
    async fn attempt(
        &self,
        video: &MediaSource,
        owner: ResultId,
        timeout: Duration,
    ) -> Result<ArtifactReservation, MosaicError> {
        let reservation = self
            .materializer
            .lifecycle()
            .reserve(ArtifactKind::Thumbnail, owner)?;
        let extractor = Arc::clone(&self.extractor);
        let video = video.clone();
        let run = tokio::spawn(async move {
            let extracted = extractor
                .extract_first_frame(&video, reservation.path())
                .await;
            extracted.map(|()| reservation)
        });

        match tokio::time::timeout(timeout, run).await {
            Ok(Ok(result)) => result.map_err(MosaicError::from),
            Ok(Err(e)) => Err(ThumbnailError::new(ThumbnailErrorKind::ExtractionFailed(
                format!("Extraction task failed: {}", e),
            ))
            .into()),
            Err(_) => Err(ThumbnailError::new(ThumbnailErrorKind::Timeout(
                *self.settings.timeout_secs(),
            ))
            .into()),
        }
    }
}
