//! Turns media intents into renderable sources.

use crate::MediaCodec;
use mosaic_core::{ArtifactKind, MediaIntent, MediaSource, ResultId};
use mosaic_error::{MosaicResult, StorageError, StorageErrorKind};
use mosaic_storage::ResourceLifecycleManager;
use tracing::{debug, instrument};

/// Writes inline payloads to scratch artifacts and passes URLs through.
#[derive(Debug, Clone)]
pub struct MediaMaterializer {
    lifecycle: ResourceLifecycleManager,
}

impl MediaMaterializer {
    /// Create a materializer writing through `lifecycle`.
    pub fn new(lifecycle: ResourceLifecycleManager) -> Self {
        Self { lifecycle }
    }

    /// The lifecycle manager owning every file this materializer writes.
    pub fn lifecycle(&self) -> &ResourceLifecycleManager {
        &self.lifecycle
    }

    /// Materialize `intent` as an artifact of `kind` owned by `owner`.
    ///
    /// URLs come back as [`MediaSource::Remote`] untouched; nothing is fetched.
    /// Inline data is decoded before any path is reserved, so a malformed
    /// payload fails with a decode error and leaves the scratch directory
    /// unchanged.
    #[instrument(skip(self, intent), fields(kind = %kind, owner = %owner))]
    pub fn materialize(
        &self,
        intent: &MediaIntent,
        kind: ArtifactKind,
        owner: ResultId,
    ) -> MosaicResult<MediaSource> {
        let (data, mime_hint) = match intent {
            MediaIntent::Url(url) => {
                return Ok(MediaSource::Remote { url: url.clone() });
            }
            MediaIntent::Inline { data, mime_hint } => (data, mime_hint),
        };

        let bytes = MediaCodec::decode(data)?;
        let mime_hint = mime_hint
            .clone()
            .or_else(|| {
                MediaCodec::split_data_url(data).and_then(|(mime, _)| mime.map(str::to_string))
            })
            .unwrap_or_else(|| kind.default_mime().to_string());

        let reservation = self.lifecycle.reserve(kind, owner)?;
        std::fs::write(reservation.path(), &bytes)
            .map_err(|e| StorageError::io(reservation.path().display(), e))?;
        let artifact = reservation.commit()?;

        debug!(
            path = %artifact.path().display(),
            bytes = bytes.len(),
            mime = %mime_hint,
            "Materialized inline media"
        );
        Ok(MediaSource::Inline {
            local_path: artifact.path().clone(),
            mime_hint,
        })
    }

    /// [`materialize`](Self::materialize) with decode and write on the
    /// blocking pool.
    pub async fn materialize_async(
        &self,
        intent: MediaIntent,
        kind: ArtifactKind,
        owner: ResultId,
    ) -> MosaicResult<MediaSource> {
        if let MediaIntent::Url(url) = intent {
            return Ok(MediaSource::Remote { url });
        }
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.materialize(&intent, kind, owner))
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Io(format!(
                    "Materialization task failed: {}",
                    e
                )))
            })?
    }
}
