//! First-frame extraction through an ffmpeg binary.

use async_trait::async_trait;
use ffmpeg_sidecar::{
    child::FfmpegChild, command::FfmpegCommand, event::FfmpegEvent, iter::FfmpegIterator,
};
use mosaic_core::MediaSource;
use mosaic_error::{ThumbnailError, ThumbnailErrorKind};
use mosaic_interface::FrameExtractor;
use std::path::Path;
use std::time::Duration;
use tokio::task;
use tracing::{debug, instrument, trace};

/// [`FrameExtractor`] that shells out to `ffmpeg`.
///
/// Runs `ffmpeg -i <source> -frames:v 1 <dest>`, reading its output on the
/// blocking pool. A run past the timeout is killed and reaped before the
/// call returns, so nothing writes `dest` afterwards. Remote URLs are handed
/// to ffmpeg as-is. The binary must be on `PATH` or next to the executable,
/// as `ffmpeg-sidecar` resolves it.
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    timeout: Duration,
}

impl FfmpegFrameExtractor {
    /// Extractor giving up on one run after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for FfmpegFrameExtractor {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl FrameExtractor for FfmpegFrameExtractor {
    #[instrument(skip(self, source, dest), fields(source = %source.locator(), dest = %dest.display()))]
    async fn extract_first_frame(
        &self,
        source: &MediaSource,
        dest: &Path,
    ) -> Result<(), ThumbnailError> {
        let input = source.locator();
        let output = dest
            .to_str()
            .ok_or_else(|| {
                ThumbnailError::new(ThumbnailErrorKind::ExtractionFailed(format!(
                    "Destination is not valid UTF-8: {}",
                    dest.display()
                )))
            })?
            .to_string();

        let failed = |msg: String| ThumbnailError::new(ThumbnailErrorKind::ExtractionFailed(msg));

        let mut child = FfmpegCommand::new()
            .hide_banner()
            .overwrite()
            .input(&input)
            .args(["-frames:v", "1", "-q:v", "2"])
            .output(&output)
            .spawn()
            .map_err(|e| failed(format!("Failed to spawn ffmpeg: {}", e)))?;
        let events = child
            .iter()
            .map_err(|e| failed(format!("Failed to read ffmpeg output: {}", e)))?;

        let mut drain = task::spawn_blocking(move || drain_events(events, &output));
        let errors = match tokio::time::timeout(self.timeout, &mut drain).await {
            Ok(Ok(errors)) => errors,
            Ok(Err(e)) => {
                reap(child).await;
                return Err(failed(format!("ffmpeg task failed: {}", e)));
            }
            Err(_) => {
                // The child keeps writing `dest` until it is gone.
                if let Err(e) = child.kill() {
                    debug!(error = %e, "Failed to kill ffmpeg");
                }
                let _ = drain.await;
                reap(child).await;
                return Err(ThumbnailError::new(ThumbnailErrorKind::Timeout(
                    self.timeout.as_secs(),
                )));
            }
        };

        let status = task::spawn_blocking(move || child.wait())
            .await
            .map_err(|e| failed(format!("ffmpeg task failed: {}", e)))?
            .map_err(|e| failed(format!("Failed to wait for ffmpeg: {}", e)))?;
        if !status.success() {
            let detail = errors.last().cloned().unwrap_or_else(|| status.to_string());
            return Err(failed(detail));
        }
        Ok(())
    }
}

/// Collect error lines until ffmpeg closes its output.
fn drain_events(events: FfmpegIterator, output: &str) -> Vec<String> {
    let mut errors = Vec::new();
    for event in events {
        match event {
            FfmpegEvent::Log(level, msg) => trace!("[FFmpeg {:?}] {}", level, msg),
            FfmpegEvent::Error(e) => errors.push(e),
            FfmpegEvent::Done => debug!(output, "FFmpeg finished"),
            _ => {}
        }
    }
    errors
}

async fn reap(mut child: FfmpegChild) {
    if let Ok(Err(e)) = task::spawn_blocking(move || child.wait()).await {
        debug!(error = %e, "Failed to reap ffmpeg");
    }
}
