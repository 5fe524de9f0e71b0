//! Normalize command handler.

use mosaic::{
    ArtifactKind, CanonicalResponse, FfmpegFrameExtractor, GenerationResult, MediaMaterializer,
    Modality, MosaicConfig, ResourceLifecycleManager, ResultId, SchemaNormalizer,
    ThumbnailResolver,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Handles the normalize command.
///
/// Inline media is written to the scratch directory and stays there until the
/// next sweep, so the printed paths can be opened.
#[instrument(skip_all, fields(modality = %modality, file = %file.display()))]
pub async fn handle_normalize_command(
    config: &MosaicConfig,
    modality: Modality,
    file: &Path,
) -> anyhow::Result<()> {
    let body = std::fs::read_to_string(file)?;
    let canonical = SchemaNormalizer::new().normalize_str(modality, &body)?;
    info!("Response shape recognized");

    let lifecycle = ResourceLifecycleManager::new(config.scratch_dir())?;
    let materializer = MediaMaterializer::new(lifecycle);
    let owner = ResultId::new();

    let result = match canonical {
        CanonicalResponse::Text { content } => GenerationResult::Text { content },
        CanonicalResponse::Image { media } => GenerationResult::Image {
            source: materializer
                .materialize_async(media, ArtifactKind::Image, owner)
                .await?,
        },
        CanonicalResponse::Video { media, thumbnail } => {
            let source = materializer
                .materialize_async(media, ArtifactKind::Video, owner)
                .await?;
            let extractor = FfmpegFrameExtractor::new(Duration::from_secs(
                *config.thumbnails().timeout_secs(),
            ));
            let thumbnail = ThumbnailResolver::new(materializer.clone(), Arc::new(extractor))
                .with_settings(config.thumbnails().clone())
                .resolve(&source, thumbnail, owner)
                .await;
            GenerationResult::Video { source, thumbnail }
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
