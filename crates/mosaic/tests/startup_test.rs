//! Tests for application startup wiring.

use async_trait::async_trait;
use mosaic::{
    FailureClass, FrameExtractor, GenerationResult, MediaSource, Modality, Mosaic, MosaicConfig,
    OutboundRequest, Outcome, ThumbnailError, ThumbnailErrorKind, Transport, TransportError,
};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

struct EchoTransport;

#[async_trait]
impl Transport for EchoTransport {
    async fn send(&self, request: OutboundRequest) -> Result<Value, TransportError> {
        let model = request.body()["model"].as_str().unwrap_or_default().to_string();
        Ok(json!({"choices": [{"message": {"content": model}}]}))
    }
}

struct NoFrames;

#[async_trait]
impl FrameExtractor for NoFrames {
    async fn extract_first_frame(
        &self,
        _source: &MediaSource,
        _dest: &Path,
    ) -> Result<(), ThumbnailError> {
        Err(ThumbnailError::new(ThumbnailErrorKind::SourceUnavailable(
            "no decoder".to_string(),
        )))
    }
}

fn config(scratch: &Path) -> MosaicConfig {
    let mut models = BTreeMap::new();
    models.insert("text".to_string(), "configured-text-model".to_string());
    MosaicConfig::builder()
        .scratch_dir(Some(scratch.to_path_buf()))
        .default_models(models)
        .build()
        .unwrap()
}

// ============================================================================
// Startup Tests
// ============================================================================

#[tokio::test]
async fn test_start_sweeps_orphans() {
    let dir = tempfile::tempdir().unwrap();
    let orphan = dir.path().join("video_0123456789abcdef0123456789abcdef.mp4");
    let unrelated = dir.path().join("readme.txt");
    std::fs::write(&orphan, b"stale").unwrap();
    std::fs::write(&unrelated, b"keep").unwrap();

    let (mosaic, _events) =
        Mosaic::start(config(dir.path()), Arc::new(EchoTransport), Arc::new(NoFrames)).unwrap();

    assert_eq!(mosaic.startup_sweep().removed().len(), 1);
    assert!(!orphan.exists());
    assert!(unrelated.exists());
}

#[tokio::test]
async fn test_request_uses_configured_model() {
    let dir = tempfile::tempdir().unwrap();
    let (mosaic, _events) =
        Mosaic::start(config(dir.path()), Arc::new(EchoTransport), Arc::new(NoFrames)).unwrap();

    let request = mosaic.request(Modality::Text, "which model?").unwrap();
    let outcome = mosaic
        .orchestrator()
        .generate("chat", request)
        .await
        .outcome()
        .await;

    assert_eq!(
        outcome,
        Outcome::Delivered(Ok(GenerationResult::Text {
            content: "configured-text-model".to_string()
        }))
    );
}

#[tokio::test]
async fn test_request_without_model_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (mosaic, _events) =
        Mosaic::start(config(dir.path()), Arc::new(EchoTransport), Arc::new(NoFrames)).unwrap();

    let err = mosaic.request(Modality::Video, "a comet").unwrap_err();

    assert_eq!(err.class(), FailureClass::Configuration);
}

#[tokio::test]
async fn test_rotation_visible_to_later_requests() {
    let dir = tempfile::tempdir().unwrap();
    let (mosaic, _events) =
        Mosaic::start(config(dir.path()), Arc::new(EchoTransport), Arc::new(NoFrames)).unwrap();

    assert!(mosaic.config().snapshot().api_key().is_none());
    mosaic
        .config()
        .rotate_credential("xai-rotated-credential-1234")
        .unwrap();
    assert!(mosaic.config().snapshot().api_key().is_some());
    assert!(mosaic.config().rotate_credential("xai-short").is_err());
}
