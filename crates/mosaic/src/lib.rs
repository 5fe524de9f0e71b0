//! Mosaic: client-side core for generative text, image, and video backends.
//!
//! This crate re-exports the workspace crates and provides [`Mosaic`], which
//! wires configuration, scratch storage, and the request orchestrator together
//! the way an application starts up.
//!
//! ```no_run
//! use mosaic::{FfmpegFrameExtractor, Modality, Mosaic, MosaicConfig};
//! # use std::sync::Arc;
//! # async fn run(transport: Arc<dyn mosaic::Transport>) -> mosaic::MosaicResult<()> {
//! let config = MosaicConfig::load(None)?;
//! let (mosaic, _events) = Mosaic::start(config, transport, Arc::new(FfmpegFrameExtractor::default()))?;
//! let request = mosaic.request(Modality::Text, "Describe a tide pool")?;
//! let outcome = mosaic.orchestrator().generate("chat", request).await.outcome().await;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod startup;

pub use mosaic_core::{
    ApiKey, ArtifactKind, CanonicalResponse, ConfigHandle, Endpoint, GenerationRequest,
    GenerationRequestBuilder, GenerationResult, MIN_API_KEY_LENGTH, MediaIntent, MediaSource,
    Modality, MosaicConfig, MosaicConfigBuilder, ResultId, Sequence, SlotId, TempArtifact,
    Thumbnail, ThumbnailSettings, init_tracing,
};
pub use mosaic_error::{
    ConfigError, DecodeError, FailureClass, MosaicError, MosaicErrorKind, MosaicResult,
    NormalizeError, NormalizeErrorKind, StorageError, StorageErrorKind, ThumbnailError,
    ThumbnailErrorKind, TransportError, TransportErrorKind,
};
pub use mosaic_interface::{FrameExtractor, OutboundRequest, Transport};
pub use mosaic_media::{FfmpegFrameExtractor, MediaCodec, MediaMaterializer, ThumbnailResolver};
pub use mosaic_normalize::{ITEM_CONTAINERS, MEDIA_KEYS, SchemaNormalizer, TEXT_SHAPES};
pub use mosaic_orchestrator::{
    EntryStatus, GenerationTicket, LogEntry, Outcome, RequestOrchestrator, ResultLog, SlotEvent,
    SlotPhase, build_outbound,
};
pub use mosaic_storage::{ResourceLifecycleManager, SweepReport};
pub use startup::Mosaic;
