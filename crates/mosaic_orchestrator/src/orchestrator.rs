//! Per-slot request orchestration.

use crate::{EntryStatus, GenerationTicket, Outcome, ResultLog, SlotEvent, SlotPhase, build_outbound};
use mosaic_core::{
    ArtifactKind, CanonicalResponse, ConfigHandle, GenerationRequest, GenerationResult,
    MediaSource, MosaicConfig, ResultId, Sequence, SlotId, Thumbnail,
};
use mosaic_error::{MosaicResult, StorageError, StorageErrorKind};
use mosaic_interface::{FrameExtractor, Transport};
use mosaic_media::{MediaMaterializer, ThumbnailResolver};
use mosaic_normalize::SchemaNormalizer;
use mosaic_storage::ResourceLifecycleManager;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::{self, JoinHandle};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default)]
struct SlotState {
    /// Sequence of the newest attempt; 0 before the first request
    sequence: Sequence,
    phase: SlotPhase,
    /// Newest attempt not yet delivered
    in_flight: Option<ResultId>,
    /// Delivered result whose artifacts are still live
    current: Option<ResultId>,
}

struct Inner {
    transport: Arc<dyn Transport>,
    config: ConfigHandle,
    normalizer: SchemaNormalizer,
    materializer: MediaMaterializer,
    thumbnails: ThumbnailResolver,
    slots: Mutex<HashMap<SlotId, SlotState>>,
    log: ResultLog,
    events: mpsc::UnboundedSender<SlotEvent>,
    tasks: std::sync::Mutex<Vec<JoinHandle<()>>>,
}

/// Accepts generation requests per slot and delivers only the newest.
///
/// Each `generate` runs on its own task: dispatch through the [`Transport`],
/// normalize, materialize, deliver. A newer request for the same slot
/// supersedes the older one; the older attempt still runs to completion, then
/// its artifacts are released and its result discarded. Video first-frame
/// extraction runs after delivery on a background task owned by the
/// orchestrator.
///
/// Cloning is cheap and clones share all state.
#[derive(Clone)]
pub struct RequestOrchestrator {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for RequestOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestOrchestrator")
            .field("scratch_dir", &self.inner.materializer.lifecycle().scratch_dir())
            .field("log_len", &self.inner.log.len())
            .finish_non_exhaustive()
    }
}

impl RequestOrchestrator {
    /// Wire an orchestrator to its collaborators.
    ///
    /// Returns the orchestrator and the receiving end of its event channel.
    pub fn new(
        transport: Arc<dyn Transport>,
        extractor: Arc<dyn FrameExtractor>,
        config: ConfigHandle,
        lifecycle: ResourceLifecycleManager,
    ) -> (Self, mpsc::UnboundedReceiver<SlotEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let materializer = MediaMaterializer::new(lifecycle);
        let thumbnails = ThumbnailResolver::new(materializer.clone(), extractor);
        let inner = Inner {
            transport,
            config,
            normalizer: SchemaNormalizer::new(),
            materializer,
            thumbnails,
            slots: Mutex::new(HashMap::new()),
            log: ResultLog::new(),
            events,
            tasks: std::sync::Mutex::new(Vec::new()),
        };
        (
            Self {
                inner: Arc::new(inner),
            },
            receiver,
        )
    }

    /// The result log.
    pub fn log(&self) -> &ResultLog {
        &self.inner.log
    }

    /// The lifecycle manager owning every artifact this orchestrator writes.
    pub fn lifecycle(&self) -> &ResourceLifecycleManager {
        self.inner.materializer.lifecycle()
    }

    /// Phase of `slot`'s newest attempt.
    pub async fn phase(&self, slot: &SlotId) -> SlotPhase {
        self.inner
            .slots
            .lock()
            .await
            .get(slot)
            .map(|state| state.phase)
            .unwrap_or_default()
    }

    /// Result currently shown in `slot`, if any.
    pub async fn current(&self, slot: &SlotId) -> Option<GenerationResult> {
        let id = self.inner.slots.lock().await.get(slot)?.current?;
        match self.inner.log.get(id)?.status() {
            EntryStatus::Complete(result) => Some(result.clone()),
            _ => None,
        }
    }

    /// Start a request for `slot`.
    ///
    /// Captures the configuration snapshot, supersedes any earlier attempt in
    /// the slot, and returns immediately. The slot's previous result is
    /// released by the new attempt's task before it dispatches.
    #[instrument(skip_all, fields(slot = tracing::field::Empty, modality = %request.modality()))]
    pub async fn generate(
        &self,
        slot: impl Into<SlotId>,
        request: GenerationRequest,
    ) -> GenerationTicket {
        let slot = slot.into();
        tracing::Span::current().record("slot", slot.as_str());
        let snapshot = self.inner.config.snapshot();
        let result_id = ResultId::new();
        let (sender, receiver) = oneshot::channel();

        let (sequence, previous) = {
            let mut slots = self.inner.slots.lock().await;
            let state = slots.entry(slot.clone()).or_default();
            state.sequence += 1;
            state.phase = SlotPhase::Dispatching;
            if let Some(stale) = state.in_flight.replace(result_id) {
                self.inner.log.update(stale, EntryStatus::Superseded);
            }
            let previous = state.current.take();
            self.inner
                .log
                .push_pending(result_id, slot.clone(), state.sequence, *request.modality());
            self.inner.emit(SlotEvent::Dispatched {
                slot: slot.clone(),
                sequence: state.sequence,
                result_id,
            });
            (state.sequence, previous)
        };
        info!(seq = sequence, %result_id, "Dispatched request");

        let inner = Arc::clone(&self.inner);
        let task_slot = slot.clone();
        let handle = tokio::spawn(async move {
            if let Some(previous) = previous {
                inner.release(previous).await;
            }
            Inner::run(inner, task_slot, sequence, result_id, snapshot, request, sender).await;
        });
        self.inner.track(handle);

        GenerationTicket::new(slot, sequence, result_id, receiver)
    }

    /// Abort background work, release every artifact and close storage.
    ///
    /// Once closed, commits from blocking work that outlived the abort fail
    /// and their files are deleted.
    ///
    /// Tickets whose task was aborted resolve to [`Outcome::Superseded`].
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> MosaicResult<usize> {
        let handles: Vec<JoinHandle<()>> = self
            .inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        for handle in &handles {
            handle.abort();
        }
        for handle in handles {
            let _ = handle.await;
        }

        {
            let mut slots = self.inner.slots.lock().await;
            for state in slots.values_mut() {
                if let Some(stale) = state.in_flight.take() {
                    self.inner.log.update(stale, EntryStatus::Superseded);
                }
                state.sequence += 1;
                state.current = None;
                state.phase = SlotPhase::Idle;
            }
        }

        // Blocking materializations outlive abort; closing makes their commits fail.
        let lifecycle = self.lifecycle().clone();
        let released = task::spawn_blocking(move || lifecycle.close())
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::Io(format!("Close task failed: {}", e)))
            })??;
        info!(released, "Orchestrator shut down");
        Ok(released)
    }
}

impl Inner {
    async fn run(
        inner: Arc<Inner>,
        slot: SlotId,
        sequence: Sequence,
        result_id: ResultId,
        snapshot: Arc<MosaicConfig>,
        request: GenerationRequest,
        sender: oneshot::Sender<Outcome>,
    ) {
        let result = inner
            .produce(&slot, sequence, result_id, &snapshot, &request)
            .await;
        inner
            .deliver(slot, sequence, result_id, snapshot, result, sender)
            .await;
    }

    #[instrument(skip_all, fields(slot = %slot, seq = sequence, result_id = %result_id))]
    async fn produce(
        &self,
        slot: &SlotId,
        sequence: Sequence,
        result_id: ResultId,
        snapshot: &MosaicConfig,
        request: &GenerationRequest,
    ) -> MosaicResult<GenerationResult> {
        let modality = *request.modality();
        let outbound = build_outbound(snapshot, request);
        debug!(endpoint = %outbound.endpoint(), url = %outbound.url(), "Sending request");
        let raw = self.transport.send(outbound).await?;

        self.advance(slot, sequence, SlotPhase::Normalizing).await;
        let canonical = self.normalizer.normalize(modality, &raw)?;

        self.advance(slot, sequence, SlotPhase::Materializing).await;
        let result = match canonical {
            CanonicalResponse::Text { content } => GenerationResult::Text { content },
            CanonicalResponse::Image { media } => GenerationResult::Image {
                source: self
                    .materializer
                    .materialize_async(media, ArtifactKind::Image, result_id)
                    .await?,
            },
            CanonicalResponse::Video { media, thumbnail } => {
                let source = self
                    .materializer
                    .materialize_async(media, ArtifactKind::Video, result_id)
                    .await?;
                let thumbnail = self
                    .thumbnails
                    .with_settings(snapshot.thumbnails().clone())
                    .resolve_provided(thumbnail, result_id)
                    .await
                    .unwrap_or_default();
                GenerationResult::Video { source, thumbnail }
            }
        };
        Ok(result)
    }

    async fn deliver(
        self: &Arc<Self>,
        slot: SlotId,
        sequence: Sequence,
        result_id: ResultId,
        snapshot: Arc<MosaicConfig>,
        result: MosaicResult<GenerationResult>,
        sender: oneshot::Sender<Outcome>,
    ) {
        let mut slots = self.slots.lock().await;
        let Some(state) = slots.get_mut(&slot).filter(|state| state.sequence == sequence) else {
            drop(slots);
            self.release(result_id).await;
            self.log.update(result_id, EntryStatus::Superseded);
            self.emit(SlotEvent::Superseded {
                slot,
                sequence,
                result_id,
            });
            info!(seq = sequence, %result_id, "Discarded superseded result");
            let _ = sender.send(Outcome::Superseded);
            return;
        };

        state.in_flight = None;
        match &result {
            Ok(delivered) => {
                state.current = Some(result_id);
                self.log
                    .update(result_id, EntryStatus::Complete(delivered.clone()));
                let pending_video = match delivered {
                    GenerationResult::Video {
                        source,
                        thumbnail: Thumbnail::None,
                    } => Some(source.clone()),
                    _ => None,
                };
                state.phase = if pending_video.is_some() {
                    SlotPhase::ThumbnailPending
                } else {
                    SlotPhase::Complete
                };
                if let Some(source) = pending_video {
                    self.spawn_extraction(slot.clone(), sequence, result_id, source, &snapshot);
                }
                info!(seq = sequence, %result_id, modality = %delivered.modality(), "Delivered result");
            }
            Err(e) => {
                state.phase = SlotPhase::Failed;
                self.log.update(result_id, EntryStatus::failed(e));
                warn!(seq = sequence, %result_id, class = %e.class(), error = %e, "Generation failed");
            }
        }

        self.emit(SlotEvent::Delivered {
            slot,
            sequence,
            result_id,
            result: result.clone(),
        });
        drop(slots);

        if result.is_err() {
            self.release(result_id).await;
        }
        let _ = sender.send(Outcome::Delivered(result));
    }

    fn spawn_extraction(
        self: &Arc<Self>,
        slot: SlotId,
        sequence: Sequence,
        result_id: ResultId,
        source: MediaSource,
        snapshot: &MosaicConfig,
    ) {
        let inner = Arc::clone(self);
        let resolver = self.thumbnails.with_settings(snapshot.thumbnails().clone());
        let handle = tokio::spawn(async move {
            let thumbnail = resolver.extract(&source, result_id).await;

            let mut slots = inner.slots.lock().await;
            let current = slots
                .get_mut(&slot)
                .filter(|state| state.sequence == sequence && state.current == Some(result_id));
            let Some(state) = current else {
                drop(slots);
                // The result was replaced while extracting.
                inner.release(result_id).await;
                debug!(seq = sequence, %result_id, "Dropped thumbnail for stale result");
                return;
            };

            state.phase = SlotPhase::Complete;
            if thumbnail.is_some() {
                inner.log.update_thumbnail(result_id, thumbnail.clone());
            }
            inner.emit(SlotEvent::ThumbnailUpdated {
                slot,
                sequence,
                result_id,
                thumbnail,
            });
        });
        self.track(handle);
    }

    async fn advance(&self, slot: &SlotId, sequence: Sequence, phase: SlotPhase) {
        let mut slots = self.slots.lock().await;
        if let Some(state) = slots.get_mut(slot).filter(|state| state.sequence == sequence) {
            state.phase = phase;
        }
    }

    /// Delete `result_id`'s artifacts on the blocking pool.
    async fn release(&self, result_id: ResultId) {
        let lifecycle = self.materializer.lifecycle().clone();
        match task::spawn_blocking(move || lifecycle.release(result_id)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!(%result_id, error = %e, "Failed to release artifacts"),
            Err(e) => warn!(%result_id, error = %e, "Release task failed"),
        }
    }

    fn emit(&self, event: SlotEvent) {
        if self.events.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }
}
