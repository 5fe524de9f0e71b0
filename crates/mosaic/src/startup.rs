//! Application startup wiring.

use mosaic_core::{ConfigHandle, GenerationRequest, Modality, MosaicConfig};
use mosaic_error::{ConfigError, MosaicResult};
use mosaic_interface::{FrameExtractor, Transport};
use mosaic_orchestrator::{RequestOrchestrator, SlotEvent};
use mosaic_storage::{ResourceLifecycleManager, SweepReport};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// A started Mosaic core: configuration handle, scratch storage, orchestrator.
#[derive(Debug, Clone)]
pub struct Mosaic {
    config: ConfigHandle,
    lifecycle: ResourceLifecycleManager,
    orchestrator: RequestOrchestrator,
    startup_sweep: SweepReport,
}

impl Mosaic {
    /// Open the scratch directory, sweep artifacts left by an earlier run, and
    /// build the orchestrator.
    #[instrument(skip_all)]
    pub fn start(
        config: MosaicConfig,
        transport: Arc<dyn Transport>,
        extractor: Arc<dyn FrameExtractor>,
    ) -> MosaicResult<(Self, mpsc::UnboundedReceiver<SlotEvent>)> {
        let lifecycle = ResourceLifecycleManager::new(config.scratch_dir())?;
        let startup_sweep = lifecycle.sweep()?;
        let config = ConfigHandle::new(config);
        let (orchestrator, events) =
            RequestOrchestrator::new(transport, extractor, config.clone(), lifecycle.clone());

        info!(
            scratch_dir = %lifecycle.scratch_dir().display(),
            swept = startup_sweep.removed().len(),
            "Mosaic started"
        );
        Ok((
            Self {
                config,
                lifecycle,
                orchestrator,
                startup_sweep,
            },
            events,
        ))
    }

    /// Configuration handle; rotate credentials through it.
    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Scratch storage.
    pub fn lifecycle(&self) -> &ResourceLifecycleManager {
        &self.lifecycle
    }

    /// Request orchestrator.
    pub fn orchestrator(&self) -> &RequestOrchestrator {
        &self.orchestrator
    }

    /// What the startup sweep removed.
    pub fn startup_sweep(&self) -> &SweepReport {
        &self.startup_sweep
    }

    /// Request using the configured default model for `modality`.
    ///
    /// Fails when the configuration names no model for it; there is no
    /// built-in default.
    pub fn request(
        &self,
        modality: Modality,
        prompt: impl Into<String>,
    ) -> MosaicResult<GenerationRequest> {
        let snapshot = self.config.snapshot();
        let model = snapshot.default_model(modality).ok_or_else(|| {
            ConfigError::new(format!("No default model configured for {}", modality))
        })?;
        let request = GenerationRequest::builder()
            .modality(modality)
            .prompt(prompt)
            .model_id(model)
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid request: {}", e)))?;
        Ok(request)
    }

    /// Shut the orchestrator down and release every artifact.
    pub async fn shutdown(&self) -> MosaicResult<usize> {
        self.orchestrator.shutdown().await
    }
}
