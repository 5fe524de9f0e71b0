//! Configuration snapshots.
//!
//! A [`MosaicConfig`] is never mutated once published. Rotating the credential
//! or changing endpoints builds a new snapshot and swaps it into the
//! [`ConfigHandle`]; requests already in flight keep the snapshot they started
//! with.

use crate::{ApiKey, Modality};
use derive_getters::Getters;
use mosaic_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, instrument};

/// Logical backend endpoints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Endpoint {
    /// Chat-style text generation
    #[strum(serialize = "responses")]
    Responses,
    /// Image generation
    #[strum(serialize = "images/generations")]
    ImageGenerations,
    /// Image edit from a source image
    #[strum(serialize = "images/edits")]
    ImageEdits,
    /// Video generation
    #[strum(serialize = "videos/generations")]
    VideoGenerations,
}

/// Thumbnail extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ThumbnailSettings {
    /// Allow probing remote videos for a first frame
    probe_remote: bool,
    /// Pause before the single extraction retry, in milliseconds
    retry_delay_ms: u64,
    /// Upper bound on one extraction attempt, in seconds
    timeout_secs: u64,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            probe_remote: true,
            retry_delay_ms: 250,
            timeout_secs: 30,
        }
    }
}

impl ThumbnailSettings {
    /// Settings with every field given explicitly.
    pub fn new(probe_remote: bool, retry_delay_ms: u64, timeout_secs: u64) -> Self {
        Self {
            probe_remote,
            retry_delay_ms,
            timeout_secs,
        }
    }
}

/// One immutable configuration snapshot.
///
/// Loaded from built-in defaults, an optional TOML file, then `MOSAIC_*`
/// environment variables (`__` separates nested keys, e.g.
/// `MOSAIC_THUMBNAILS__PROBE_REMOTE=false`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct MosaicConfig {
    /// Backend base URL; endpoint paths are appended to it
    base_url: String,
    /// Current credential
    api_key: Option<ApiKey>,
    /// Overrides from logical endpoint name to path
    endpoints: BTreeMap<String, String>,
    /// System message prepended to text requests
    system_prompt: Option<String>,
    /// Model per modality name, used when a caller has none of its own
    default_models: BTreeMap<String, String>,
    /// Scratch directory override
    #[getter(skip)]
    scratch_dir: Option<PathBuf>,
    /// Thumbnail extraction settings
    thumbnails: ThumbnailSettings,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.x.ai/v1".to_string(),
            api_key: None,
            endpoints: BTreeMap::new(),
            system_prompt: None,
            default_models: BTreeMap::new(),
            scratch_dir: None,
            thumbnails: ThumbnailSettings::default(),
        }
    }
}

impl MosaicConfig {
    /// Creates a new builder for MosaicConfig.
    pub fn builder() -> MosaicConfigBuilder {
        MosaicConfigBuilder::default()
    }

    /// Load a snapshot from `path` (required if given, else `./mosaic.toml`
    /// if present) layered under `MOSAIC_*` environment variables.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name("mosaic").required(false)),
        };
        builder = builder.add_source(
            config::Environment::with_prefix("MOSAIC")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;
        let loaded: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        info!(
            base_url = %loaded.base_url,
            has_api_key = loaded.api_key.is_some(),
            scratch_dir = %loaded.scratch_dir().display(),
            "Loaded configuration"
        );
        Ok(loaded)
    }

    /// Scratch directory for temp artifacts.
    ///
    /// Defaults to `<user cache dir>/mosaic/scratch`, or the system temp
    /// directory when no cache directory is known.
    pub fn scratch_dir(&self) -> PathBuf {
        match &self.scratch_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("mosaic")
                .join("scratch"),
        }
    }

    /// Path for a logical endpoint, honoring overrides.
    pub fn endpoint_path(&self, endpoint: Endpoint) -> String {
        let logical = endpoint.to_string();
        self.endpoints.get(&logical).cloned().unwrap_or(logical)
    }

    /// Full URL for a logical endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_core::{Endpoint, MosaicConfig};
    ///
    /// let config = MosaicConfig::builder()
    ///     .base_url("https://backend.test/v1/")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(
    ///     config.endpoint_url(Endpoint::VideoGenerations),
    ///     "https://backend.test/v1/videos/generations"
    /// );
    /// ```
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint_path(endpoint).trim_start_matches('/')
        )
    }

    /// Configured default model for a modality.
    pub fn default_model(&self, modality: Modality) -> Option<&str> {
        self.default_models
            .get(&modality.to_string())
            .map(String::as_str)
    }

    /// New snapshot with a different credential.
    pub fn with_api_key(&self, api_key: ApiKey) -> Self {
        Self {
            api_key: Some(api_key),
            ..self.clone()
        }
    }
}

/// Shared handle to the current configuration snapshot.
///
/// Readers take an `Arc` to the snapshot and never observe a half-updated
/// configuration.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    current: Arc<RwLock<Arc<MosaicConfig>>>,
}

impl ConfigHandle {
    /// Publish an initial snapshot.
    pub fn new(config: MosaicConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// The snapshot current right now.
    pub fn snapshot(&self) -> Arc<MosaicConfig> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new snapshot.
    pub fn replace(&self, config: MosaicConfig) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Arc::new(config);
        debug!("Published new configuration snapshot");
    }

    /// Validate `raw` and publish a snapshot carrying it.
    #[instrument(skip_all)]
    pub fn rotate_credential(&self, raw: &str) -> Result<(), ConfigError> {
        let key = ApiKey::parse(raw)?;
        let next = self.snapshot().with_api_key(key);
        self.replace(next);
        info!("Rotated API credential");
        Ok(())
    }
}
