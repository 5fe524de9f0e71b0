//! Core data types for the Mosaic generation client.
//!
//! This crate provides the shape-independent vocabulary shared by every other
//! Mosaic crate: requests, canonical results, media sources, temp artifacts,
//! slots, and the immutable configuration snapshot.

mod artifact;
mod config;
mod credential;
mod media;
mod modality;
mod observability;
mod request;
mod result;
mod slot;

pub use artifact::{ArtifactKind, ResultId, TempArtifact};
pub use config::{ConfigHandle, Endpoint, MosaicConfig, MosaicConfigBuilder, ThumbnailSettings};
pub use credential::{ApiKey, MIN_API_KEY_LENGTH};
pub use media::{MediaIntent, MediaSource, Thumbnail};
pub use modality::Modality;
pub use observability::init_tracing;
pub use request::{GenerationRequest, GenerationRequestBuilder};
pub use result::{CanonicalResponse, GenerationResult};
pub use slot::{Sequence, SlotId};
