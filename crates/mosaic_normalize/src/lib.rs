//! Multi-shape response normalization.
//!
//! The backend has answered with several JSON layouts over time. This crate
//! recognizes all of them through explicit priority tables and reduces each to
//! a [`mosaic_core::CanonicalResponse`]. A response matching no table entry is
//! an `UnrecognizedResponseShape` failure, never a silent empty result.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod media;
mod normalizer;
mod text;

pub use media::{ITEM_CONTAINERS, MEDIA_KEYS, MediaKeys};
pub use normalizer::SchemaNormalizer;
pub use text::{TEXT_SHAPES, TextDecoder, TextShape};
