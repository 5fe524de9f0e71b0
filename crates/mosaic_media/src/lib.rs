//! Inline media handling for the Mosaic generation client.
//!
//! - [`MediaCodec`]: base64 and data URL helpers
//! - [`MediaMaterializer`]: turns a [`mosaic_core::MediaIntent`] into a
//!   renderable [`mosaic_core::MediaSource`], writing inline bytes to scratch
//!   artifacts
//! - [`ThumbnailResolver`]: provided thumbnail, else first frame, else none
//! - [`FfmpegFrameExtractor`]: the default first-frame extractor

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod ffmpeg;
mod materializer;
mod thumbnail;

pub use codec::MediaCodec;
pub use ffmpeg::FfmpegFrameExtractor;
pub use materializer::MediaMaterializer;
pub use thumbnail::{EXTRACTION_ATTEMPTS, ThumbnailResolver};
