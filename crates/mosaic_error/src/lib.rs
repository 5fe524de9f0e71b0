//! Error types for the Mosaic generation client.
//!
//! Every failure the core can produce is classified into one of the kinds
//! below. Each error struct records the source location where it was created,
//! and all of them convert into [`MosaicError`] through [`MosaicErrorKind`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod decode;
mod error;
mod normalize;
mod storage;
mod thumbnail;
mod transport;

pub use config::ConfigError;
pub use decode::DecodeError;
pub use error::{FailureClass, MosaicError, MosaicErrorKind, MosaicResult};
pub use normalize::{NormalizeError, NormalizeErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use thumbnail::{ThumbnailError, ThumbnailErrorKind};
pub use transport::{TransportError, TransportErrorKind};
