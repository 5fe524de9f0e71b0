//! Trait definitions for the collaborators the Mosaic core consumes.
//!
//! The core never speaks HTTP and never decodes video itself. It hands an
//! [`OutboundRequest`] to a [`Transport`] and asks a [`FrameExtractor`] for a
//! video's first frame; both are black boxes defined only by these contracts.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod extractor;
mod transport;

pub use extractor::FrameExtractor;
pub use transport::{OutboundRequest, Transport};
