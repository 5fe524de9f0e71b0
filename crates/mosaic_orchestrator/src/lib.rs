//! Request orchestration for the Mosaic generation client.
//!
//! [`RequestOrchestrator`] turns a [`mosaic_core::GenerationRequest`] into a
//! delivered [`mosaic_core::GenerationResult`] for a slot: outbound body,
//! transport call, normalization, materialization, and thumbnail fallback.
//! Per slot only the newest request is delivered; older ones are discarded
//! and their artifacts released.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod events;
mod log;
mod orchestrator;
mod outbound;
mod ticket;

pub use events::{SlotEvent, SlotPhase};
pub use log::{EntryStatus, LogEntry, ResultLog};
pub use orchestrator::RequestOrchestrator;
pub use outbound::{EDIT_SOURCE_OPTION, build_outbound, endpoint_for};
pub use ticket::{GenerationTicket, Outcome};
