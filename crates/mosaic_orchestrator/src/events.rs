//! Slot phases and presentation events.

use mosaic_core::{GenerationResult, ResultId, Sequence, SlotId, Thumbnail};
use mosaic_error::MosaicError;

/// Where a slot's newest attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SlotPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Waiting on the transport
    Dispatching,
    /// Mapping the raw response to a canonical shape
    Normalizing,
    /// Writing inline media to scratch storage
    Materializing,
    /// Video delivered, first-frame extraction still running
    ThumbnailPending,
    /// Result delivered
    Complete,
    /// Failure delivered
    Failed,
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotEvent {
    /// A request entered `Dispatching`
    Dispatched {
        /// Target slot
        slot: SlotId,
        /// Sequence of the new attempt
        sequence: Sequence,
        /// Log id of the new attempt
        result_id: ResultId,
    },
    /// The slot's current attempt finished
    Delivered {
        /// Target slot
        slot: SlotId,
        /// Sequence of the attempt
        sequence: Sequence,
        /// Log id of the attempt
        result_id: ResultId,
        /// Result or typed failure
        result: Result<GenerationResult, MosaicError>,
    },
    /// A stale attempt finished and was discarded
    Superseded {
        /// Target slot
        slot: SlotId,
        /// Sequence of the discarded attempt
        sequence: Sequence,
        /// Log id of the discarded attempt
        result_id: ResultId,
    },
    /// Background thumbnail resolution for a delivered video finished
    ///
    /// Sent whether or not a frame was extracted; `Thumbnail::None` ends the
    /// `ThumbnailPending` phase without a preview.
    ThumbnailUpdated {
        /// Target slot
        slot: SlotId,
        /// Sequence of the attempt
        sequence: Sequence,
        /// Log id of the attempt
        result_id: ResultId,
        /// The resolved thumbnail, possibly `Thumbnail::None`
        thumbnail: Thumbnail,
    },
}

impl SlotEvent {
    /// Slot this event concerns.
    pub fn slot(&self) -> &SlotId {
        match self {
            SlotEvent::Dispatched { slot, .. }
            | SlotEvent::Delivered { slot, .. }
            | SlotEvent::Superseded { slot, .. }
            | SlotEvent::ThumbnailUpdated { slot, .. } => slot,
        }
    }

    /// Log id this event concerns.
    pub fn result_id(&self) -> ResultId {
        match self {
            SlotEvent::Dispatched { result_id, .. }
            | SlotEvent::Delivered { result_id, .. }
            | SlotEvent::Superseded { result_id, .. }
            | SlotEvent::ThumbnailUpdated { result_id, .. } => *result_id,
        }
    }
}
