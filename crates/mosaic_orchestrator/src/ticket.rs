//! Handles returned by `generate`.

use derive_getters::Getters;
use mosaic_core::{GenerationResult, ResultId, Sequence, SlotId};
use mosaic_error::MosaicError;
use tokio::sync::oneshot;

/// How one `generate` call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The attempt was still current and its result (or failure) was delivered
    Delivered(Result<GenerationResult, MosaicError>),
    /// A newer request took the slot, or the orchestrator shut down; the
    /// attempt's artifacts were released
    Superseded,
}

impl Outcome {
    /// The delivered result, if any.
    pub fn into_result(self) -> Option<Result<GenerationResult, MosaicError>> {
        match self {
            Outcome::Delivered(result) => Some(result),
            Outcome::Superseded => None,
        }
    }

    /// True for [`Outcome::Superseded`].
    pub fn is_superseded(&self) -> bool {
        matches!(self, Outcome::Superseded)
    }
}

/// Receipt for one dispatched request.
#[derive(Debug, Getters)]
pub struct GenerationTicket {
    /// Target slot
    slot: SlotId,
    /// Sequence assigned at dispatch
    sequence: Sequence,
    /// Log id of the attempt
    result_id: ResultId,
    #[getter(skip)]
    receiver: oneshot::Receiver<Outcome>,
}

impl GenerationTicket {
    pub(crate) fn new(
        slot: SlotId,
        sequence: Sequence,
        result_id: ResultId,
        receiver: oneshot::Receiver<Outcome>,
    ) -> Self {
        Self {
            slot,
            sequence,
            result_id,
            receiver,
        }
    }

    /// Wait for the attempt to finish.
    pub async fn outcome(self) -> Outcome {
        self.receiver.await.unwrap_or(Outcome::Superseded)
    }
}
