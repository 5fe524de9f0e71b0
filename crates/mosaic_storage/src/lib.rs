//! Scratch-directory artifact lifecycle.
//!
//! [`ResourceLifecycleManager`] is the only component that creates entries in
//! the artifact registry or deletes files from the scratch directory. Other
//! components write bytes into paths it hands out through
//! [`ArtifactReservation`]s and never delete anything themselves.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod manager;
mod naming;
mod reservation;

pub use manager::{ResourceLifecycleManager, SweepReport};
pub use naming::ArtifactNaming;
pub use reservation::ArtifactReservation;
