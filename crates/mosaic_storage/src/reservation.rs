//! Scoped artifact reservations.

use crate::ResourceLifecycleManager;
use mosaic_core::TempArtifact;
use mosaic_error::StorageError;
use std::path::Path;

/// A registered scratch path waiting for its bytes.
///
/// Either [`commit`](Self::commit) it once the file is complete, or drop it;
/// dropping deletes any partial file and removes the registry entry. No exit
/// path leaves an unregistered file behind.
#[derive(Debug)]
#[must_use = "an uncommitted reservation deletes its file when dropped"]
pub struct ArtifactReservation {
    manager: ResourceLifecycleManager,
    artifact: TempArtifact,
    committed: bool,
}

impl ArtifactReservation {
    pub(crate) fn new(manager: ResourceLifecycleManager, artifact: TempArtifact) -> Self {
        Self {
            manager,
            artifact,
            committed: false,
        }
    }

    /// Where to write the artifact.
    pub fn path(&self) -> &Path {
        self.artifact.as_path()
    }

    /// The artifact this reservation will become.
    pub fn artifact(&self) -> &TempArtifact {
        &self.artifact
    }

    /// Mark the artifact live. Fails if nothing was written to the path.
    pub fn commit(mut self) -> Result<TempArtifact, StorageError> {
        self.manager.promote(&self.artifact)?;
        self.committed = true;
        Ok(self.artifact.clone())
    }
}

impl Drop for ArtifactReservation {
    fn drop(&mut self) {
        if !self.committed {
            self.manager.abandon(&self.artifact);
        }
    }
}
