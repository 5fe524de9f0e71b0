//! Artifact registry and scratch directory ownership.

use crate::{ArtifactNaming, ArtifactReservation};
use derive_getters::Getters;
use mosaic_core::{ArtifactKind, ResultId, TempArtifact};
use mosaic_error::{StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryState {
    /// Path handed out, file may be partially written
    Reserved,
    /// File complete and owned by a result
    Live,
}

#[derive(Debug)]
struct Entry {
    artifact: TempArtifact,
    state: EntryState,
}

#[derive(Debug, Default)]
struct Registry {
    entries: HashMap<PathBuf, Entry>,
    closed: bool,
}

impl Registry {
    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.closed {
            return Err(StorageError::new(StorageErrorKind::Closed));
        }
        Ok(())
    }

    fn release_live(&mut self) -> usize {
        let doomed: Vec<PathBuf> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.state == EntryState::Live)
            .map(|(path, _)| path.clone())
            .collect();
        for path in &doomed {
            self.entries.remove(path);
            remove_quietly(path);
        }
        doomed.len()
    }
}

/// Outcome of a [`ResourceLifecycleManager::sweep`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct SweepReport {
    /// Orphaned artifact files that were deleted
    removed: Vec<PathBuf>,
    /// Matching files kept because a live entry references them
    retained: usize,
    /// Files and directories left alone because they do not match the convention
    ignored: usize,
}

/// Owns the scratch directory and the registry of temp artifacts.
///
/// Every registry mutation and every deletion in the scratch directory happens
/// under one lock, so a sweep cannot delete a file that a materialization is
/// still writing: reserved paths are registered before the file exists.
///
/// Cloning is cheap and clones share the same registry.
#[derive(Debug, Clone)]
pub struct ResourceLifecycleManager {
    scratch_dir: Arc<PathBuf>,
    naming: ArtifactNaming,
    registry: Arc<Mutex<Registry>>,
}

impl ResourceLifecycleManager {
    /// Open (creating if needed) a scratch directory.
    #[instrument(skip_all, fields(scratch_dir = %scratch_dir.as_ref().display()))]
    pub fn new(scratch_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let requested = scratch_dir.as_ref();
        std::fs::create_dir_all(requested)
            .map_err(|e| StorageError::io(requested.display(), e))?;
        let scratch_dir = requested.canonicalize().map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidScratchDir(format!(
                "{}: {}",
                requested.display(),
                e
            )))
        })?;
        if !scratch_dir.is_dir() {
            return Err(StorageError::new(StorageErrorKind::InvalidScratchDir(
                scratch_dir.display().to_string(),
            )));
        }

        debug!(scratch_dir = %scratch_dir.display(), "Opened scratch directory");
        Ok(Self {
            scratch_dir: Arc::new(scratch_dir),
            naming: ArtifactNaming::new()?,
            registry: Arc::new(Mutex::new(Registry::default())),
        })
    }

    /// The canonical scratch directory.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Hand out a fresh, registered path for an artifact of `kind`.
    ///
    /// The path is protected from sweeps immediately. Dropping the reservation
    /// without committing deletes whatever was written and unregisters it.
    pub fn reserve(
        &self,
        kind: ArtifactKind,
        owner: ResultId,
    ) -> Result<ArtifactReservation, StorageError> {
        let path = self.scratch_dir.join(self.naming.generate(kind));
        let artifact = TempArtifact::new(path.clone(), kind, owner);

        let mut registry = self.lock()?;
        registry.ensure_open()?;
        registry.entries.insert(
            path,
            Entry {
                artifact: artifact.clone(),
                state: EntryState::Reserved,
            },
        );
        drop(registry);
        debug!(path = %artifact.path().display(), %owner, "Reserved artifact path");
        Ok(ArtifactReservation::new(self.clone(), artifact))
    }

    /// Register an artifact written elsewhere in the scratch directory.
    pub fn register(&self, artifact: TempArtifact) -> Result<(), StorageError> {
        if artifact.as_path().parent() != Some(self.scratch_dir.as_path()) {
            return Err(StorageError::new(StorageErrorKind::OutsideScratchDir(
                artifact.path().display().to_string(),
            )));
        }
        let mut registry = self.lock()?;
        registry.ensure_open()?;
        debug!(path = %artifact.path().display(), owner = %artifact.owner(), "Registered artifact");
        registry.entries.insert(
            artifact.path().clone(),
            Entry {
                artifact,
                state: EntryState::Live,
            },
        );
        Ok(())
    }

    /// Delete every live artifact owned by `owner`.
    ///
    /// Files already gone are not an error, so releasing twice is a no-op.
    /// Returns how many registry entries were dropped.
    #[instrument(skip(self), fields(owner = %owner))]
    pub fn release(&self, owner: ResultId) -> Result<usize, StorageError> {
        let mut registry = self.lock()?;
        let doomed: Vec<PathBuf> = registry
            .entries
            .iter()
            .filter(|(_, entry)| {
                entry.state == EntryState::Live && *entry.artifact.owner() == owner
            })
            .map(|(path, _)| path.clone())
            .collect();

        for path in &doomed {
            registry.entries.remove(path);
            remove_quietly(path);
        }

        if !doomed.is_empty() {
            info!(count = doomed.len(), "Released artifacts");
        }
        Ok(doomed.len())
    }

    /// Release every live artifact regardless of owner.
    #[instrument(skip(self))]
    pub fn release_all(&self) -> Result<usize, StorageError> {
        let released = self.lock()?.release_live();
        info!(count = released, "Released all artifacts");
        Ok(released)
    }

    /// Release every live artifact and refuse new ones from now on.
    ///
    /// Reservations still outstanding can no longer commit; their files are
    /// deleted when they drop. Closing twice is a no-op.
    #[instrument(skip(self))]
    pub fn close(&self) -> Result<usize, StorageError> {
        let mut registry = self.lock()?;
        registry.closed = true;
        let released = registry.release_live();
        info!(count = released, "Closed scratch storage");
        Ok(released)
    }

    /// True once [`close`](Self::close) has run.
    pub fn is_closed(&self) -> Result<bool, StorageError> {
        Ok(self.lock()?.closed)
    }

    /// Delete artifact-named files that no registry entry references.
    ///
    /// Intended to run once at startup to recover from an abnormal exit.
    /// Files not following the naming convention are never touched.
    #[instrument(skip(self), fields(scratch_dir = %self.scratch_dir.display()))]
    pub fn sweep(&self) -> Result<SweepReport, StorageError> {
        let registry = self.lock()?;
        let mut report = SweepReport::default();

        let listing = std::fs::read_dir(self.scratch_dir.as_path())
            .map_err(|e| StorageError::io(self.scratch_dir.display(), e))?;
        for dir_entry in listing {
            let dir_entry = dir_entry.map_err(|e| StorageError::io(self.scratch_dir.display(), e))?;
            let path = dir_entry.path();
            let is_file = dir_entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            let name = dir_entry.file_name();
            let matches = name.to_str().is_some_and(|n| self.naming.matches(n));

            if !is_file || !matches {
                report.ignored += 1;
                continue;
            }
            if registry.entries.contains_key(&path) {
                report.retained += 1;
                continue;
            }
            remove_quietly(&path);
            report.removed.push(path);
        }

        info!(
            removed = report.removed.len(),
            retained = report.retained,
            ignored = report.ignored,
            "Swept scratch directory"
        );
        Ok(report)
    }

    /// Live artifacts owned by `owner`.
    pub fn artifacts_for(&self, owner: ResultId) -> Result<Vec<TempArtifact>, StorageError> {
        Ok(self
            .lock()?
            .entries
            .values()
            .filter(|entry| entry.state == EntryState::Live && *entry.artifact.owner() == owner)
            .map(|entry| entry.artifact.clone())
            .collect())
    }

    /// Number of live artifacts.
    pub fn live_count(&self) -> Result<usize, StorageError> {
        Ok(self
            .lock()?
            .entries
            .values()
            .filter(|entry| entry.state == EntryState::Live)
            .count())
    }

    /// True if `path` is reserved or live.
    pub fn is_registered(&self, path: &Path) -> Result<bool, StorageError> {
        Ok(self.lock()?.entries.contains_key(path))
    }

    pub(crate) fn promote(&self, artifact: &TempArtifact) -> Result<(), StorageError> {
        if !artifact.as_path().is_file() {
            return Err(StorageError::new(StorageErrorKind::Io(format!(
                "{}: artifact was never written",
                artifact.path().display()
            ))));
        }
        let mut registry = self.lock()?;
        registry.ensure_open()?;
        registry.entries.insert(
            artifact.path().clone(),
            Entry {
                artifact: artifact.clone(),
                state: EntryState::Live,
            },
        );
        debug!(path = %artifact.path().display(), "Committed artifact");
        Ok(())
    }

    pub(crate) fn abandon(&self, artifact: &TempArtifact) {
        let mut registry = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        registry.entries.remove(artifact.as_path());
        remove_quietly(artifact.as_path());
        debug!(path = %artifact.path().display(), "Abandoned reserved artifact");
    }

    fn lock(&self) -> Result<MutexGuard<'_, Registry>, StorageError> {
        self.registry
            .lock()
            .map_err(|_| StorageError::new(StorageErrorKind::RegistryPoisoned))
    }
}

fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete artifact"),
    }
}
