//! Tests for artifact registration, release, and startup sweeps.

use mosaic_core::{ArtifactKind, ResultId, TempArtifact};
use mosaic_error::StorageErrorKind;
use mosaic_storage::{ArtifactNaming, ResourceLifecycleManager};
use std::fs;

fn manager() -> (tempfile::TempDir, ResourceLifecycleManager) {
    let dir = tempfile::tempdir().unwrap();
    let manager = ResourceLifecycleManager::new(dir.path()).unwrap();
    (dir, manager)
}

fn write_committed(
    manager: &ResourceLifecycleManager,
    kind: ArtifactKind,
    owner: ResultId,
) -> TempArtifact {
    let reservation = manager.reserve(kind, owner).unwrap();
    fs::write(reservation.path(), b"payload").unwrap();
    reservation.commit().unwrap()
}

// ============================================================================
// Naming Tests
// ============================================================================

#[test]
fn test_generated_names_match_convention() {
    let naming = ArtifactNaming::new().unwrap();
    for kind in ArtifactKind::ALL {
        let name = naming.generate(kind);
        assert!(naming.matches(&name), "{} should match", name);
        assert!(name.starts_with(kind.prefix()));
        assert!(name.ends_with(kind.extension()));
    }
}

#[test]
fn test_foreign_names_do_not_match() {
    let naming = ArtifactNaming::new().unwrap();
    for name in [
        "notes.txt",
        "image_notes.jpg",
        "image_0123456789abcdef0123456789abcdef.png",
        "thumb_0123456789abcdef0123456789abcdef.mp4",
        "clip_0123456789abcdef0123456789abcdef.mp4",
        "image_0123456789ABCDEF0123456789ABCDEF.jpg",
    ] {
        assert!(!naming.matches(name), "{} should not match", name);
    }
}

// ============================================================================
// Reservation Tests
// ============================================================================

#[test]
fn test_commit_makes_artifact_live() {
    let (_dir, manager) = manager();
    let owner = ResultId::new();

    let artifact = write_committed(&manager, ArtifactKind::Image, owner);

    assert!(artifact.as_path().is_file());
    assert_eq!(artifact.as_path().parent(), Some(manager.scratch_dir()));
    assert_eq!(manager.live_count().unwrap(), 1);
    assert_eq!(manager.artifacts_for(owner).unwrap(), vec![artifact]);
}

#[test]
fn test_dropped_reservation_cleans_up() {
    let (_dir, manager) = manager();
    let reservation = manager.reserve(ArtifactKind::Video, ResultId::new()).unwrap();
    let path = reservation.path().to_path_buf();
    fs::write(&path, b"partial").unwrap();
    assert!(manager.is_registered(&path).unwrap());

    drop(reservation);

    assert!(!path.exists());
    assert!(!manager.is_registered(&path).unwrap());
    assert_eq!(manager.live_count().unwrap(), 0);
}

#[test]
fn test_commit_without_file_fails_and_unregisters() {
    let (_dir, manager) = manager();
    let reservation = manager.reserve(ArtifactKind::Image, ResultId::new()).unwrap();
    let path = reservation.path().to_path_buf();

    assert!(reservation.commit().is_err());
    assert!(!manager.is_registered(&path).unwrap());
}

#[test]
fn test_reserved_path_survives_sweep() {
    let (_dir, manager) = manager();
    let reservation = manager.reserve(ArtifactKind::Image, ResultId::new()).unwrap();
    fs::write(reservation.path(), b"still writing").unwrap();

    let report = manager.sweep().unwrap();

    assert!(report.removed().is_empty());
    assert_eq!(*report.retained(), 1);
    assert!(reservation.path().is_file());
}

// ============================================================================
// Release Tests
// ============================================================================

#[test]
fn test_release_is_idempotent() {
    let (_dir, manager) = manager();
    let owner = ResultId::new();
    let image = write_committed(&manager, ArtifactKind::Video, owner);
    let thumb = write_committed(&manager, ArtifactKind::Thumbnail, owner);

    assert_eq!(manager.release(owner).unwrap(), 2);
    assert!(!image.as_path().exists());
    assert!(!thumb.as_path().exists());

    assert_eq!(manager.release(owner).unwrap(), 0);
    assert_eq!(manager.live_count().unwrap(), 0);
}

#[test]
fn test_release_only_touches_owner() {
    let (_dir, manager) = manager();
    let first = ResultId::new();
    let second = ResultId::new();
    write_committed(&manager, ArtifactKind::Image, first);
    let kept = write_committed(&manager, ArtifactKind::Image, second);

    manager.release(first).unwrap();

    assert!(kept.as_path().is_file());
    assert_eq!(manager.artifacts_for(second).unwrap().len(), 1);
}

#[test]
fn test_release_tolerates_missing_file() {
    let (_dir, manager) = manager();
    let owner = ResultId::new();
    let artifact = write_committed(&manager, ArtifactKind::Image, owner);
    fs::remove_file(artifact.as_path()).unwrap();

    assert_eq!(manager.release(owner).unwrap(), 1);
}

#[test]
fn test_release_all() {
    let (_dir, manager) = manager();
    let a = write_committed(&manager, ArtifactKind::Image, ResultId::new());
    let b = write_committed(&manager, ArtifactKind::Video, ResultId::new());

    assert_eq!(manager.release_all().unwrap(), 2);
    assert!(!a.as_path().exists());
    assert!(!b.as_path().exists());
}

// ============================================================================
// Close Tests
// ============================================================================

#[test]
fn test_close_releases_live_and_rejects_late_commits() {
    let (dir, manager) = manager();
    let owner = ResultId::new();
    let live = write_committed(&manager, ArtifactKind::Image, owner);
    let late = manager.reserve(ArtifactKind::Image, owner).unwrap();
    let late_path = late.path().to_path_buf();

    assert_eq!(manager.close().unwrap(), 1);
    assert!(manager.is_closed().unwrap());
    assert!(!live.as_path().exists());

    fs::write(&late_path, b"payload").unwrap();
    let err = late.commit().unwrap_err();
    assert_eq!(err.kind, StorageErrorKind::Closed);
    assert!(!late_path.exists());
    assert!(!manager.is_registered(&late_path).unwrap());
    assert_eq!(manager.live_count().unwrap(), 0);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_closed_manager_refuses_new_artifacts() {
    let (dir, manager) = manager();
    manager.close().unwrap();

    let err = manager.reserve(ArtifactKind::Video, ResultId::new()).unwrap_err();
    assert_eq!(err.kind, StorageErrorKind::Closed);

    let path = dir
        .path()
        .canonicalize()
        .unwrap()
        .join("image_0123456789abcdef0123456789abcdef.jpg");
    fs::write(&path, b"payload").unwrap();
    let err = manager
        .register(TempArtifact::new(path, ArtifactKind::Image, ResultId::new()))
        .unwrap_err();
    assert_eq!(err.kind, StorageErrorKind::Closed);
    assert_eq!(manager.close().unwrap(), 0);
}

// ============================================================================
// Registration Tests
// ============================================================================

#[test]
fn test_register_outside_scratch_dir_rejected() {
    let (_dir, manager) = manager();
    let elsewhere = tempfile::tempdir().unwrap();
    let path = elsewhere.path().join("image_0123456789abcdef0123456789abcdef.jpg");
    fs::write(&path, b"x").unwrap();

    let err = manager
        .register(TempArtifact::new(path.clone(), ArtifactKind::Image, ResultId::new()))
        .unwrap_err();

    assert!(matches!(err.kind, StorageErrorKind::OutsideScratchDir(_)));
    assert!(path.exists());
}

#[test]
fn test_registered_file_survives_sweep() {
    let (_dir, manager) = manager();
    let path = manager
        .scratch_dir()
        .join("thumb_0123456789abcdef0123456789abcdef.jpg");
    fs::write(&path, b"frame").unwrap();
    let owner = ResultId::new();
    manager
        .register(TempArtifact::new(path.clone(), ArtifactKind::Thumbnail, owner))
        .unwrap();

    let report = manager.sweep().unwrap();

    assert!(path.is_file());
    assert_eq!(*report.retained(), 1);
    assert_eq!(manager.release(owner).unwrap(), 1);
    assert!(!path.exists());
}

// ============================================================================
// Sweep Tests
// ============================================================================

#[test]
fn test_sweep_removes_only_orphaned_artifacts() {
    let (_dir, manager) = manager();
    let scratch = manager.scratch_dir().to_path_buf();
    let orphan_image = scratch.join("image_00000000000000000000000000000001.jpg");
    let orphan_video = scratch.join("video_00000000000000000000000000000002.mp4");
    let orphan_thumb = scratch.join("thumb_00000000000000000000000000000003.jpg");
    let unrelated = scratch.join("notes.txt");
    let lookalike = scratch.join("image_notes.jpg");
    let subdir = scratch.join("video_00000000000000000000000000000004.mp4.d");
    for path in [&orphan_image, &orphan_video, &orphan_thumb, &unrelated, &lookalike] {
        fs::write(path, b"x").unwrap();
    }
    fs::create_dir(&subdir).unwrap();
    let live = write_committed(&manager, ArtifactKind::Image, ResultId::new());

    let report = manager.sweep().unwrap();

    assert_eq!(report.removed().len(), 3);
    assert!(!orphan_image.exists());
    assert!(!orphan_video.exists());
    assert!(!orphan_thumb.exists());
    assert!(unrelated.exists());
    assert!(lookalike.exists());
    assert!(subdir.is_dir());
    assert!(live.as_path().is_file());
    assert_eq!(*report.retained(), 1);
    assert_eq!(*report.ignored(), 3);
}

#[test]
fn test_sweep_on_fresh_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("cache").join("scratch");

    let manager = ResourceLifecycleManager::new(&nested).unwrap();
    let report = manager.sweep().unwrap();

    assert!(nested.is_dir());
    assert!(report.removed().is_empty());
}
