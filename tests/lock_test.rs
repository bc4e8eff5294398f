use flockfile::lock::blocking::is_locked;
use flockfile::{FileLock, LockFile, LockOptions};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_lock_acquire_and_release() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("test.lock");

    let lock = FileLock::acquire(&lock_path, &LockOptions::new()).unwrap();
    assert!(lock.held());
    assert!(lock_path.exists());

    drop(lock);
    // The lock file persists after release; it is the arbitration anchor
    assert!(lock_path.exists());
}

#[test]
fn test_probe_reflects_hold_transitions() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("test.lock");

    assert!(!is_locked(&lock_path).unwrap());

    let lock = FileLock::acquire(&lock_path, &LockOptions::new()).unwrap();
    assert!(is_locked(&lock_path).unwrap());

    drop(lock);
    assert!(!is_locked(&lock_path).unwrap());
}

#[test]
fn test_contended_zero_timeout_fails() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("test.lock");

    let _holder = FileLock::acquire(&lock_path, &LockOptions::new()).unwrap();

    let result = FileLock::acquire(&lock_path, &LockOptions::new().timeout(Duration::ZERO));
    let err = result.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got: {}", err);
    assert_eq!(err.path(), &lock_path);
}

#[test]
fn test_handle_release_is_idempotent_across_guards() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("test.lock");

    let mut handle = LockFile::open(&lock_path).unwrap();
    assert!(handle.try_acquire().unwrap());
    handle.release();
    handle.release();
    assert!(!handle.held());

    // Double release on one handle must not disturb a fresh acquisition
    let lock = FileLock::acquire(&lock_path, &LockOptions::new().timeout(Duration::ZERO)).unwrap();
    assert!(lock.held());
}

#[test]
fn test_explicit_release_frees_lock() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp.path().join("test.lock");

    let lock = FileLock::acquire(&lock_path, &LockOptions::new()).unwrap();
    lock.release();

    // Immediately reacquirable without waiting
    let lock = FileLock::acquire(&lock_path, &LockOptions::new().timeout(Duration::ZERO)).unwrap();
    assert!(lock.held());
}

#[test]
fn test_missing_parent_directory_is_created() {
    let temp = TempDir::new().unwrap();
    let lock_path = temp
        .path()
        .join("not")
        .join("yet")
        .join("here")
        .join("test.lock");

    let lock = FileLock::acquire(&lock_path, &LockOptions::new()).unwrap();
    assert!(lock_path.parent().unwrap().is_dir());
    assert!(lock.held());
}

#[test]
fn test_open_failure_surfaces_immediately() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("file");
    std::fs::write(&blocker, b"").unwrap();

    // Parent "directory" is a regular file; this is an I/O error, not a timeout
    let result = FileLock::acquire(&blocker.join("test.lock"), &LockOptions::new());
    let err = result.unwrap_err();
    assert!(!err.is_timeout());
}
