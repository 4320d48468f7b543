//! # File I/O Module
//!
//! Handles estimate file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Prevent concurrent edits on shared drives
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Estimates are saved as `.fqt` (furniture quote) files containing
//! JSON. Lock files use the `.fqt.lock` extension with metadata about
//! who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::file_io::{save_project, load_project, FileLock};
//! use quote_core::catalog::Catalog;
//! use quote_core::project::Project;
//! use quote_core::session::EstimateSession;
//! use std::path::Path;
//!
//! let session = EstimateSession::new(Catalog::new());
//! let project = Project::from_session(&session, "Anh Tuấn", "Tủ bếp");
//! let path = Path::new("tubep.fqt");
//!
//! // Acquire lock before saving
//! let lock = FileLock::acquire(path, "sales@xuongmoc.vn").unwrap();
//!
//! // Save with atomic write
//! save_project(&project, path).unwrap();
//!
//! // Lock is released when dropped
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Lock file metadata stored in .fqt.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

/// Get the hostname of the current machine
fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both:
/// 1. OS-level file locking (via fs2) for process safety
/// 2. .lock file with metadata for user visibility
#[derive(Debug)]
pub struct FileLock {
    /// Path to the estimate file
    project_path: PathBuf,
    /// Path to the lock file
    lock_path: PathBuf,
    /// The underlying file handle (keeps OS lock)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on an estimate file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(EstimateError::FileLocked)` - Another process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> EstimateResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        // Check if lock file exists and contains valid lock info
        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                // Check if the lock is stale (process no longer running)
                if !is_lock_stale(&existing) {
                    return Err(EstimateError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
                // Lock is stale, we can take it over
            }
        }

        // Create/open the lock file
        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                EstimateError::file_error(
                    "create lock",
                    lock_path.display().to_string(),
                    e.to_string(),
                )
            })?;

        // Try to acquire exclusive OS-level lock (non-blocking)
        lock_file.try_lock_exclusive().map_err(|_| {
            EstimateError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        // Write lock info to the file using the same handle
        let lock_json =
            serde_json::to_string_pretty(&info).map_err(|e| EstimateError::SerializationError {
                reason: e.to_string(),
            })?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            EstimateError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            EstimateError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }

    /// Get the path to the estimate file
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Remove the lock file
        let _ = fs::remove_file(&self.lock_path);
        // OS lock is released when _lock_file is dropped
    }
}

/// Get the lock file path for an estimate file
fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut lock_path = project_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Read lock info from a lock file
fn read_lock_info(lock_path: &Path) -> EstimateResult<LockInfo> {
    let mut file = File::open(lock_path).map_err(|e| {
        EstimateError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        EstimateError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| EstimateError::SerializationError {
        reason: e.to_string(),
    })
}

/// Check if a lock is stale (the process that created it is no longer
/// running, or it is over a day old)
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    let age = Utc::now() - info.locked_at;
    age.num_hours() > 24
}

/// Save an estimate to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize the project to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to .fqt (atomic on most filesystems)
///
/// This prevents corruption if the process is interrupted during write.
pub fn save_project(project: &Project, path: &Path) -> EstimateResult<()> {
    let json =
        serde_json::to_string_pretty(project).map_err(|e| EstimateError::SerializationError {
            reason: e.to_string(),
        })?;

    let tmp_path = path.with_extension("fqt.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        EstimateError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        EstimateError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.sync_all().map_err(|e| {
        EstimateError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        EstimateError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load an estimate from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded
/// * `Err(EstimateError::VersionMismatch)` - File version is incompatible
/// * `Err(EstimateError::SerializationError)` - Invalid JSON
/// * `Err(EstimateError::FileError)` - I/O error
pub fn load_project(path: &Path) -> EstimateResult<Project> {
    let mut file = File::open(path)
        .map_err(|e| EstimateError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| EstimateError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project =
        serde_json::from_str(&contents).map_err(|e| EstimateError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    Ok(project)
}

/// Validate that a file's schema version is compatible with this build.
///
/// Currently only the exact current version is accepted; migrations can
/// widen this check later.
fn validate_version(file_version: &str) -> EstimateResult<()> {
    if file_version != SCHEMA_VERSION {
        return Err(EstimateError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::session::EstimateSession;
    use uuid::Uuid;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}.fqt", name, Uuid::new_v4()))
    }

    fn sample_project() -> Project {
        let mut session = EstimateSession::new(Catalog::new());
        session.set_dimensions(800.0, 400.0, 750.0);
        Project::from_session(&session, "Anh Tuấn", "Tủ bếp")
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = temp_path("roundtrip");
        let project = sample_project();

        save_project(&project, &path).unwrap();
        let loaded = load_project(&path).unwrap();
        assert_eq!(project, loaded);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(Path::new("/nonexistent/nowhere.fqt")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_path("bad-json");
        fs::write(&path, "{not json").unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_version_mismatch() {
        let path = temp_path("version");
        let mut project = sample_project();
        project.meta.version = "99.0.0".to_string();
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_lock_blocks_second_acquire() {
        let path = temp_path("lock");
        let lock = FileLock::acquire(&path, "first@shop.vn").unwrap();
        assert_eq!(lock.project_path(), path.as_path());

        let err = FileLock::acquire(&path, "second@shop.vn").unwrap_err();
        assert!(err.is_recoverable());

        drop(lock);
        let relock = FileLock::acquire(&path, "second@shop.vn").unwrap();
        drop(relock);
    }

    #[test]
    fn test_check_reports_holder() {
        let path = temp_path("check");
        assert!(FileLock::check(&path).is_none());

        let lock = FileLock::acquire(&path, "sales@shop.vn").unwrap();
        let info = FileLock::check(&path).expect("lock visible");
        assert_eq!(info.user_id, "sales@shop.vn");

        drop(lock);
        assert!(FileLock::check(&path).is_none());
    }

    #[test]
    fn test_no_tmp_file_left_behind() {
        let path = temp_path("tmpclean");
        save_project(&sample_project(), &path).unwrap();
        assert!(!path.with_extension("fqt.tmp").exists());
        fs::remove_file(&path).unwrap();
    }
}
