//! Path-level file queries and edits.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;
use platio_core::path;
use platio_core::{FileTimes, FsError, InternedStr, StringTable};

fn non_empty(path: &str) -> Result<&str, FsError> {
    if path.is_empty() {
        Err(FsError::invalid_path(path, "path is empty"))
    } else {
        Ok(path)
    }
}

/// Remove a file.
pub fn file_delete(path: &str) -> Result<(), FsError> {
    let path = non_empty(path)?;
    path::warn_if_long("delete", path);
    fs::remove_file(path).map_err(|e| FsError::io(path, e))
}

/// Set a file's access and modification times to now.
pub fn file_touch(path: &str) -> Result<(), FsError> {
    let path = non_empty(path)?;
    let now = FileTime::now();
    filetime::set_file_times(path, now, now).map_err(|e| FsError::io(path, e))
}

/// Creation (status change on Unix) and modification times of a path.
pub fn file_times(path: &str) -> Result<FileTimes, FsError> {
    let path = non_empty(path)?;
    let metadata = fs::metadata(path).map_err(|e| FsError::io(path, e))?;
    let modified = metadata.modified().map_err(|e| FsError::io(path, e))?;
    let created = created_time(&metadata).unwrap_or(modified);
    Ok(FileTimes { created, modified })
}

#[cfg(unix)]
fn created_time(metadata: &fs::Metadata) -> Option<SystemTime> {
    use std::os::unix::fs::MetadataExt;
    let changed = FileTime::from_unix_time(metadata.ctime(), metadata.ctime_nsec() as u32);
    let secs = u64::try_from(changed.unix_seconds()).ok()?;
    SystemTime::UNIX_EPOCH.checked_add(std::time::Duration::new(secs, changed.nanoseconds()))
}

#[cfg(not(unix))]
fn created_time(metadata: &fs::Metadata) -> Option<SystemTime> {
    metadata.created().ok()
}

/// Order two file times.
pub fn compare_file_times(a: SystemTime, b: SystemTime) -> Ordering {
    a.cmp(&b)
}

/// Check if `path` is a regular file. False for empty or unreadable paths.
pub fn is_file(path: &str) -> bool {
    !path.is_empty() && fs::metadata(path).is_ok_and(|m| m.is_file())
}

/// Check if `path` is a directory. False for empty or unreadable paths.
pub fn is_directory(path: &str) -> bool {
    !path.is_empty() && fs::metadata(path).is_ok_and(|m| m.is_dir())
}

/// Size of the file at `path`, 0 if it cannot be read.
pub fn file_size(path: &str) -> u64 {
    if path.is_empty() {
        return 0;
    }
    fs::metadata(path).map_or(0, |m| m.len())
}

/// Check if `sub` names a directory inside `parent`.
pub fn is_sub_directory(parent: &str, sub: &str) -> bool {
    is_directory(&path::join(parent, sub))
}

/// The process working directory, interned.
pub fn current_directory(table: &dyn StringTable) -> Result<InternedStr, FsError> {
    let cwd = std::env::current_dir().map_err(|e| FsError::io(".", e))?;
    Ok(table.intern(&cwd.to_string_lossy()))
}

/// Change the process working directory.
pub fn set_current_directory(path: impl AsRef<Path>) -> Result<(), FsError> {
    let path = path.as_ref();
    std::env::set_current_dir(path).map_err(|e| FsError::io(path, e))
}
