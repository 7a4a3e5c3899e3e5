//! Records surfaced to callers of the walker and file queries.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::intern::InternedStr;
use crate::path;

/// A file found by file enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Directory containing the file.
    pub full_path: InternedStr,
    /// File base name.
    pub file_name: InternedStr,
    /// Size in bytes, 0 if it could not be read.
    pub file_size: u64,
}

impl FileInfo {
    /// Full path of the file itself.
    pub fn path(&self) -> String {
        path::join(&self.full_path, &self.file_name)
    }
}

/// Creation and modification times of a file.
///
/// Unix does not record creation time, so `created` holds the last status
/// change time there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTimes {
    pub created: SystemTime,
    pub modified: SystemTime,
}
