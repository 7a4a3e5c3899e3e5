//! File handle status, access modes and capabilities.

use std::io;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Observable state of a file handle.
///
/// Status doubles as the result channel for I/O: every mutating handle
/// operation re-derives it from the outcome, so callers check it after
/// each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
pub enum Status {
    /// Last operation succeeded.
    Ok,
    /// Permission was denied by the OS.
    IoError,
    /// A read came up short or the position is at or past the end.
    EndOfStream,
    /// Any other OS failure (bad handle, invalid argument, not found, ...).
    UnknownError,
    /// No file is open.
    Closed,
}

impl Status {
    /// Map an OS error to the status taxonomy.
    pub fn from_io_error(error: &io::Error) -> Self {
        Self::from_io_error_kind(error.kind())
    }

    /// Map an OS error kind to the status taxonomy.
    pub fn from_io_error_kind(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::PermissionDenied => Status::IoError,
            _ => Status::UnknownError,
        }
    }

    /// Check if this is one of the two error states.
    pub fn is_error(self) -> bool {
        matches!(self, Status::IoError | Status::UnknownError)
    }

    /// Check if the handle is open and not in an error state.
    pub fn is_usable(self) -> bool {
        matches!(self, Status::Ok | Status::EndOfStream)
    }
}

/// How a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
pub enum AccessMode {
    /// Existing file, read only.
    Read,
    /// Create or truncate, write only.
    Write,
    /// Create if absent, read and append, positioned at the start.
    ReadWrite,
    /// Create if absent, append only.
    WriteAppend,
}

impl AccessMode {
    /// Capabilities granted by a successful open in this mode.
    pub fn capability(self) -> Capability {
        match self {
            AccessMode::Read => Capability::READ,
            AccessMode::Write | AccessMode::WriteAppend => Capability::WRITE,
            AccessMode::ReadWrite => Capability::READ | Capability::WRITE,
        }
    }
}

bitflags! {
    /// Operations permitted on an open handle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capability: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
    }
}
