//! Status-gated file handle.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use platio_core::path;
use platio_core::{AccessMode, Capability, ContractViolation, Status};

/// Outcome of a read or write: the resulting status and the bytes moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub status: Status,
    pub bytes: usize,
}

impl Transfer {
    fn new(status: Status, bytes: usize) -> Self {
        Self { status, bytes }
    }
}

/// Exclusive owner of at most one open OS file.
///
/// A handle starts `Closed` with no capabilities. [`open`](Self::open)
/// fixes the capabilities for the lifetime of that open file; every other
/// operation requires an open handle and re-derives the status from its
/// outcome instead of returning an I/O error. Misuse (closed handle,
/// missing capability, seeking before the start) is a
/// [`ContractViolation`]: a panic in debug builds, an `Err` with no effect
/// otherwise.
///
/// The file is released on [`close`](Self::close), on re-open and on drop.
#[derive(Debug)]
pub struct FileHandle {
    status: Status,
    capability: Capability,
    file: Option<File>,
}

impl FileHandle {
    /// Create a closed handle.
    pub fn new() -> Self {
        Self {
            status: Status::Closed,
            capability: Capability::empty(),
            file: None,
        }
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Capabilities granted by the last successful open.
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Check if any of the bits in `cap` are granted.
    pub fn has_capability(&self, cap: Capability) -> bool {
        self.capability.intersects(cap)
    }

    /// Open `path` in `mode`, closing any file already held.
    ///
    /// On failure the status is `IoError` for permission problems and
    /// `UnknownError` otherwise, and no capabilities are granted.
    pub fn open(&mut self, path: impl AsRef<Path>, mode: AccessMode) -> Status {
        let path = path.as_ref();
        path::warn_if_long("open", &path.to_string_lossy());

        if self.status != Status::Closed {
            self.close();
        }

        let mut options = OpenOptions::new();
        match mode {
            AccessMode::Read => options.read(true),
            AccessMode::Write => options.write(true).create(true).truncate(true),
            AccessMode::ReadWrite => options.read(true).append(true).create(true),
            AccessMode::WriteAppend => options.append(true).create(true),
        };

        let file = match options.open(path) {
            Ok(file) => file,
            Err(err) => {
                tracing::debug!(path = %path.display(), %mode, error = %err, "open failed");
                self.status = Status::from_io_error(&err);
                return self.status;
            }
        };

        self.file = Some(file);
        self.capability = mode.capability();
        self.status = Status::Ok;
        tracing::trace!(path = %path.display(), %mode, "opened file");

        if mode == AccessMode::ReadWrite {
            self.seek_to(SeekFrom::Start(0));
        }

        self.status
    }

    /// Fill `dst` from the file.
    ///
    /// Does nothing unless the status is `Ok`. A short read moves the handle
    /// to `EndOfStream`; the bytes actually read are reported either way.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<Transfer, ContractViolation> {
        self.require(Capability::READ)?;
        if self.status != Status::Ok || dst.is_empty() {
            return Ok(Transfer::new(self.status, 0));
        }
        let Some(file) = self.file.as_mut() else {
            return ContractViolation::HandleClosed.raise();
        };

        let (bytes, error) = read_full(file, dst);
        if let Some(err) = error {
            tracing::debug!(error = %err, bytes, "read stopped early");
        }
        if bytes < dst.len() {
            self.status = Status::EndOfStream;
        }
        Ok(Transfer::new(self.status, bytes))
    }

    /// Write all of `src` to the file.
    ///
    /// Does nothing unless the status is `Ok` or `EndOfStream`. A short
    /// write moves the handle to an error status.
    pub fn write(&mut self, src: &[u8]) -> Result<Transfer, ContractViolation> {
        self.require(Capability::WRITE)?;
        if !self.status.is_usable() || src.is_empty() {
            return Ok(Transfer::new(self.status, 0));
        }
        let Some(file) = self.file.as_mut() else {
            return ContractViolation::HandleClosed.raise();
        };

        let (bytes, error) = write_full(file, src);
        if bytes < src.len() {
            let kind = error.map_or(io::ErrorKind::WriteZero, |err| err.kind());
            tracing::debug!(?kind, bytes, requested = src.len(), "short write");
            self.status = Status::from_io_error_kind(kind);
        }
        Ok(Transfer::new(self.status, bytes))
    }

    /// Move the file position.
    ///
    /// `absolute` positions from the start and requires a non-negative
    /// offset; otherwise `offset` is relative to the current position and
    /// must not land before the start. Positions past the end are allowed
    /// and leave the handle at `EndOfStream`. Error states are left alone.
    pub fn set_position(&mut self, offset: i64, absolute: bool) -> Result<Status, ContractViolation> {
        self.require(Capability::empty())?;
        if !self.status.is_usable() {
            return Ok(self.status);
        }

        let target = if absolute {
            if offset < 0 {
                return ContractViolation::NegativeAbsolutePosition { offset }.raise();
            }
            SeekFrom::Start(offset.unsigned_abs())
        } else {
            let position = self.position()?;
            if i128::from(position) + i128::from(offset) < 0 {
                return ContractViolation::NegativeRelativePosition { position, offset }.raise();
            }
            SeekFrom::Current(offset)
        };

        Ok(self.seek_to(target))
    }

    /// Current byte offset from the start of the file.
    pub fn position(&self) -> Result<u64, ContractViolation> {
        self.require(Capability::empty())?;
        let Some(mut file) = self.file.as_ref() else {
            return ContractViolation::HandleClosed.raise();
        };
        match file.stream_position() {
            Ok(position) => Ok(position),
            Err(err) => {
                tracing::debug!(error = %err, "position query failed");
                Ok(0)
            }
        }
    }

    /// Length of the open file in bytes.
    ///
    /// 0 when the handle is closed, in an error state, or the query fails.
    pub fn size(&self) -> u64 {
        if self.status == Status::Closed {
            tracing::warn!("size queried on a closed file handle");
            return 0;
        }
        if !self.status.is_usable() {
            return 0;
        }
        self.file
            .as_ref()
            .and_then(|file| file.metadata().ok())
            .map_or(0, |metadata| metadata.len())
    }

    /// Push written data through to the backing store.
    pub fn flush(&mut self) -> Result<Status, ContractViolation> {
        self.require(Capability::WRITE)?;
        let Some(file) = self.file.as_mut() else {
            return ContractViolation::HandleClosed.raise();
        };

        self.status = match file.sync_data() {
            Ok(()) => Status::Ok,
            Err(err) => {
                tracing::debug!(error = %err, "flush failed");
                Status::from_io_error(&err)
            }
        };
        Ok(self.status)
    }

    /// Release the file. Calling this on a closed handle is a no-op.
    ///
    /// A writable file is synced before release. If that fails the error
    /// status is returned, but the handle is released and left `Closed`.
    pub fn close(&mut self) -> Status {
        if self.status == Status::Closed {
            return self.status;
        }
        let mut outcome = Status::Closed;
        if let Some(file) = self.file.take() {
            if self.capability.contains(Capability::WRITE) {
                if let Err(err) = file.sync_all() {
                    tracing::debug!(error = %err, "sync before close failed");
                    outcome = Status::from_io_error(&err);
                }
            }
            drop(file);
            tracing::trace!("closed file");
        }
        self.capability = Capability::empty();
        self.status = Status::Closed;
        outcome
    }

    /// Check the preconditions shared by every operation on an open file.
    #[track_caller]
    fn require(&self, required: Capability) -> Result<(), ContractViolation> {
        if self.status == Status::Closed || self.file.is_none() {
            return ContractViolation::HandleClosed.raise();
        }
        if !required.is_empty() && !self.has_capability(required) {
            return ContractViolation::MissingCapability { required }.raise();
        }
        Ok(())
    }

    /// Seek and derive the status from where the position ended up.
    fn seek_to(&mut self, target: SeekFrom) -> Status {
        let Some(file) = self.file.as_mut() else {
            return self.status;
        };
        self.status = match file.seek(target) {
            Ok(position) => {
                let size = file.metadata().map_or(0, |metadata| metadata.len());
                if position >= size {
                    Status::EndOfStream
                } else {
                    Status::Ok
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, ?target, "seek failed");
                Status::from_io_error(&err)
            }
        };
        self.status
    }
}

impl Default for FileHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Read until `dst` is full, the stream ends, or an error occurs.
fn read_full(file: &mut File, dst: &mut [u8]) -> (usize, Option<io::Error>) {
    let mut filled = 0;
    while filled < dst.len() {
        match file.read(&mut dst[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return (filled, Some(err)),
        }
    }
    (filled, None)
}

/// Write until `src` is exhausted or the file stops accepting bytes.
fn write_full(file: &mut File, src: &[u8]) -> (usize, Option<io::Error>) {
    let mut written = 0;
    while written < src.len() {
        match file.write(&src[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return (written, Some(err)),
        }
    }
    (written, None)
}
