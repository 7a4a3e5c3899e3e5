//! Status-gated file handles and path creation for platio.
//!
//! [`FileHandle`] owns at most one open file and reports every I/O outcome
//! through its [`Status`]. [`create_path`] makes sure a directory path and
//! its missing ancestors exist before something is written there. The
//! remaining functions are small path-level queries and edits.
//!
//! # Example
//!
//! ```rust,no_run
//! use platio_file::{create_path, AccessMode, FileHandle, Status};
//!
//! create_path("/tmp/platio/out/").unwrap();
//!
//! let mut file = FileHandle::new();
//! if file.open("/tmp/platio/out/log.txt", AccessMode::Write) == Status::Ok {
//!     let written = file.write(b"hello").unwrap();
//!     assert_eq!(written.bytes, 5);
//! }
//! file.close();
//! ```

mod create;
mod handle;
mod ops;

pub use create::create_path;
pub use handle::{FileHandle, Transfer};
pub use ops::{
    compare_file_times, current_directory, file_delete, file_size, file_times, file_touch,
    is_directory, is_file, is_sub_directory, set_current_directory,
};

// Re-export core types for convenience
pub use platio_core::{AccessMode, Capability, ContractViolation, FileTimes, FsError, Status};
