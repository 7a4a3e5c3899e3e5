//! Core types and traits for platio.
//!
//! This crate provides the vocabulary shared by the file handle and the
//! tree walker: handle status and capabilities, traversal outputs,
//! configuration, path helpers, and the string interning seam.

mod config;
mod error;
mod info;
mod intern;
pub mod path;
mod status;

pub use config::{DEFAULT_EXCLUSIONS, Depth, ExclusionSet, WalkConfig, WalkConfigBuilder};
pub use error::{ContractViolation, FsError};
pub use info::{FileInfo, FileTimes};
pub use intern::{InternedStr, SharedStringTable, StringTable};
pub use status::{AccessMode, Capability, Status};
