//! Filtered directory tree enumeration for platio.
//!
//! [`TreeWalker`] walks a directory tree depth first, visiting each
//! directory before its children, and appends what it finds to a
//! caller-supplied vector:
//!
//! - [`TreeWalker::dump_directories`] collects directory paths
//! - [`TreeWalker::dump_path`] collects [`FileInfo`] records for files
//!
//! Both prune excluded directory names with everything below them and stop
//! descending once the [`Depth`] budget is spent. Traversal is iterative
//! (`walkdir`), so deep trees never grow the call stack.
//!
//! # Example
//!
//! ```rust,no_run
//! use platio_walk::{Depth, TreeWalker, WalkConfig};
//!
//! let mut walker = TreeWalker::new(&WalkConfig::new());
//! walker.exclude("target");
//!
//! let mut dirs = Vec::new();
//! walker.dump_directories("/path/to/tree", Depth::Unlimited, true, &mut dirs).unwrap();
//!
//! let mut files = Vec::new();
//! walker.dump_path("/path/to/tree", Depth::Limited(2), &mut files).unwrap();
//! for file in &files {
//!     println!("{} ({} bytes)", file.path(), file.file_size);
//! }
//! ```

mod walker;

pub use walker::TreeWalker;

// Re-export core types for convenience
pub use platio_core::{
    Depth, ExclusionSet, FileInfo, FsError, InternedStr, SharedStringTable, StringTable,
    WalkConfig,
};
