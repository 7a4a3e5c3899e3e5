//! Depth-first directory walker built on `walkdir`.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use platio_core::path;
use platio_core::{
    Depth, ExclusionSet, FileInfo, FsError, InternedStr, SharedStringTable, StringTable,
    WalkConfig,
};
use walkdir::{DirEntry, WalkDir};

/// Depth-first directory walker with name exclusions.
///
/// Each walker owns its exclusion set, so walkers built from different
/// configurations never see each other's exclusions.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    exclusions: ExclusionSet,
    strings: Arc<dyn StringTable>,
    default_depth: Depth,
}

impl TreeWalker {
    /// Create a walker interning into the process-wide string table.
    pub fn new(config: &WalkConfig) -> Self {
        Self::with_string_table(config, SharedStringTable::global())
    }

    /// Create a walker interning into `strings`.
    pub fn with_string_table(config: &WalkConfig, strings: Arc<dyn StringTable>) -> Self {
        Self {
            exclusions: config.exclusion_set(),
            strings,
            default_depth: config.default_depth,
        }
    }

    /// Exclude a directory name from every later walk.
    pub fn exclude(&mut self, name: &str) -> bool {
        self.exclusions.add(name)
    }

    /// Check if a directory base name is excluded.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclusions.contains(name)
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Depth from the configuration this walker was built with.
    pub fn default_depth(&self) -> Depth {
        self.default_depth
    }

    /// Append every directory under `root` to `out`, parents before
    /// children.
    ///
    /// With `include_root` the root itself comes first and every path is
    /// prefixed by it; without, paths are relative to the root. Depth 0
    /// lists nothing below the root.
    ///
    /// Fails only if `root` cannot be listed. A nested directory that
    /// cannot be listed is reported and treated as having no
    /// subdirectories.
    pub fn dump_directories(
        &self,
        root: &str,
        depth: Depth,
        include_root: bool,
        out: &mut Vec<InternedStr>,
    ) -> Result<(), FsError> {
        let root = path::trim_trailing_separator(root);
        if include_root {
            out.push(self.strings.intern(root));
        }

        for entry in self.walk(root, max_depth(depth, 0)) {
            let Some(entry) = accept(root, entry)? else {
                continue;
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            let listed = if include_root {
                entry.path().to_string_lossy()
            } else {
                relative_to(root, entry.path())
            };
            out.push(self.strings.intern(&listed));
        }

        Ok(())
    }

    /// Append a [`FileInfo`] for every non-directory entry under `root` to
    /// `out`.
    ///
    /// Directories are descended under the same depth and exclusion rules
    /// as [`dump_directories`](Self::dump_directories) but are not
    /// reported. Depth 0 reports the root's own files only. Entries whose
    /// size cannot be read are reported with size 0.
    pub fn dump_path(&self, root: &str, depth: Depth, out: &mut Vec<FileInfo>) -> Result<(), FsError> {
        let root = path::trim_trailing_separator(root);

        for entry in self.walk(root, max_depth(depth, 1)) {
            let Some(entry) = accept(root, entry)? else {
                continue;
            };
            if entry.file_type().is_dir() {
                continue;
            }

            let file_size = match fs::metadata(entry.path()) {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    tracing::debug!(path = %entry.path().display(), error = %err, "size unavailable");
                    0
                }
            };
            let dir = entry
                .path()
                .parent()
                .map_or(Cow::Borrowed(root), Path::to_string_lossy);
            out.push(FileInfo {
                full_path: self.strings.intern(&dir),
                file_name: self.strings.intern(&entry.file_name().to_string_lossy()),
                file_size,
            });
        }

        Ok(())
    }

    /// Check if `path` has at least one subdirectory that is not excluded.
    /// False if `path` cannot be listed.
    pub fn has_sub_directory(&self, path: &str) -> bool {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!(path, error = %err, "cannot list directory");
                    None
                }
            })
            .any(|entry| entry.file_type().is_dir() && !self.is_excluded_entry(&entry))
    }

    /// Pre-order walk of `root` that never yields or enters an excluded
    /// directory. The root is always yielded, at depth 0.
    fn walk<'a>(
        &'a self,
        root: &str,
        max_depth: usize,
    ) -> impl Iterator<Item = walkdir::Result<DirEntry>> + 'a {
        WalkDir::new(root)
            .follow_links(false)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || !self.is_excluded_entry(entry))
    }

    fn is_excluded_entry(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclusions.contains(name))
    }
}

/// Sort a walk item into "use it", "skip it" or "the walk failed".
///
/// Anything wrong with the root itself fails the walk. Failures below the
/// root are logged and skipped.
fn accept(root: &str, entry: walkdir::Result<DirEntry>) -> Result<Option<DirEntry>, FsError> {
    match entry {
        Ok(entry) if entry.depth() == 0 => {
            if entry.file_type().is_dir() {
                Ok(None)
            } else {
                Err(FsError::NotADirectory { path: root.into() })
            }
        }
        Ok(entry) => Ok(Some(entry)),
        Err(err) if err.depth() == 0 => Err(FsError::io(root, err.into())),
        Err(err) => {
            let path = err.path().map(Path::display);
            tracing::warn!(path = ?path, error = %err, "cannot list directory, skipping");
            Ok(None)
        }
    }
}

/// Maximum `walkdir` depth for a budget, plus `extra` levels of entries
/// read from the deepest listed directories.
fn max_depth(depth: Depth, extra: usize) -> usize {
    match depth {
        Depth::Unlimited => usize::MAX,
        Depth::Limited(levels) => usize::try_from(levels)
            .unwrap_or(usize::MAX)
            .saturating_add(extra),
    }
}

fn relative_to<'a>(root: &str, entry: &'a Path) -> Cow<'a, str> {
    entry.strip_prefix(root).unwrap_or(entry).to_string_lossy()
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new(&WalkConfig::default())
    }
}
