//! Path building and normalization.
//!
//! Paths are handled as `/`-separated strings, the form every result of the
//! walker takes. A trailing separator marks a directory path.

/// Path separator.
pub const SEPARATOR: char = '/';

/// Paths longer than this are still used but logged as suspicious.
pub const LONG_PATH_WARN_LEN: usize = 2048;

/// Strip trailing separators. A path made only of separators becomes `/`.
pub fn trim_trailing_separator(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() && !path.is_empty() {
        &path[..1]
    } else {
        trimmed
    }
}

/// Join a name onto a base path with exactly one separator between them.
///
/// An empty base yields the name unchanged, which is how root-relative
/// paths are built.
pub fn join(base: &str, name: &str) -> String {
    if base.is_empty() {
        return name.to_string();
    }
    let mut joined = String::with_capacity(base.len() + name.len() + 1);
    joined.push_str(base);
    if !base.ends_with(SEPARATOR) {
        joined.push(SEPARATOR);
    }
    joined.push_str(name);
    joined
}

/// Check if the path is marked as a directory by a trailing separator.
pub fn is_directory_path(path: &str) -> bool {
    path.len() > 1 && path.ends_with(SEPARATOR)
}

/// Parent of `path`, keeping its trailing separator.
///
/// `None` when the (trimmed) path has no separator besides a leading one,
/// e.g. `"name"` or `"/name"`.
pub fn parent_directory(path: &str) -> Option<&str> {
    let trimmed = trim_trailing_separator(path);
    match trimmed.rfind(SEPARATOR) {
        Some(0) | None => None,
        Some(idx) => Some(&trimmed[..=idx]),
    }
}

/// Final component of a path, ignoring trailing separators.
pub fn base_name(path: &str) -> &str {
    let trimmed = trim_trailing_separator(path);
    match trimmed.rfind(SEPARATOR) {
        Some(idx) if trimmed.len() > 1 => &trimmed[idx + 1..],
        _ => trimmed,
    }
}

/// Log a warning for overlong paths. Never fails.
pub fn warn_if_long(operation: &'static str, path: &str) {
    if path.len() > LONG_PATH_WARN_LEN {
        tracing::warn!(operation, len = path.len(), "path length is pretty long");
    }
}
