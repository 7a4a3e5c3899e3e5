//! Recursive directory path creation.

use std::fs::DirBuilder;

use platio_core::FsError;
use platio_core::path;

/// Make sure `path` exists, creating missing ancestor directories first.
///
/// A trailing `/` marks `path` itself as a directory to create; without it
/// only the ancestors are ensured, so `create_path("out/log.txt")` prepares
/// `out/` for a later write. Anything already at `path` (of any type)
/// counts as success. The first directory that cannot be created aborts the
/// whole chain.
pub fn create_path(path: &str) -> Result<(), FsError> {
    if path.is_empty() {
        return Err(FsError::invalid_path(path, "path is empty"));
    }
    if std::fs::metadata(path).is_ok() {
        return Ok(());
    }

    if let Some(parent) = path::parent_directory(path) {
        create_path(parent)?;
    }

    if path::is_directory_path(path) {
        make_directory(path)?;
    }
    Ok(())
}

/// Create one directory, writable by everyone the umask allows, since the
/// install location may be shared.
fn make_directory(path: &str) -> Result<(), FsError> {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(path).map_err(|e| FsError::io(path, e))?;
    tracing::debug!(path, "created directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dir_path(temp: &TempDir, rel: &str) -> String {
        format!("{}/{rel}", temp.path().display())
    }

    #[test]
    fn test_creates_nested_directories() {
        let temp = TempDir::new().unwrap();
        let target = dir_path(&temp, "a/b/c/");

        create_path(&target).unwrap();

        assert!(temp.path().join("a").is_dir());
        assert!(temp.path().join("a/b").is_dir());
        assert!(temp.path().join("a/b/c").is_dir());
    }

    #[test]
    fn test_existing_path_is_success() {
        let temp = TempDir::new().unwrap();
        let target = dir_path(&temp, "a/b/");

        create_path(&target).unwrap();
        fs::write(temp.path().join("a/b/keep.txt"), "keep").unwrap();
        create_path(&target).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("a/b/keep.txt")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn test_file_path_creates_only_parents() {
        let temp = TempDir::new().unwrap();
        let target = dir_path(&temp, "out/logs/today.txt");

        create_path(&target).unwrap();

        assert!(temp.path().join("out/logs").is_dir());
        assert!(!temp.path().join("out/logs/today.txt").exists());
    }

    #[test]
    fn test_existing_file_counts_as_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("plain"), "x").unwrap();

        create_path(&dir_path(&temp, "plain")).unwrap();
        assert!(temp.path().join("plain").is_file());
    }

    #[test]
    fn test_failure_propagates() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("blocker"), "x").unwrap();

        let result = create_path(&dir_path(&temp, "blocker/child/"));
        assert!(result.is_err());
        assert!(!temp.path().join("blocker/child").exists());
    }

    #[test]
    fn test_empty_path_is_invalid() {
        assert!(matches!(
            create_path(""),
            Err(FsError::InvalidPath { .. })
        ));
    }
}
