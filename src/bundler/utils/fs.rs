//! File system utilities for installer builds.
//!
//! Thin async wrappers that attach the offending path to every I/O error.

use crate::{
    bail,
    bundler::error::{ErrorExt, Result},
};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Prefix of the per-run working directory holding the manifest and nupkg.
pub const TEMP_DIR_PREFIX: &str = "squirrel-installer-";

/// Copies a regular file, replacing `to` if it already exists and creating
/// its parent directory as needed.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::metadata(from)
        .await
        .fs_context("reading source file", from)?;
    if !metadata.is_file() {
        bail!("{} is not a file", from.display());
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    Ok(())
}

/// Writes `content` to `path`, truncating any existing file.
pub async fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .await
        .fs_context("writing file", path)
}

/// Renames `from` to `to`, replacing `to` if it exists.
pub async fn rename_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await.fs_context("renaming file", from)
}

/// Creates a uniquely named directory under the system temp dir.
///
/// The directory is left on disk: its contents are run artifacts the caller
/// may want to inspect.
pub fn create_temp_dir() -> Result<PathBuf> {
    let dir = tempfile::Builder::new()
        .prefix(TEMP_DIR_PREFIX)
        .tempdir()
        .fs_context("creating temporary directory", std::env::temp_dir())?;
    Ok(dir.keep())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copy_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("Update.exe");
        let dst = dir.path().join("app").join("Update.exe");
        std::fs::write(&src, b"new").unwrap();
        std::fs::create_dir_all(dst.parent().unwrap()).unwrap();
        std::fs::write(&dst, b"old").unwrap();

        copy_file(&src, &dst).await.unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_copy_file_rejects_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_file(&dir.path().join("missing"), &dir.path().join("out"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::bundler::ErrorKind::Filesystem);
    }

    #[tokio::test]
    async fn test_copy_file_rejects_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_file(dir.path(), &dir.path().join("out")).await.unwrap_err();
        assert!(matches!(err, crate::bundler::Error::GenericError(ref m) if m.ends_with("is not a file")));
    }

    #[tokio::test]
    async fn test_rename_missing_file_is_fs_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = rename_file(&dir.path().join("Setup.exe"), &dir.path().join("AppSetup.exe"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::bundler::ErrorKind::Filesystem);
    }

    #[test]
    fn test_temp_dirs_are_unique() {
        let a = create_temp_dir().unwrap();
        let b = create_temp_dir().unwrap();
        assert_ne!(a, b);
        assert!(a.is_dir() && b.is_dir());
        assert!(
            a.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(TEMP_DIR_PREFIX)
        );
        std::fs::remove_dir_all(a).unwrap();
        std::fs::remove_dir_all(b).unwrap();
    }
}
