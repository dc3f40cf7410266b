//! Artifact checksum calculation.
//!
//! Hashes the files Squirrel leaves in the output directory so callers can
//! report and verify them.

use crate::bundler::{Result, error::ErrorExt};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// A file produced by the installer build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerArtifact {
    /// Path to the file
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256
    pub checksum: String,
}

/// Calculates the SHA-256 of a file, reading it in 8KB chunks.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the file cannot be read
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Describes every regular file directly inside `output_dir`, sorted by path.
///
/// Subdirectories are skipped; Squirrel writes a flat release directory.
pub async fn collect_artifacts(output_dir: &Path) -> Result<Vec<InstallerArtifact>> {
    let mut entries = tokio::fs::read_dir(output_dir)
        .await
        .fs_context("reading output directory", output_dir)?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading output directory", output_dir)?
    {
        let file_type = entry
            .file_type()
            .await
            .fs_context("reading artifact metadata", entry.path())?;
        if file_type.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut artifacts = Vec::with_capacity(paths.len());
    for path in paths {
        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;
        artifacts.push(InstallerArtifact {
            path,
            size,
            checksum,
        });
    }

    Ok(artifacts)
}
