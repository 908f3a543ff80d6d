//! Recursive directory checksums.
//!
//! Reproduces the hash the manifest's `checksumSHA1` field has always
//! recorded: every file under the directory is hashed with SHA-1, the hex
//! digests are sorted, and a final SHA-1 is taken over the concatenated
//! sorted digest strings. Hidden files and directories are included;
//! symlinks are not followed.

use sha1::{Digest, Sha1};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ChecksumError {
    #[error("Failed to walk {0}: {1}")]
    Walk(PathBuf, #[source] walkdir::Error),

    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Checksum task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Compute the recursive SHA-1 content hash of a directory.
pub async fn dirhash_sha1(dir: &Path) -> Result<String, ChecksumError> {
    let root = dir.to_path_buf();
    tokio::task::spawn_blocking(move || dirhash_blocking(&root)).await?
}

fn dirhash_blocking(root: &Path) -> Result<String, ChecksumError> {
    let mut file_hashes = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ChecksumError::Walk(root.to_path_buf(), e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let contents = std::fs::read(entry.path())
            .map_err(|e| ChecksumError::Read(entry.path().to_path_buf(), e))?;
        let mut hasher = Sha1::new();
        hasher.update(&contents);
        file_hashes.push(hex::encode(hasher.finalize()));
    }

    // The final hash is over the sorted per-file digests, so the result is
    // independent of traversal order.
    file_hashes.sort_unstable();
    let mut hasher = Sha1::new();
    for file_hash in &file_hashes {
        hasher.update(file_hash.as_bytes());
    }
    Ok(hex::encode(hasher.finalize()))
}
