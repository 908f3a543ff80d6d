//! The `vendor.json` manifest: data model, entry generation, serialization.

mod types;

pub use types::{PackageEntry, VendorManifest};

use crate::checksum::{dirhash_sha1, ChecksumError};
use crate::fsops::{list_subdirectories, FsOpsError};
use crate::git::{self, GitError};
use crate::utils::atomic_write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Manifest filename inside the vendor tree.
pub const VENDOR_MANIFEST_FILE: &str = "vendor.json";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to write manifest: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize manifest: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error(transparent)]
    FsOps(#[from] FsOpsError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Checksum(#[from] ChecksumError),
}

/// Append one manifest entry per (organization, project) leaf under
/// `scan_root`.
///
/// For each leaf the last reachable commit supplies `revision` and
/// `revisionTime`, the recursive SHA-1 directory hash supplies
/// `checksumSHA1`, and `path` is `site_name/organization/project`. When an
/// `origin_territory` is given, `origin` is the territory prefix followed by
/// the path; otherwise `origin` equals the path. Organizations and projects
/// are visited in sorted listing order.
pub async fn generate_entries(
    scan_root: &Path,
    manifest: &mut VendorManifest,
    site_name: &str,
    origin_territory: Option<&str>,
) -> Result<(), ManifestError> {
    for org in list_subdirectories(scan_root).await? {
        let org_dir = scan_root.join(&org);
        for project in list_subdirectories(&org_dir).await? {
            let leaf = org_dir.join(&project);

            let commit = git::last_commit(&leaf)?;
            let checksum = dirhash_sha1(&leaf).await?;

            let path = format!("{site_name}/{org}/{project}");
            info!("{path}");

            let origin = match origin_territory {
                Some(territory) => format!("{territory}{path}"),
                None => path.clone(),
            };

            manifest.package.push(PackageEntry {
                checksum_sha1: checksum,
                origin,
                path,
                revision: commit.revision,
                revision_time: commit.revision_time,
            });
        }
    }

    Ok(())
}

/// Serialize the manifest as pretty-printed JSON and write it atomically.
pub async fn write_manifest(path: &Path, manifest: &VendorManifest) -> Result<(), ManifestError> {
    let content = serde_json::to_string_pretty(manifest)?;
    atomic_write(path, &content).await?;
    Ok(())
}
