//! Selective filesystem operations over a workspace tree.
//!
//! The three primitives the vendor update is built from: listing immediate
//! subdirectories, deleting everything except one entry, and moving
//! everything except a keep-list into a destination. All paths are explicit
//! arguments; destructive actions are logged before they happen.

use crate::git::{self, GitError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum FsOpsError {
    #[error("Failed to list directory {0}: {1}")]
    ListDir(PathBuf, #[source] std::io::Error),

    #[error("Failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Destination already contains {0}")]
    Collision(PathBuf),

    #[error(transparent)]
    Git(#[from] GitError),
}

/// How pruned entries are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneMode {
    /// Plain recursive delete, best effort.
    Plain,
    /// `git rm -r`, fatal on non-zero exit.
    Git,
}

/// List the names of the immediate child directories of `dir`.
///
/// Non-recursive, directories only, sorted lexicographically so every
/// downstream operation (including manifest entry order) is deterministic.
pub async fn list_subdirectories(dir: &Path) -> Result<Vec<String>, FsOpsError> {
    let mut read_dir = fs::read_dir(dir)
        .await
        .map_err(|e| FsOpsError::ListDir(dir.to_path_buf(), e))?;

    let mut names = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| FsOpsError::ListDir(dir.to_path_buf(), e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| FsOpsError::ListDir(dir.to_path_buf(), e))?;
        if file_type.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}

/// Delete every immediate child of `dir` except `keep`.
///
/// `PruneMode::Plain` removes children best effort (a child that fails to
/// delete is logged and skipped); `PruneMode::Git` removes them from the
/// enclosing repository's index and working tree and fails the run on any
/// non-zero git exit.
pub async fn delete_everything_except(
    dir: &Path,
    keep: &str,
    mode: PruneMode,
) -> Result<(), FsOpsError> {
    info!("Traversing {}", dir.display());

    for name in list_subdirectories(dir).await? {
        if name == keep {
            continue;
        }
        let target = dir.join(&name);
        info!("Deleting {}", target.display());
        match mode {
            PruneMode::Plain => {
                if let Err(e) = fs::remove_dir_all(&target).await {
                    warn!("Failed to delete {}: {e}", target.display());
                }
            }
            PruneMode::Git => git::rm_recursive(dir, &target)?,
        }
    }

    Ok(())
}

/// Move every immediate child of `dir` not named in `keep` into `dest`.
///
/// With `git` set, each moved entry is staged for commit in the repository
/// containing `dest`. If `dest` already contains an entry with the same name
/// the move fails with [`FsOpsError::Collision`] before touching that entry;
/// nothing is ever overwritten. The destination directory is created on the
/// first move if it does not exist yet.
pub async fn move_everything_except(
    dir: &Path,
    keep: &[&str],
    dest: &Path,
    git: bool,
) -> Result<(), FsOpsError> {
    info!("Traversing {}", dir.display());

    for name in list_subdirectories(dir).await? {
        if keep.contains(&name.as_str()) {
            continue;
        }
        let from = dir.join(&name);
        let to = dest.join(&name);

        if fs::try_exists(&to).await.unwrap_or(false) {
            return Err(FsOpsError::Collision(to));
        }

        info!("Moving {} to {}", from.display(), to.display());
        fs::create_dir_all(dest).await.map_err(|e| FsOpsError::Move {
            from: from.clone(),
            to: to.clone(),
            source: e,
        })?;
        fs::rename(&from, &to).await.map_err(|e| FsOpsError::Move {
            from: from.clone(),
            to: to.clone(),
            source: e,
        })?;

        if git {
            git::add(dest, &name)?;
        }
    }

    Ok(())
}
