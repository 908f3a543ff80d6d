//! Git integration utilities.
//!
//! Typed wrappers over the `git` CLI for the operations the vendor update
//! needs: tracked removal, staging, and reading the last commit of a
//! directory. Every wrapper takes an explicit path; the process working
//! directory is never changed.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotGitRepository,

    #[error("Failed to execute git command: {0}")]
    CommandError(String),

    #[error("git {0} failed: {1}")]
    ExecutionError(String, String),

    #[error("Git command output was not valid UTF-8")]
    InvalidUtf8,

    #[error("Unexpected git log output: {0}")]
    UnexpectedLogFormat(String),
}

/// The last commit reachable from a directory, as recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full 40-character commit id.
    pub revision: String,

    /// Committer timestamp, RFC 3339 UTC.
    pub revision_time: String,
}

fn git_command(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir)
        // Clear GIT_DIR to avoid being affected by git hooks environment
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE");
    cmd
}

fn run_git(mut cmd: Command, what: &str) -> Result<String, GitError> {
    let output = cmd
        .output()
        .map_err(|e| GitError::CommandError(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("not a git repository") {
            return Err(GitError::NotGitRepository);
        }
        return Err(GitError::ExecutionError(
            what.to_string(),
            stderr.trim().to_string(),
        ));
    }

    String::from_utf8(output.stdout).map_err(|_| GitError::InvalidUtf8)
}

/// Remove a tracked directory recursively (`git rm -r`), scoped to the
/// repository containing `dir`.
pub fn rm_recursive(dir: &Path, target: &Path) -> Result<(), GitError> {
    let mut cmd = git_command(dir);
    cmd.arg("rm").arg("-r").arg("-q").arg(target);
    run_git(cmd, "rm").map(|_| ())
}

/// Stage an entry for commit (`git add`), scoped to the repository
/// containing `dir`.
pub fn add(dir: &Path, pathspec: &str) -> Result<(), GitError> {
    let mut cmd = git_command(dir);
    cmd.arg("add").arg(pathspec);
    run_git(cmd, "add").map(|_| ())
}

/// Read the last commit reachable from `dir`.
///
/// Uses a structured log format (`%H%n%cI`) and validates its shape instead
/// of slicing fixed offsets out of the default `git log` output: the revision
/// must be 40 hex characters and the timestamp must parse as RFC 3339. The
/// timestamp is normalized to UTC.
pub fn last_commit(dir: &Path) -> Result<CommitInfo, GitError> {
    let mut cmd = git_command(dir);
    cmd.args(["log", "-1", "--format=%H%n%cI"]);
    let stdout = run_git(cmd, "log")?;

    let mut lines = stdout.lines();
    let revision = lines
        .next()
        .ok_or_else(|| GitError::UnexpectedLogFormat(stdout.clone()))?
        .trim()
        .to_string();
    let timestamp = lines
        .next()
        .ok_or_else(|| GitError::UnexpectedLogFormat(stdout.clone()))?
        .trim();

    if revision.len() != 40 || !revision.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(GitError::UnexpectedLogFormat(stdout.clone()));
    }

    let parsed = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|_| GitError::UnexpectedLogFormat(stdout.clone()))?;
    let revision_time = parsed
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string();

    Ok(CommitInfo {
        revision,
        revision_time,
    })
}
