//! Dependency fetch via the Go toolchain.
//!
//! Wraps `go get` the same way the git wrappers wrap the git CLI: the binary
//! is located first, the command runs in an explicit working directory, and
//! a non-zero exit becomes a typed error.

use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("go binary not found in PATH")]
    BinaryNotFound,

    #[error("Failed to execute go get: {0}")]
    CommandError(String),

    #[error("go get failed: {0}")]
    ExecutionError(String),
}

/// Run `go get` in the project directory to refresh `$GOPATH/src`.
pub fn fetch_dependencies(project_dir: &Path) -> Result<(), FetchError> {
    let go = which::which("go").map_err(|_| FetchError::BinaryNotFound)?;

    info!("Obtaining latest dependencies using go get");
    let output = Command::new(go)
        .arg("get")
        .current_dir(project_dir)
        .output()
        .map_err(|e| FetchError::CommandError(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FetchError::ExecutionError(stderr.trim().to_string()));
    }

    Ok(())
}
