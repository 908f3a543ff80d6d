#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

/// Run a git subcommand in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .status()
        .expect("git should run");
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

/// Initialize a repository with a test identity and signing disabled.
pub fn init_repo(dir: &Path) {
    std::fs::create_dir_all(dir).expect("Should create repo dir");
    git(dir, &["init", "-q"]);
    git(dir, &["config", "user.email", "tests@example.com"]);
    git(dir, &["config", "user.name", "Tests"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

/// Stage everything and commit with a fixed author/committer date.
pub fn commit_all(dir: &Path, message: &str, date: &str) {
    git(dir, &["add", "-A"]);
    let status = Command::new("git")
        .args(["commit", "-q", "-m", message])
        .current_dir(dir)
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .status()
        .expect("git commit should run");
    assert!(status.success(), "git commit failed in {}", dir.display());
}

/// Current HEAD commit id of the repository at `dir`.
pub fn head_revision(dir: &Path) -> String {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .output()
        .expect("git rev-parse should run");
    assert!(output.status.success());
    String::from_utf8(output.stdout)
        .expect("revision should be UTF-8")
        .trim()
        .to_string()
}

/// Write a file, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Should create parent dirs");
    }
    std::fs::write(path, contents).expect("Should write file");
}

/// Names of the immediate child directories of `dir`, sorted.
pub fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Should read dir")
        .filter_map(|entry| {
            let entry = entry.expect("Should read entry");
            entry
                .file_type()
                .expect("Should stat entry")
                .is_dir()
                .then(|| entry.file_name().to_string_lossy().into_owned())
        })
        .collect();
    names.sort();
    names
}
