// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result
    )
)]

pub mod checksum;
pub mod fetch;
pub mod fsops;
pub mod git;
pub mod logging;
pub mod manifest;
pub mod update;
pub mod utils;

// Re-export commonly used types
pub use checksum::{dirhash_sha1, ChecksumError};
pub use fetch::{fetch_dependencies, FetchError};
pub use fsops::{
    delete_everything_except, list_subdirectories, move_everything_except, FsOpsError, PruneMode,
};
pub use git::{CommitInfo, GitError};
pub use manifest::{
    generate_entries, write_manifest, ManifestError, PackageEntry, VendorManifest,
    VENDOR_MANIFEST_FILE,
};
pub use update::{run_update, UpdateError, UpdateOptions};
