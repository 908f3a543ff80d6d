//! The vendor update driver.
//!
//! Runs the fixed sequence over a Go workspace: prune the workspace down to
//! this provider's namespace, prune the existing vendor tree, fetch
//! dependencies, relocate them into the vendor tree, regenerate
//! `vendor.json`, and flatten the one nested vendor tree the provider's
//! largest dependency carries. Every step assumes the previous one
//! succeeded; there is no rollback. A failure partway through leaves the
//! workspace in a mixed state that must be restored from version control.

use crate::fetch::{fetch_dependencies, FetchError};
use crate::fsops::{
    delete_everything_except, list_subdirectories, move_everything_except, FsOpsError, PruneMode,
};
use crate::manifest::{
    generate_entries, write_manifest, ManifestError, VendorManifest, VENDOR_MANIFEST_FILE,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Hosting site every vendored dependency lives under.
pub const SITE_NAME: &str = "github.com";

/// Organization owning the provider.
pub const PROVIDER_ORG: &str = "terraform-providers";

/// The provider repository itself.
pub const PROVIDER_NAME: &str = "terraform-provider-aviatrix";

/// The one organization whose packages stay in the vendor tree across runs.
pub const VENDOR_ORG: &str = "AviatrixSystems";

/// `rootPath` recorded in the manifest.
pub const ROOT_PATH: &str = "github.com/terraform-providers/terraform-provider-aviatrix";

/// Territory prefix for packages vendored inside the nested dependency tree.
const NESTED_TERRITORY: &str = "github.com/hashicorp/terraform/vendor/";

/// Organizations left in place when flattening the nested tree.
const FLATTEN_KEEP_ORGS: [&str; 2] = ["google", "hashicorp"];

/// Projects left in place under `google` when flattening.
const FLATTEN_KEEP_GOOGLE: [&str; 1] = ["go-querystring"];

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error(transparent)]
    FsOps(#[from] FsOpsError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Options for one update run.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Go workspace root (the directory containing `src/`).
    pub gopath: PathBuf,

    /// Skip `go get`; only reorganize and regenerate the manifest.
    pub no_fetch: bool,

    /// Log the destructive plan without touching the workspace.
    pub dry_run: bool,
}

struct WorkspacePaths {
    src: PathBuf,
    site_src: PathBuf,
    project: PathBuf,
    vendor: PathBuf,
    vendor_site: PathBuf,
    nested_vendor: PathBuf,
}

impl WorkspacePaths {
    fn resolve(gopath: &Path) -> Self {
        let src = gopath.join("src");
        let site_src = src.join(SITE_NAME);
        let project = site_src.join(PROVIDER_ORG).join(PROVIDER_NAME);
        let vendor = project.join("vendor");
        let vendor_site = vendor.join(SITE_NAME);
        let nested_vendor = vendor_site.join("hashicorp").join("terraform").join("vendor");
        Self {
            src,
            site_src,
            project,
            vendor,
            vendor_site,
            nested_vendor,
        }
    }
}

/// Run the full update sequence.
pub async fn run_update(opts: &UpdateOptions) -> Result<(), UpdateError> {
    let paths = WorkspacePaths::resolve(&opts.gopath);

    if opts.dry_run {
        log_plan(&paths, opts);
        return Ok(());
    }

    // Prune the Go workspace down to this provider's namespace.
    delete_everything_except(&paths.src, SITE_NAME, PruneMode::Plain).await?;
    delete_everything_except(&paths.site_src, PROVIDER_ORG, PruneMode::Plain).await?;

    // Prune the existing vendor tree (tracked delete, fatal on failure).
    delete_everything_except(&paths.vendor, SITE_NAME, PruneMode::Git).await?;
    delete_everything_except(&paths.vendor_site, VENDOR_ORG, PruneMode::Git).await?;

    if opts.no_fetch {
        info!("Skipping dependency fetch (--no-fetch)");
    } else {
        fetch_dependencies(&paths.project)?;
    }

    // Relocate fetched packages into the vendor tree and stage them.
    move_everything_except(&paths.src, &[SITE_NAME], &paths.vendor, true).await?;
    move_everything_except(&paths.site_src, &[PROVIDER_ORG], &paths.vendor_site, true).await?;

    // Generate manifest entries: primary vendor tree first, then the nested
    // vendor tree with its territory prefix, one pass per site.
    info!("Dependencies");
    info!("------------");
    let mut manifest = VendorManifest::new(ROOT_PATH);
    generate_entries(&paths.vendor_site, &mut manifest, SITE_NAME, None).await?;
    for site in list_subdirectories(&paths.nested_vendor).await? {
        generate_entries(
            &paths.nested_vendor.join(&site),
            &mut manifest,
            &site,
            Some(NESTED_TERRITORY),
        )
        .await?;
    }

    let manifest_path = paths.vendor.join(VENDOR_MANIFEST_FILE);
    write_manifest(&manifest_path, &manifest).await?;
    info!("Wrote {}", manifest_path.display());

    // Flatten the nested vendor tree into the primary one.
    move_everything_except(&paths.nested_vendor, &[SITE_NAME], &paths.vendor, true).await?;
    move_everything_except(
        &paths.nested_vendor.join(SITE_NAME),
        &FLATTEN_KEEP_ORGS,
        &paths.vendor_site,
        true,
    )
    .await?;
    move_everything_except(
        &paths.nested_vendor.join(SITE_NAME).join("google"),
        &FLATTEN_KEEP_GOOGLE,
        &paths.vendor_site.join("google"),
        true,
    )
    .await?;
    move_everything_except(
        &paths.nested_vendor.join(SITE_NAME).join("hashicorp"),
        &[],
        &paths.vendor_site.join("hashicorp"),
        true,
    )
    .await?;

    Ok(())
}

fn log_plan(paths: &WorkspacePaths, opts: &UpdateOptions) {
    info!("Dry run, nothing will be modified");
    info!(
        "Would prune {} keeping {SITE_NAME}",
        paths.src.display()
    );
    info!(
        "Would prune {} keeping {PROVIDER_ORG}",
        paths.site_src.display()
    );
    info!(
        "Would prune {} keeping {SITE_NAME} (git rm)",
        paths.vendor.display()
    );
    info!(
        "Would prune {} keeping {VENDOR_ORG} (git rm)",
        paths.vendor_site.display()
    );
    if opts.no_fetch {
        info!("Would skip dependency fetch (--no-fetch)");
    } else {
        info!("Would run go get in {}", paths.project.display());
    }
    info!(
        "Would move fetched packages from {} into {}",
        paths.src.display(),
        paths.vendor.display()
    );
    info!(
        "Would regenerate {}",
        paths.vendor.join(VENDOR_MANIFEST_FILE).display()
    );
    info!(
        "Would flatten {} into {}",
        paths.nested_vendor.display(),
        paths.vendor.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_paths() {
        let paths = WorkspacePaths::resolve(Path::new("/go"));
        assert_eq!(paths.src, Path::new("/go/src"));
        assert_eq!(
            paths.project,
            Path::new("/go/src/github.com/terraform-providers/terraform-provider-aviatrix")
        );
        assert_eq!(
            paths.nested_vendor,
            Path::new(concat!(
                "/go/src/github.com/terraform-providers/terraform-provider-aviatrix",
                "/vendor/github.com/hashicorp/terraform/vendor"
            ))
        );
    }

    #[test]
    fn test_root_path_matches_project_layout() {
        assert_eq!(
            ROOT_PATH,
            format!("{SITE_NAME}/{PROVIDER_ORG}/{PROVIDER_NAME}")
        );
    }

    #[tokio::test]
    async fn test_dry_run_performs_no_mutation() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let gopath = temp_dir.path().join("go");
        let stray = gopath.join("src").join("bitbucket.org").join("org").join("pkg");
        std::fs::create_dir_all(&stray).unwrap();

        let opts = UpdateOptions {
            gopath: gopath.clone(),
            no_fetch: true,
            dry_run: true,
        };
        run_update(&opts).await.unwrap();

        assert!(stray.exists(), "dry run must not delete anything");
        assert!(!gopath
            .join("src")
            .join(SITE_NAME)
            .exists());
    }
}
