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

use clap::Parser;
use color_eyre::eyre::Result;
use std::path::PathBuf;
use tracing::info;
use vendor_sync::logging::{self, LogConfig, LOG_FILENAME};
use vendor_sync::update::{run_update, UpdateOptions};

/// Vendor Sync - prunes the Go workspace, refreshes fetched dependencies
/// into the provider's vendor tree, and regenerates vendor.json
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Go workspace root containing src/ (the run fails if neither the flag
    /// nor GOPATH is set)
    #[arg(long, env = "GOPATH")]
    gopath: PathBuf,

    /// Skip go get; only reorganize the tree and regenerate the manifest
    #[arg(long, default_value = "false")]
    no_fetch: bool,

    /// Log the destructive plan without touching the workspace
    #[arg(long, default_value = "false")]
    dry_run: bool,

    /// Enable JSON log format (for log aggregation)
    #[arg(long, env = "VENDOR_SYNC_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "VENDOR_SYNC_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,

    /// Custom log directory (default: ~/.vendor-sync/logs)
    #[arg(long, env = "VENDOR_SYNC_LOG_DIR")]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    // Parse CLI arguments first: a missing GOPATH must fail before any
    // filesystem activity, including log directory creation.
    let args = Args::parse();

    let log_dir = args.log_dir.map(PathBuf::from).unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vendor-sync")
            .join("logs")
    });
    let log_file = log_dir.join(LOG_FILENAME);

    let log_config = LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: logging::parse_rotation(&args.log_rotation),
        ..Default::default()
    };

    if let Err(e) = logging::init_logging(log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!();
        return Err(e);
    }

    let opts = UpdateOptions {
        gopath: args.gopath,
        no_fetch: args.no_fetch,
        dry_run: args.dry_run,
    };

    info!(
        "Updating vendor tree under {} (no_fetch={}, dry_run={})",
        opts.gopath.display(),
        opts.no_fetch,
        opts.dry_run
    );

    if let Err(e) = run_update(&opts).await {
        eprintln!();
        eprintln!("Error: vendor update failed: {e}");
        eprintln!();
        eprintln!("The workspace may be in a mixed state; restore it from version control before retrying.");
        eprintln!("Logs: {}", log_file.display());
        return Err(e.into());
    }

    info!("Vendor update complete");
    Ok(())
}
