pub mod analysis;
pub mod batch;
pub mod models;
pub mod page;
pub mod pipeline;
pub mod sensing;
pub mod settings;
pub mod site_type;
pub mod utils;

pub use analysis::{ExtractorConfig, ValidationReport};
pub use batch::{extract_capture, extract_many};
pub use models::{DesignSchema, SignalSet};
pub use page::{PageCapture, PageView, SnapshotPage};
pub use pipeline::{extract, Extraction};
pub use site_type::SiteType;

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

const ENABLE_LOGS: bool = true;

/// Extract every capture named on the command line and print one JSON
/// record per line (or per block when pretty output is on) to stdout.
///
/// Exits with an error when any capture failed, after printing the rest.
pub async fn run() -> Result<()> {
    utils::init_logging();

    let config = settings::config_from_env()?;
    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        bail!("usage: design-extractor <capture.json>...");
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log_warn!("interrupt received, cancelling outstanding captures");
            ctrl_c.cancel();
        }
    });

    let pretty = config.pretty_output;
    let results = extract_many(paths, config, cancel).await;

    let mut failed = 0usize;
    for (path, result) in results {
        match result {
            Ok(extraction) => {
                let text = if pretty {
                    serde_json::to_string_pretty(&extraction.record)
                } else {
                    serde_json::to_string(&extraction.record)
                }
                .with_context(|| format!("Failed to serialize record for {}", path.display()))?;
                println!("{text}");
            }
            Err(_) => failed += 1,
        }
    }

    if failed > 0 {
        bail!("{failed} capture(s) could not be extracted");
    }
    Ok(())
}
