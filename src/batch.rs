//! Concurrent extraction over independent page captures.
//!
//! Pages share nothing, so each capture runs on its own blocking task under a
//! per-page timeout.

use anyhow::{anyhow, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::analysis::ExtractorConfig;
use crate::page::PageCapture;
use crate::pipeline::{extract, Extraction};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// Load one capture file and run the pipeline over it.
pub fn extract_capture(path: &Path, config: &ExtractorConfig) -> Result<Extraction> {
    let capture = PageCapture::load(path)?;
    let (signals, page) = capture.into_inputs(config);
    extract(&signals, &page, config, Utc::now())
}

/// Extract every capture concurrently. Results come back in input order;
/// captures not finished when `cancel` fires report an error.
pub async fn extract_many(
    paths: Vec<PathBuf>,
    config: ExtractorConfig,
    cancel: CancellationToken,
) -> Vec<(PathBuf, Result<Extraction>)> {
    let config = Arc::new(config);
    let timeout = Duration::from_secs(config.capture_timeout_secs);
    let mut tasks = JoinSet::new();

    for (index, path) in paths.iter().cloned().enumerate() {
        if cancel.is_cancelled() {
            break;
        }
        let config = Arc::clone(&config);
        tasks.spawn(async move {
            let job = tokio::task::spawn_blocking(move || extract_capture(&path, &config));
            let result = match tokio::time::timeout(timeout, job).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_err)) => Err(anyhow!("extraction task failed: {join_err}")),
                Err(_) => Err(anyhow!(
                    "extraction timed out after {}s",
                    timeout.as_secs()
                )),
            };
            (index, result)
        });
    }

    let mut finished: Vec<Option<Result<Extraction>>> = paths.iter().map(|_| None).collect();
    loop {
        tokio::select! {
            joined = tasks.join_next() => match joined {
                Some(Ok((index, result))) => finished[index] = Some(result),
                Some(Err(err)) => log_error!("batch task aborted: {err}"),
                None => break,
            },
            _ = cancel.cancelled() => {
                log_warn!("batch cancelled with {} captures outstanding", tasks.len());
                tasks.abort_all();
                break;
            }
        }
    }

    paths
        .into_iter()
        .zip(finished)
        .map(|(path, result)| {
            let result = result.unwrap_or_else(|| Err(anyhow!("extraction cancelled")));
            match &result {
                Ok(extraction) => log_info!(
                    "{}: {} keywords, validation {}",
                    path.display(),
                    extraction.schema.style_keywords().len(),
                    if extraction.validation.valid { "passed" } else { "failed" }
                ),
                Err(err) => log_error!("{}: {err:#}", path.display()),
            }
            (path, result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn write_capture(dir: &Path, name: &str, url: &str) -> PathBuf {
        let path = dir.join(name);
        let capture = json!({ "source_url": url, "pixel_colors": ["#223344"] });
        fs::write(&path, capture.to_string()).unwrap();
        path
    }

    #[tokio::test]
    async fn results_follow_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_capture(dir.path(), "a.json", "https://a.example.com");
        let missing = dir.path().join("missing.json");
        let second = write_capture(dir.path(), "b.json", "https://b.example.com");

        let results = extract_many(
            vec![first.clone(), missing.clone(), second.clone()],
            ExtractorConfig::default(),
            CancellationToken::new(),
        )
        .await;

        let paths: Vec<&PathBuf> = results.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec![&first, &missing, &second]);

        let first_url = &results[0].1.as_ref().unwrap().schema.metadata().source_url;
        assert_eq!(first_url, "https://a.example.com");
        assert!(results[1].1.is_err());
        assert_eq!(
            results[2].1.as_ref().unwrap().schema.colors().palette[0],
            "#223344"
        );
    }

    #[tokio::test]
    async fn cancelled_batch_reports_every_capture() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(dir.path(), "a.json", "https://a.example.com");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let results = extract_many(vec![path], ExtractorConfig::default(), cancel).await;

        assert_eq!(results.len(), 1);
        let err = results[0].1.as_ref().unwrap_err();
        assert_eq!(err.to_string(), "extraction cancelled");
    }
}
