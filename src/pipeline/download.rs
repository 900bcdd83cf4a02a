// src/pipeline/download.rs

//! Deck download pipeline.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, DownloadRequest};
use crate::services::{DeckSelector, DownloadOutcome, HttpFetcher, WebDriverArchive};
use crate::utils::report;

/// Download one deck for one period into `destination`.
pub async fn run_download(
    config: &Config,
    request: &DownloadRequest,
    destination: &Path,
) -> Result<DownloadOutcome> {
    let start_time = Utc::now();
    report::header(&format!(
        "Downloading {} for {}",
        request.deck.key, request.period
    ));

    let archive = WebDriverArchive::new(Arc::new(config.clone()))?;
    let fetcher = HttpFetcher::new(&config.download)?;
    let selector =
        DeckSelector::new(&archive, &fetcher).verify_sha256(config.download.verify_sha256);

    let outcome = selector.download(request, destination).await?;

    let elapsed = Utc::now() - start_time;
    report::summary(
        "Download",
        &[
            ("Deck", request.deck.key.clone()),
            ("Results found", outcome.found.to_string()),
            ("Matched", outcome.matched.to_string()),
            ("Files written", outcome.files.len().to_string()),
            ("Destination", destination.display().to_string()),
            ("Elapsed", format!("{}s", elapsed.num_seconds())),
        ],
    );
    if outcome.matched == 0 {
        log::warn!(
            "No results matched {} for {}",
            request.deck.key,
            request.period
        );
    }

    Ok(outcome)
}
