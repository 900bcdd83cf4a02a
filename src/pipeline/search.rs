// src/pipeline/search.rs

//! Raw archive search, without deck filtering.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, PeriodSpec, SearchResult};
use crate::services::{ArchiveSearch, WebDriverArchive};
use crate::utils::report;

/// Search the archive and optionally save the rows as JSON.
pub async fn run_search(
    config: &Config,
    query: &str,
    period: &PeriodSpec,
    output: Option<&Path>,
) -> Result<Vec<SearchResult>> {
    let resolved = period.resolve()?;
    report::header(&format!("Searching '{query}' ({})", resolved.window));

    let archive = WebDriverArchive::new(Arc::new(config.clone()))?;
    let results = archive.search(query, &resolved.window).await?;

    for result in &results {
        report::sub_item(&format!(
            "[{}] {} | {} | {}",
            result.reference_date, result.name, result.info, result.size
        ));
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&results)?;
        tokio::fs::write(path, json).await?;
        report::success(&format!(
            "Saved {} result(s) to {}",
            results.len(),
            path.display()
        ));
    }

    Ok(results)
}
