// src/services/archive.rs

//! Archive search service.
//!
//! Drives the archive's advanced search through a browser session and
//! scrapes the result cards.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{ArchiveConfig, Config, DateWindow, SearchResult};
use crate::services::browser::{BrowserSession, Target};
use crate::services::cards::CardParser;

/// Source of search results for a query and publication-date window.
#[async_trait]
pub trait ArchiveSearch: Send + Sync {
    /// Return every result published inside `window`, in page order.
    async fn search(&self, query: &str, window: &DateWindow) -> Result<Vec<SearchResult>>;
}

/// Searches the live archive through a WebDriver browser.
pub struct WebDriverArchive {
    config: Arc<Config>,
    cards: CardParser,
}

impl WebDriverArchive {
    /// Create a new archive client, compiling the card selectors up front.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let cards = CardParser::new(&config.selectors.card)?;
        Ok(Self { config, cards })
    }

    async fn run_search(
        &self,
        session: &BrowserSession,
        query: &str,
        window: &DateWindow,
    ) -> Result<Vec<SearchResult>> {
        let archive = &self.config.archive;
        let form = &self.config.selectors.form;

        session.goto(&archive.url).await?;
        session.type_into(Target::Id(&form.keyword_id), query).await?;

        log::debug!("Filtering by publication date {window}");
        session.click(Target::XPath(&form.date_filter_toggle)).await?;
        session
            .click(Target::XPath(&form.publication_date_option))
            .await?;

        session
            .replace_value(Target::Id(&form.start_date_id), &window.start_str())
            .await?;
        session.pause(archive.settle_delay_ms).await;
        session
            .replace_value(Target::Id(&form.end_date_id), &window.end_str())
            .await?;
        session.pause(archive.settle_delay_ms).await;

        session.click(Target::Id(&form.filter_button_id)).await?;
        // The page-size dropdown stays visible while the filtered list loads
        session.pause(archive.filter_delay_ms).await;

        log::debug!("Expanding results to {} per page", archive.page_size);
        session.wait_visible(Target::XPath(&form.page_size_toggle)).await?;
        session.click(Target::XPath(&form.page_size_toggle)).await?;
        session.click(Target::XPath(&form.page_size_option)).await?;
        session.pause(archive.results_delay_ms).await;

        let html = session.source().await?;
        let page_url = session.current_url().await?;
        self.cards.parse(&html, &page_url)
    }
}

#[async_trait]
impl ArchiveSearch for WebDriverArchive {
    async fn search(&self, query: &str, window: &DateWindow) -> Result<Vec<SearchResult>> {
        log::info!("Searching archive for '{query}' published {window}");

        let session = BrowserSession::connect(&self.config.archive).await?;
        let outcome = self.run_search(&session, query, window).await;
        let closed = session.close().await;

        let results = match (outcome, closed) {
            (Ok(results), Ok(())) => results,
            (Ok(_), Err(e)) => return Err(e),
            (Err(e), Ok(())) => return Err(e),
            (Err(e), Err(close_err)) => {
                log::warn!("Failed to close browser session: {close_err}");
                return Err(e);
            }
        };

        log::info!("Archive returned {} result(s)", results.len());
        check_truncation(results, &self.config.archive)
    }
}

/// Flag a result list that filled the whole page; anything past it was not
/// captured.
pub fn check_truncation(
    results: Vec<SearchResult>,
    config: &ArchiveConfig,
) -> Result<Vec<SearchResult>> {
    if results.len() >= config.page_size {
        if config.fail_on_truncation {
            return Err(AppError::Truncated {
                count: results.len(),
            });
        }
        log::warn!(
            "Search returned {} results, the page size limit; later results were not captured. \
             Narrow the date window to be sure nothing is missing.",
            results.len()
        );
    }
    Ok(results)
}
