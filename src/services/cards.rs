// src/services/cards.rs

//! Result card extraction.
//!
//! Parses the archive's rendered result list (page source captured from the
//! browser) into [`SearchResult`] rows using configured CSS selectors.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CardSelectors, SearchResult};
use crate::utils::{last_token, normalize_whitespace, resolve_url};

/// Compiled card selectors.
pub struct CardParser {
    names: CardSelectors,
    card: Selector,
    link: Selector,
    reference: Selector,
    info: Selector,
    published: Selector,
    hash: Selector,
    size: Selector,
}

impl CardParser {
    /// Compile the configured selectors.
    pub fn new(selectors: &CardSelectors) -> Result<Self> {
        Ok(Self {
            card: Self::parse_selector(&selectors.card)?,
            link: Self::parse_selector(&selectors.link)?,
            reference: Self::parse_selector(&selectors.reference)?,
            info: Self::parse_selector(&selectors.info)?,
            published: Self::parse_selector(&selectors.published)?,
            hash: Self::parse_selector(&selectors.hash)?,
            size: Self::parse_selector(&selectors.size)?,
            names: selectors.clone(),
        })
    }

    /// Extract every linked card from a results page, in document order.
    ///
    /// Cards without a download link are skipped. A linked card missing one
    /// of its labelled fields means the markup changed, and fails the whole
    /// page.
    pub fn parse(&self, html: &str, page_url: &Url) -> Result<Vec<SearchResult>> {
        let document = Html::parse_document(html);
        let mut results = Vec::new();

        for (index, card) in document.select(&self.card).enumerate() {
            if let Some(result) = self.parse_card(index, &card, page_url)? {
                results.push(result);
            }
        }
        Ok(results)
    }

    fn parse_card(
        &self,
        index: usize,
        card: &ElementRef,
        page_url: &Url,
    ) -> Result<Option<SearchResult>> {
        let Some(link_elem) = card.select(&self.link).next() else {
            return Ok(None);
        };
        let Some(href) = link_elem.value().attr(&self.names.attr_name) else {
            return Ok(None);
        };
        let Some(link) = resolve_url(page_url, href) else {
            log::debug!("Skipping card {index}: unusable link '{href}'");
            return Ok(None);
        };

        let field = |selector: &Selector, name: &str| -> Result<String> {
            card.select(selector)
                .next()
                .map(|el| element_text(&el))
                .ok_or_else(|| {
                    AppError::scrape(format!("result card {index}"), format!("missing '{name}'"))
                })
        };

        let reference = field(&self.reference, &self.names.reference)?;
        let info = field(&self.info, &self.names.info)?;
        let published = field(&self.published, &self.names.published)?;
        let hash = field(&self.hash, &self.names.hash)?;
        let size = field(&self.size, &self.names.size)?;

        Ok(Some(SearchResult {
            name: element_text(&link_elem),
            reference_date: last_token(&reference).to_string(),
            info,
            link: link.to_string(),
            publish_date: last_token(&published).to_string(),
            content_hash: last_token(&hash).to_string(),
            size: last_token(&size).to_string(),
            description: block_text(card),
        }))
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

/// Text of an element on a single line.
fn element_text(el: &ElementRef) -> String {
    normalize_whitespace(&el.text().collect::<String>())
}

/// Text of an element with one line per non-blank text node, close to what
/// a browser reports for a rendered card.
fn block_text(el: &ElementRef) -> String {
    el.text()
        .map(normalize_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
