// src/models/mod.rs

//! Domain models for archive search and deck downloads.

mod config;
mod deck;
pub mod period;
mod search_result;
mod selectors;

// Re-export all public types
pub use config::{ArchiveConfig, Config, DownloadConfig, LoggingConfig};
pub use deck::{Deck, DeckPreset, DeckSpec};
pub use period::{DateWindow, PeriodSpec, ResolvedPeriod};
pub use search_result::SearchResult;
pub use selectors::{ArchiveSelectors, CardSelectors, FormSelectors};

/// A resolved (period, deck) pair handed to the deck selector.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub period: PeriodSpec,
    pub deck: DeckSpec,
}

impl DownloadRequest {
    pub fn new(period: PeriodSpec, deck: impl Into<DeckSpec>) -> Self {
        Self {
            period,
            deck: deck.into(),
        }
    }
}
