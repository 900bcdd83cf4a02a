//! Service layer.
//!
//! - Archive search through a browser (`WebDriverArchive`)
//! - Result card extraction (`CardParser`)
//! - Deck matching rules (`MatchRule`)
//! - File downloads (`HttpFetcher`)
//! - The deck download procedure (`DeckSelector`)

pub mod archive;
pub mod browser;
pub mod cards;
pub mod fetch;
pub mod filter;
pub mod selector;

pub use archive::{ArchiveSearch, WebDriverArchive};
pub use browser::BrowserSession;
pub use cards::CardParser;
pub use fetch::{FileFetcher, HttpFetcher};
pub use filter::MatchRule;
pub use selector::{DeckSelector, DownloadOutcome};
