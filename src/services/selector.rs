// src/services/selector.rs

//! Deck selector service.
//!
//! Resolves a period, searches the archive for a deck, keeps the rows that
//! match the deck's rule and downloads each of them into a folder.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::models::{DownloadRequest, SearchResult};
use crate::services::archive::ArchiveSearch;
use crate::services::fetch::FileFetcher;
use crate::services::filter::MatchRule;
use crate::storage::LocalStorage;
use crate::utils::report;

/// Summary of a download run.
#[derive(Debug, Default)]
pub struct DownloadOutcome {
    /// Rows returned by the archive
    pub found: usize,
    /// Rows kept by the deck's rule
    pub matched: usize,
    /// Files written, in download order
    pub files: Vec<PathBuf>,
}

/// Downloads the files of one deck for one period.
pub struct DeckSelector<'a> {
    archive: &'a dyn ArchiveSearch,
    fetcher: &'a dyn FileFetcher,
    verify_sha256: bool,
}

impl<'a> DeckSelector<'a> {
    pub fn new(archive: &'a dyn ArchiveSearch, fetcher: &'a dyn FileFetcher) -> Self {
        Self {
            archive,
            fetcher,
            verify_sha256: false,
        }
    }

    /// Check each body against the SHA-256 published on its card.
    pub fn verify_sha256(mut self, enabled: bool) -> Self {
        self.verify_sha256 = enabled;
        self
    }

    /// Run the whole procedure. The first failed download aborts the rest
    /// of the batch; files already written stay on disk.
    pub async fn download(
        &self,
        request: &DownloadRequest,
        destination: &Path,
    ) -> Result<DownloadOutcome> {
        let deck = &request.deck;
        let period = request.period.resolve()?;

        let storage = LocalStorage::new(destination);
        storage.ensure_exists().await?;

        report::step(1, 3, &format!("Search - '{}' in {}", deck.search_text, period.window));
        let rows = self.archive.search(&deck.search_text, &period.window).await?;

        report::step(2, 3, &format!("Filter - {} row(s) for {}", rows.len(), deck.key));
        let mut outcome = DownloadOutcome {
            found: rows.len(),
            ..DownloadOutcome::default()
        };
        let rule = MatchRule::for_deck(deck, period.month);
        log::debug!("Match rule: {rule:?}");
        let selected = rule.apply(rows);
        outcome.matched = selected.len();

        report::step(3, 3, &format!("Download - {} file(s)", selected.len()));
        for row in &selected {
            let file_name = row.file_name()?;
            report::sub_item(&format!("{file_name} <- {}", row.link));

            let bytes = self.fetcher.fetch(&row.link).await?;
            if self.verify_sha256 {
                verify_sha256(row, &file_name, &bytes)?;
            }
            let path = storage.write_bytes(&file_name, &bytes).await?;
            log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
            outcome.files.push(path);
        }

        Ok(outcome)
    }
}

/// Compare a body with the card's hash when the card shows a SHA-256.
fn verify_sha256(row: &SearchResult, file_name: &str, bytes: &[u8]) -> Result<()> {
    let expected = row.content_hash.trim();
    if expected.len() != 64 || !expected.chars().all(|c| c.is_ascii_hexdigit()) {
        log::debug!("Card hash for {file_name} is not a SHA-256 digest; not checked");
        return Ok(());
    }

    let actual = hex::encode(Sha256::digest(bytes));
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(AppError::HashMismatch {
            file: file_name.to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_hash(hash: &str) -> SearchResult {
        SearchResult {
            name: "Deck".to_string(),
            reference_date: "01/2023".to_string(),
            info: String::new(),
            link: "https://example.com/deck.zip".to_string(),
            publish_date: String::new(),
            content_hash: hash.to_string(),
            size: String::new(),
            description: String::new(),
        }
    }

    // sha256("hello")
    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    #[test]
    fn test_sha256_match() {
        let row = row_with_hash(&HELLO_SHA256.to_uppercase());
        assert!(verify_sha256(&row, "deck.zip", b"hello").is_ok());
    }

    #[test]
    fn test_sha256_mismatch() {
        let row = row_with_hash(HELLO_SHA256);
        assert!(matches!(
            verify_sha256(&row, "deck.zip", b"goodbye"),
            Err(AppError::HashMismatch { .. })
        ));
    }

    #[test]
    fn test_non_sha256_hash_is_not_checked() {
        let row = row_with_hash("d41d8cd98f00b204e9800998ecf8427e");
        assert!(verify_sha256(&row, "deck.zip", b"anything").is_ok());
    }
}
