//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ArchiveSelectors, Deck, DeckSpec};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Browser session and search form behavior
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// File download settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Archive page locators
    #[serde(default)]
    pub selectors: ArchiveSelectors,

    /// Decks declared in addition to the built-in presets
    #[serde(default)]
    pub decks: Vec<DeckSpec>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.archive.url)
            .map_err(|e| AppError::validation(format!("archive.url is invalid: {e}")))?;
        Url::parse(&self.archive.webdriver_url)
            .map_err(|e| AppError::validation(format!("archive.webdriver_url is invalid: {e}")))?;
        if self.archive.wait_timeout_secs == 0 {
            return Err(AppError::validation("archive.wait_timeout_secs must be > 0"));
        }
        if self.archive.page_size == 0 {
            return Err(AppError::validation("archive.page_size must be > 0"));
        }
        if self.download.user_agent.trim().is_empty() {
            return Err(AppError::validation("download.user_agent is empty"));
        }
        if self.download.timeout_secs == 0 {
            return Err(AppError::validation("download.timeout_secs must be > 0"));
        }

        for (field, selector) in self.selectors.card.named() {
            Selector::parse(selector)
                .map_err(|e| AppError::selector(selector, format!("{field}: {e:?}")))?;
        }

        let mut keys = HashSet::new();
        for deck in &self.decks {
            if deck.key.trim().is_empty() {
                return Err(AppError::validation("decks: key is empty"));
            }
            if deck.search_text.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "decks.{}: search_text is empty",
                    deck.key
                )));
            }
            if Deck::find(&deck.key).is_some() {
                return Err(AppError::validation(format!(
                    "decks.{}: key collides with a built-in deck",
                    deck.key
                )));
            }
            if !keys.insert(deck.key.to_lowercase()) {
                return Err(AppError::validation(format!(
                    "decks.{}: duplicate key",
                    deck.key
                )));
            }
        }
        Ok(())
    }

    /// Resolve a deck key against the presets, then the configured decks.
    pub fn resolve_deck(&self, name: &str) -> Result<DeckSpec> {
        if let Some(deck) = Deck::find(name) {
            return Ok(deck.spec());
        }
        self.decks
            .iter()
            .find(|deck| deck.key.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .ok_or_else(|| AppError::UnknownDeck(name.to_string()))
    }

    /// Presets followed by configured decks.
    pub fn all_decks(&self) -> Vec<DeckSpec> {
        Deck::ALL
            .into_iter()
            .map(Deck::spec)
            .chain(self.decks.iter().cloned())
            .collect()
    }
}

/// Browser session and search form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Archive landing page
    #[serde(default = "defaults::archive_url")]
    pub url: String,

    /// WebDriver endpoint (chromedriver, geckodriver, selenium server)
    #[serde(default = "defaults::webdriver_url")]
    pub webdriver_url: String,

    /// Run the browser without a window
    #[serde(default = "defaults::headless")]
    pub headless: bool,

    /// Extra browser command line arguments
    #[serde(default)]
    pub browser_args: Vec<String>,

    /// Upper bound for each element wait, in seconds
    #[serde(default = "defaults::wait_timeout")]
    pub wait_timeout_secs: u64,

    /// Pause after each date edit, in milliseconds
    #[serde(default = "defaults::settle_delay")]
    pub settle_delay_ms: u64,

    /// Pause after submitting the filter, before touching the result list
    #[serde(default = "defaults::filter_delay")]
    pub filter_delay_ms: u64,

    /// Pause before reading the result list, in milliseconds
    #[serde(default = "defaults::results_delay")]
    pub results_delay_ms: u64,

    /// Largest results-per-page option on the site
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Fail instead of warning when the result list fills a whole page
    #[serde(default)]
    pub fail_on_truncation: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            url: defaults::archive_url(),
            webdriver_url: defaults::webdriver_url(),
            headless: defaults::headless(),
            browser_args: Vec::new(),
            wait_timeout_secs: defaults::wait_timeout(),
            settle_delay_ms: defaults::settle_delay(),
            filter_delay_ms: defaults::filter_delay(),
            results_delay_ms: defaults::results_delay(),
            page_size: defaults::page_size(),
            fail_on_truncation: false,
        }
    }
}

/// HTTP download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::download_timeout")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification (the archive's chain is often incomplete)
    #[serde(default = "defaults::accept_invalid_certs")]
    pub accept_invalid_certs: bool,

    /// Compare the SHA-256 of each body with the hash on its card
    #[serde(default)]
    pub verify_sha256: bool,

    /// Default destination folder
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::download_timeout(),
            accept_invalid_certs: defaults::accept_invalid_certs(),
            verify_sha256: false,
            output_dir: defaults::output_dir(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Archive defaults
    pub fn archive_url() -> String {
        "https://www.ccee.org.br/acervo-ccee".into()
    }
    pub fn webdriver_url() -> String {
        "http://localhost:9515".into()
    }
    pub fn headless() -> bool {
        true
    }
    pub fn wait_timeout() -> u64 {
        20
    }
    pub fn settle_delay() -> u64 {
        1000
    }
    pub fn filter_delay() -> u64 {
        2000
    }
    pub fn results_delay() -> u64 {
        2000
    }
    pub fn page_size() -> usize {
        100
    }

    // Download defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; ccee-decks/0.1)".into()
    }
    pub fn download_timeout() -> u64 {
        300
    }
    pub fn accept_invalid_certs() -> bool {
        true
    }
    pub fn output_dir() -> String {
        "decks".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_deck(key: &str) -> DeckSpec {
        DeckSpec {
            key: key.to_string(),
            search_text: "Deck de Preços - Dessem".to_string(),
            match_name: Some("Deck de Preços - Dessem".to_string()),
            match_info: None,
        }
    }

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_wait_timeout() {
        let mut config = Config::default();
        config.archive.wait_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.download.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_webdriver_url() {
        let mut config = Config::default();
        config.archive.webdriver_url = "localhost 9515".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_card_selector() {
        let mut config = Config::default();
        config.selectors.card.hash = "[[invalid".to_string();
        assert!(matches!(
            config.validate(),
            Err(AppError::Selector { .. })
        ));
    }

    #[test]
    fn validate_rejects_deck_key_collisions() {
        let mut config = Config::default();
        config.decks = vec![custom_deck("decomp")];
        assert!(config.validate().is_err());

        config.decks = vec![custom_deck("DeckDessem"), custom_deck("deckdessem")];
        assert!(config.validate().is_err());

        config.decks = vec![custom_deck("DeckDessem")];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [archive]
            webdriver_url = "http://localhost:4444"

            [[decks]]
            key = "DeckDessem"
            search_text = "Deck de Preços - Dessem"
            match_name = "Deck de Preços - Dessem"
            "#,
        )
        .unwrap();

        assert_eq!(config.archive.webdriver_url, "http://localhost:4444");
        assert_eq!(config.archive.wait_timeout_secs, 20);
        assert_eq!(config.archive.page_size, 100);
        assert_eq!(config.archive.filter_delay_ms, 2000);
        assert!(config.download.accept_invalid_certs);
        assert_eq!(config.selectors.form.keyword_id, "keyword");
        assert_eq!(config.decks.len(), 1);
        assert_eq!(config.decks[0].match_info, None);
    }

    #[test]
    fn resolve_deck_prefers_presets() {
        let mut config = Config::default();
        config.decks = vec![custom_deck("DeckDessem")];

        assert_eq!(config.resolve_deck("DeckDecomp").unwrap().key, "DeckDecomp");
        assert_eq!(config.resolve_deck("deckdessem").unwrap().key, "DeckDessem");
        assert!(matches!(
            config.resolve_deck("DeckFoo"),
            Err(AppError::UnknownDeck(_))
        ));
        assert_eq!(config.all_decks().len(), 7);
    }
}
