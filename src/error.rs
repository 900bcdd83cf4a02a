// src/error.rs

//! Unified error handling for archive search and deck downloads.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// WebDriver session could not be opened
    #[error("WebDriver session error: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// WebDriver command failed
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Period argument has the wrong shape or format
    #[error("Invalid period: {0}")]
    Period(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Deck key matches neither a preset nor a configured deck
    #[error("Unknown deck '{0}'")]
    UnknownDeck(String),

    /// A page element never became present/visible
    #[error("Timed out after {secs}s waiting for {target}")]
    Timeout { target: String, secs: u64 },

    /// Result page markup did not look as expected
    #[error("Scrape error for {context}: {message}")]
    Scrape { context: String, message: String },

    /// Result list filled the whole page
    #[error("Search returned {count} results, the page size limit; later results were not captured")]
    Truncated { count: usize },

    /// Downloaded body does not match the hash published on the card
    #[error("Hash mismatch for {file}: expected {expected}, got {actual}")]
    HashMismatch {
        file: String,
        expected: String,
        actual: String,
    },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a period error.
    pub fn period(message: impl Into<String>) -> Self {
        Self::Period(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a wait timeout error.
    pub fn timeout(target: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            target: target.into(),
            secs: timeout.as_secs(),
        }
    }

    /// Create a scrape error with context.
    pub fn scrape(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Scrape {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
