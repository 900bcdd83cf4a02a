// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::DownloadConfig;

/// Create a configured asynchronous HTTP client for file downloads.
pub fn create_async_client(config: &DownloadConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()?;
    Ok(client)
}

/// Fetch a URL and return the full response body.
///
/// Non-2xx responses are errors.
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}
