// src/services/fetch.rs

//! File download service.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::DownloadConfig;
use crate::utils::http;

/// Fetches the full body behind a download link.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Plain HTTP GET through `reqwest`.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            log::debug!("TLS certificate verification is disabled for downloads");
        }
        Ok(Self {
            client: http::create_async_client(config)?,
        })
    }
}

#[async_trait]
impl FileFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        http::fetch_bytes(&self.client, url).await
    }
}
