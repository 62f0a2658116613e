// src/fetch/http.rs
// =============================================================================
// Downloads robots.txt and sitemap documents.
//
// Key functionality:
// - One reqwest Client per run, shared by every task (connection pooling)
// - The User-Agent header and request timeout come from Config
// - Anything other than a 2xx status is a fetch error
//
// There is no retry: a failed fetch ends that branch of the sitemap tree.
// =============================================================================

use crate::config::Config;
use crate::error::{Result, SitemapError};
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    // Builds the HTTP client from the resolver settings
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|source| SitemapError::Client { source })?;

        Ok(Self { client })
    }

    // Fetches a document and returns its raw body
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| network_error(url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SitemapError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| network_error(url, source))?;

        tracing::debug!(url, bytes = body.len(), "fetched");
        Ok(body.to_vec())
    }
}

fn network_error(url: &str, source: reqwest::Error) -> SitemapError {
    if source.is_timeout() {
        tracing::debug!(url, "request timed out");
    }
    SitemapError::Network {
        url: url.to_string(),
        source,
    }
}
