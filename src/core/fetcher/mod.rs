//! # Fetcher Module
//!
//! Downloads raw image bytes over HTTP.
//!
//! Uses `reqwest::blocking::Client` since each record is processed on a
//! worker pool thread. The client carries the request timeout, so a
//! stalled server only holds one worker for at most that long.

use crate::error::{ConfigError, FetchError};
use std::time::Duration;

/// Source of raw image bytes
pub trait ImageFetcher: Send + Sync {
    /// Download the image at `url`
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Build the HTTP client shared by the fetcher and the reporter
pub fn build_client(timeout: Duration) -> Result<reqwest::blocking::Client, ConfigError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("profile-phash-worker/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Fetches images with a plain HTTP GET
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with its own client
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    /// Create a fetcher sharing an existing client
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Request {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        tracing::debug!(url, bytes = bytes.len(), "Downloaded image");
        Ok(bytes.to_vec())
    }
}
