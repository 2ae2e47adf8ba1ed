//! Remote stamp image retrieval.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{header::CONTENT_TYPE, redirect, Client};

use crate::config::StampFetchConfig;
use crate::errors::{RenderError, StampFetchError};
use crate::models::{StampImage, StampSlot};

/// Retrieves the bytes of a stamp image by reference.
#[async_trait]
pub trait StampFetcher: Send + Sync {
    async fn fetch(&self, slot: StampSlot, url: &str) -> Result<StampImage, StampFetchError>;
}

/// Fetches stamps over HTTP(S), following a bounded number of redirects.
pub struct HttpStampFetcher {
    client: Client,
}

impl HttpStampFetcher {
    pub fn new(config: &StampFetchConfig) -> Result<Self, RenderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(redirect::Policy::limited(config.max_redirects.max(1)))
            .build()
            .map_err(|e| RenderError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StampFetcher for HttpStampFetcher {
    async fn fetch(&self, slot: StampSlot, url: &str) -> Result<StampImage, StampFetchError> {
        debug!("Fetching {} stamp from {}", slot.as_str(), url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StampFetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StampFetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| StampFetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        if bytes.is_empty() {
            return Err(StampFetchError::Empty {
                url: url.to_string(),
            });
        }

        Ok(StampImage {
            slot,
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
