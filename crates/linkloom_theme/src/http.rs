//! HTTP override-bundle source
//!
//! `GET {endpoint}` returning the page's stored override bundle as JSON. A
//! `404` or an empty body means the page has no stored configuration.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::sync::BundleSource;
use std::future::Future;

/// Fetches the override bundle from the persistence API
#[derive(Clone, Debug)]
pub struct HttpBundleSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBundleSource {
    pub fn new(endpoint: impl Into<String>, config: &SyncConfig) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SyncError::FetchFailure(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Build from `[sync]`; `None` when no endpoint is configured
    pub fn from_config(config: &SyncConfig) -> Result<Option<Self>, SyncError> {
        match &config.endpoint {
            Some(endpoint) => Self::new(endpoint.clone(), config).map(Some),
            None => Ok(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get(&self) -> Result<Option<serde_json::Value>, SyncError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SyncError::FetchFailure(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!("HttpBundleSource: no stored theme at {}", self.endpoint);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SyncError::FetchFailure(format!(
                "{} returned {}",
                self.endpoint, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::FetchFailure(e.to_string()))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| SyncError::MalformedPayload(e.to_string()))
    }
}

impl BundleSource for HttpBundleSource {
    fn fetch(
        &self,
    ) -> impl Future<Output = Result<Option<serde_json::Value>, SyncError>> + Send {
        self.get()
    }
}
