//! HTTP gateway to the data.police.uk API.
//!
//! One synchronous-looking outbound GET per call. Every failure mode —
//! DNS/connect faults, timeouts, non-2xx statuses, bodies that fail to parse
//! as JSON — is logged and collapsed to `None`. Callers never see an error
//! from this layer; the catalog substitutes each tool's declared fallback.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::types::UpstreamConfig;

/// Query-string parameters for one upstream call. Built fresh per invocation;
/// values are already rendered to strings, URL encoding happens at send time.
pub type QueryParams = BTreeMap<String, String>;

/// Seam between the tool catalog and the network. Implemented by
/// [`HttpGateway`] in production and by stubs in tests.
#[async_trait]
pub trait CrimeApi: Send + Sync {
    /// GET `{base}/{endpoint}` with `params` attached.
    ///
    /// `None` means "no data" for any reason; a JSON `null` body counts too.
    async fn request(&self, endpoint: &str, params: &QueryParams) -> Option<Value>;
}

/// Reqwest-backed gateway. The client carries the fixed per-call timeout, so
/// individual requests need no timeout plumbing.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &UpstreamConfig) -> crate::types::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| crate::types::Error::internal(format!("http client build failed: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn try_request(&self, url: &str, params: &QueryParams) -> Result<Value, reqwest::Error> {
        let response = self.client.get(url).query(params).send().await?;
        let response = response.error_for_status()?;
        response.json::<Value>().await
    }
}

#[async_trait]
impl CrimeApi for HttpGateway {
    async fn request(&self, endpoint: &str, params: &QueryParams) -> Option<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        match self.try_request(&url, params).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!(endpoint, "API request failed: {}", e);
                None
            }
        }
    }
}
