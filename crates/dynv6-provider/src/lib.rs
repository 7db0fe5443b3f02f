// # dynv6 Provider
//
// This crate provides the dynv6 HTTP update API provider for the updater.
//
// ## Behaviour
//
// - One `GET https://dynv6.com/api/update` per request, all families at once
// - Query: `hostname`, `token`, and `ipv4` / `ipv6` only when present
// - HTTP timeout configured (10 seconds by default)
// - Body read as plain text, never parsed
// - NO retry logic (a failed cycle is left to the external scheduler)
// - NO status interpretation (owned by `UpdateExecutor`)
//
// ## Security Requirements
//
// - The token is part of the query string, so request URLs are never
//   logged and transport errors are stripped of their URL
// - The Debug implementation does not expose the token
//
// ## API Reference
//
// - https://dynv6.com/docs/apis (Update API, "HTTP Update API")

use async_trait::async_trait;
use dynv6_core::error::ProviderError;
use dynv6_core::traits::{DnsProvider, ProviderResponse};
use dynv6_core::UpdateRequest;
use reqwest::Url;
use std::time::Duration;

/// dynv6 update endpoint
pub const DYNV6_UPDATE_URL: &str = "https://dynv6.com/api/update";

/// Default HTTP timeout for the update call
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// dynv6 update API provider
pub struct Dynv6Provider {
    /// Update endpoint (overridable for tests and self-hosted proxies)
    endpoint: Url,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Configured request timeout
    timeout: Duration,
}

// Custom Debug implementation that prints the endpoint only
impl std::fmt::Debug for Dynv6Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dynv6Provider")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Dynv6Provider {
    /// Create a provider for the public dynv6 endpoint
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a provider with a custom HTTP timeout
    ///
    /// A zero timeout is rejected.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProviderError> {
        Self::with_endpoint(DYNV6_UPDATE_URL, timeout)
    }

    /// Create a provider for a custom endpoint
    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, ProviderError> {
        if timeout.is_zero() {
            return Err(ProviderError::client("HTTP timeout must be greater than zero"));
        }

        let endpoint = Url::parse(endpoint)
            .map_err(|e| ProviderError::client(format!("invalid endpoint '{}': {}", endpoint, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ddns-for-dynv6/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::client(e.to_string()))?;

        Ok(Self {
            endpoint,
            client,
            timeout,
        })
    }

    /// The full update URL for `request`
    ///
    /// ⚠️ Contains the token. Never log the result.
    pub fn update_url(&self, request: &UpdateRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(request.query_pairs());
        url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl DnsProvider for Dynv6Provider {
    async fn send_update(&self, request: &UpdateRequest) -> Result<ProviderResponse, ProviderError> {
        tracing::debug!(
            "Sending dynv6 update for {} ({})",
            request.hostname(),
            request.families()
        );

        let response = self
            .client
            .get(self.update_url(request))
            .send()
            .await
            .map_err(|e| ProviderError::transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| {
                ProviderError::transport(format!(
                    "status {} but the body could not be read: {}",
                    status,
                    e.without_url()
                ))
            })?;

        tracing::debug!("dynv6 answered {} ({} bytes)", status, body.len());
        Ok(ProviderResponse::new(status, body.trim()))
    }

    fn provider_name(&self) -> &'static str {
        "dynv6"
    }
}
