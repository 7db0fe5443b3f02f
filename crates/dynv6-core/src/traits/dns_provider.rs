// # DNS Provider Trait
//
// Defines the interface for sending an update request to the provider.
//
// ## Implementations
//
// - dynv6: `dynv6-provider` crate
//
// ## Usage
//
// ```rust,ignore
// use dynv6_core::DnsProvider;
//
// let provider = /* DnsProvider implementation */;
// let response = provider.send_update(&request).await?;
// println!("{} {}", response.status, response.body);
// ```

use crate::error::ProviderError;
use crate::types::UpdateRequest;
use async_trait::async_trait;

/// Raw provider answer: status code and plain-text body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text (not parsed)
    pub body: String,
}

impl ProviderResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Trait for DNS provider implementations
///
/// # Single-shot
///
/// One call to [`send_update`](DnsProvider::send_update) issues exactly one
/// HTTP request covering every family in the request. Providers:
///
/// - ✅ Perform the API call to their endpoint
/// - ✅ Return the status and body as received
/// - ❌ Retry or back off
/// - ❌ Decide whether a status means success (owned by `UpdateExecutor`)
/// - ❌ Log the token or any URL carrying it
///
/// A non-200 status is an `Ok(ProviderResponse)`. `Err` is reserved for
/// calls that never produced a status (timeout, connection refused, TLS).
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Send the update request
    ///
    /// # Parameters
    ///
    /// - `request`: The request built for this invocation
    ///
    /// # Returns
    ///
    /// - `Ok(ProviderResponse)`: The provider answered (any status)
    /// - `Err(ProviderError)`: No answer was received
    async fn send_update(&self, request: &UpdateRequest) -> Result<ProviderResponse, ProviderError>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
