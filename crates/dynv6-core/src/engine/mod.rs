//! Update executor and engine
//!
//! The [`UpdateExecutor`] sends one request and reports its outcome. The
//! [`UpdateEngine`] drives one whole invocation on top of it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌────────────┐     ┌────────────────┐
//! │ AddressDiscovery │ ──► │  build()   │ ──► │ UpdateExecutor │
//! └──────────────────┘     └────────────┘     └────────────────┘
//!                                                │          │
//!                                                ▼          ▼
//!                                        ┌─────────────┐ ┌──────────┐
//!                                        │ DnsProvider │ │ Reporter │
//!                                        └─────────────┘ └──────────┘
//! ```
//!
//! ## Invocation states
//!
//! Discovering → Building → Executing → Reported, strictly in order. No
//! retries and no branching back. Whatever happens, the reporter receives
//! exactly one record.

use crate::builder;
use crate::discovery::AddressDiscovery;
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, Reporter};
use crate::types::{UpdateOutcome, UpdateRequest, UpdateSelection};
use tracing::debug;

/// Sends update requests and reports their outcome
pub struct UpdateExecutor {
    provider: Box<dyn DnsProvider>,
    reporter: Box<dyn Reporter>,
}

impl UpdateExecutor {
    pub fn new(provider: Box<dyn DnsProvider>, reporter: Box<dyn Reporter>) -> Self {
        Self { provider, reporter }
    }

    /// Send `request` and report the result
    ///
    /// Any answer from the provider is an `Ok(UpdateOutcome)`; only 200
    /// counts as success. A call that never got an answer is reported as a
    /// failure and returned as `Err`. Either way the reporter is called
    /// exactly once.
    pub async fn execute(&self, request: &UpdateRequest) -> Result<UpdateOutcome> {
        let families = request.families();
        debug!(
            "Sending {} update for {} via {}",
            families,
            request.hostname(),
            self.provider.provider_name()
        );

        match self.provider.send_update(request).await {
            Ok(response) => {
                let outcome = UpdateOutcome::from_response(families, response.status, response.body);
                self.reporter.outcome(request.hostname(), &outcome);
                Ok(outcome)
            }
            Err(e) => {
                let err = Error::from(e);
                self.reporter.failure(request.hostname(), families, &err);
                Err(err)
            }
        }
    }

    pub(crate) fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }
}

/// Runs one full invocation: discover, build, execute, report
pub struct UpdateEngine {
    discovery: AddressDiscovery,
    executor: UpdateExecutor,
}

impl UpdateEngine {
    pub fn new(discovery: AddressDiscovery, executor: UpdateExecutor) -> Self {
        Self {
            discovery,
            executor,
        }
    }

    /// Run one invocation for `selection`
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateOutcome)`: The provider answered; check `success`
    /// - `Err(Error::Discovery | Error::Build)`: Stopped before any HTTP call
    /// - `Err(Error::Provider)`: The provider call got no answer
    pub async fn run(&self, selection: &UpdateSelection) -> Result<UpdateOutcome> {
        let request = match self.prepare(selection) {
            Ok(request) => request,
            Err(err) => {
                self.executor
                    .reporter()
                    .failure(selection.hostname(), selection.version(), &err);
                return Err(err);
            }
        };

        self.executor.execute(&request).await
    }

    fn prepare(&self, selection: &UpdateSelection) -> Result<UpdateRequest> {
        let addrs = self.discovery.discover_for(selection.version())?;
        let request = builder::build(selection, &addrs)?;
        Ok(request)
    }
}
