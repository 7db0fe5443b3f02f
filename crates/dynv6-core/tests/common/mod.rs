//! Test doubles and common utilities for contract tests
//!
//! These doubles record how the engine drives them without touching the
//! network or the host's interfaces.

#![allow(dead_code)]

use dynv6_core::error::{DiscoveryError, Error, ProviderError};
use dynv6_core::traits::{DnsProvider, InterfaceAddress, InterfaceSource, ProviderResponse, Reporter};
use dynv6_core::{
    AddressDiscovery, IpVersion, MatchPolicy, UpdateEngine, UpdateExecutor, UpdateOutcome,
    UpdateRequest, UpdateSelection,
};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What a mock provider call should return
#[derive(Debug, Clone)]
pub enum MockReply {
    Status(u16, &'static str),
    Transport(&'static str),
}

/// A mock DnsProvider that tracks calls
#[derive(Clone)]
pub struct MockDnsProvider {
    reply: MockReply,
    /// Call counter for send_update()
    call_count: Arc<AtomicUsize>,
    /// Query pairs of every request received, as owned strings
    requests: Arc<Mutex<Vec<Vec<(String, String)>>>>,
}

impl MockDnsProvider {
    pub fn replying(status: u16, body: &'static str) -> Self {
        Self::new(MockReply::Status(status, body))
    }

    pub fn unreachable(reason: &'static str) -> Self {
        Self::new(MockReply::Transport(reason))
    }

    fn new(reply: MockReply) -> Self {
        Self {
            reply,
            call_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times send_update() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get the query pairs of every request sent
    pub fn requests(&self) -> Vec<Vec<(String, String)>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn send_update(&self, request: &UpdateRequest) -> Result<ProviderResponse, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(
            request
                .query_pairs()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );

        match &self.reply {
            MockReply::Status(status, body) => Ok(ProviderResponse::new(*status, *body)),
            MockReply::Transport(reason) => Err(ProviderError::transport(*reason)),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// One record captured by [`RecordingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Outcome {
        hostname: String,
        outcome: UpdateOutcome,
    },
    Failure {
        hostname: String,
        families: IpVersion,
        stage: &'static str,
        message: String,
    },
}

impl Record {
    pub fn is_error(&self) -> bool {
        match self {
            Record::Outcome { outcome, .. } => !outcome.success,
            Record::Failure { .. } => true,
        }
    }
}

/// A reporter that keeps every record in memory
#[derive(Clone, Default)]
pub struct RecordingReporter {
    records: Arc<Mutex<Vec<Record>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn outcome(&self, hostname: &str, outcome: &UpdateOutcome) {
        self.records.lock().unwrap().push(Record::Outcome {
            hostname: hostname.to_string(),
            outcome: outcome.clone(),
        });
    }

    fn failure(&self, hostname: &str, families: IpVersion, error: &Error) {
        self.records.lock().unwrap().push(Record::Failure {
            hostname: hostname.to_string(),
            families,
            stage: error.stage(),
            message: error.to_string(),
        });
    }
}

/// An interface source returning a fixed list
#[derive(Clone)]
pub struct StaticInterfaceSource {
    entries: Vec<InterfaceAddress>,
    call_count: Arc<AtomicUsize>,
}

impl StaticInterfaceSource {
    pub fn new(entries: Vec<InterfaceAddress>) -> Self {
        Self {
            entries,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Build from `(interface, address)` pairs on interfaces that are up
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(name, addr)| InterfaceAddress::new(*name, addr.parse::<IpAddr>().unwrap()))
                .collect(),
        )
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl InterfaceSource for StaticInterfaceSource {
    fn interface_addresses(&self) -> Result<Vec<InterfaceAddress>, DiscoveryError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.clone())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// Helper to create a selection for `home.dynv6.net`
pub fn selection(version: IpVersion) -> UpdateSelection {
    UpdateSelection::with_version("home.dynv6.net", "test-token", version)
        .expect("valid selection")
}

/// Helper to wire an engine from test doubles
pub fn engine(
    source: &StaticInterfaceSource,
    provider: &MockDnsProvider,
    reporter: &RecordingReporter,
) -> UpdateEngine {
    UpdateEngine::new(
        AddressDiscovery::new(Box::new(source.clone()), MatchPolicy::default()),
        UpdateExecutor::new(Box::new(provider.clone()), Box::new(reporter.clone())),
    )
}

/// Helper to wire an executor from test doubles
pub fn executor(provider: &MockDnsProvider, reporter: &RecordingReporter) -> UpdateExecutor {
    UpdateExecutor::new(Box::new(provider.clone()), Box::new(reporter.clone()))
}
