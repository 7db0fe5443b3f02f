//! Architectural Contract Test: Failure Semantics
//!
//! Constraints verified:
//! - Discovery and build failures stop the invocation before any HTTP call
//! - A call without an answer is reported once and returned as an error
//! - Failure records carry hostname and family context
//!
//! If this test fails, broken invocations may reach the provider or vanish
//! from the log.

mod common;

use common::*;
use dynv6_core::error::{DiscoveryError, Error, ProviderError};
use dynv6_core::{AddressSet, IpVersion, build};

#[tokio::test]
async fn scenario_c_missing_ipv6_makes_no_http_call() {
    let source = StaticInterfaceSource::from_pairs(&[("eth0", "203.0.113.5")]);
    let provider = MockDnsProvider::replying(200, "addresses updated");
    let reporter = RecordingReporter::new();

    let err = engine(&source, &provider, &reporter)
        .run(&selection(IpVersion::V6))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Discovery(DiscoveryError::NoIpv6Found)));
    assert_eq!(provider.call_count(), 0, "no HTTP call after a discovery gap");

    let records = reporter.records();
    assert_eq!(records.len(), 1);
    match &records[0] {
        Record::Failure {
            hostname,
            families,
            stage,
            ..
        } => {
            assert_eq!(hostname, "home.dynv6.net");
            assert_eq!(*families, IpVersion::V6);
            assert_eq!(*stage, "discovery");
        }
        other => panic!("unexpected record: {:?}", other),
    }
}

#[tokio::test]
async fn ipv4_only_tolerates_missing_ipv6() {
    let source = StaticInterfaceSource::from_pairs(&[("eth0", "203.0.113.5")]);
    let provider = MockDnsProvider::replying(200, "addresses updated");
    let reporter = RecordingReporter::new();

    let outcome = engine(&source, &provider, &reporter)
        .run(&selection(IpVersion::V4))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn empty_host_fails_on_ipv4_first() {
    let source = StaticInterfaceSource::from_pairs(&[("lo", "127.0.0.1")]);
    let provider = MockDnsProvider::replying(200, "addresses updated");
    let reporter = RecordingReporter::new();

    let err = engine(&source, &provider, &reporter)
        .run(&selection(IpVersion::Both))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Discovery(DiscoveryError::NoIpv4Found)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn transport_failure_is_reported_once() {
    let source = StaticInterfaceSource::from_pairs(&[("eth0", "203.0.113.5")]);
    let provider = MockDnsProvider::unreachable("operation timed out");
    let reporter = RecordingReporter::new();

    let err = engine(&source, &provider, &reporter)
        .run(&selection(IpVersion::V4))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Provider(ProviderError::Transport(_))));
    assert_eq!(provider.call_count(), 1, "no retry after a transport failure");

    let records = reporter.records();
    assert_eq!(records.len(), 1);
    assert!(matches!(&records[0], Record::Failure { stage: "provider", .. }));
}

#[tokio::test]
async fn executor_only_sees_valid_requests() {
    // The builder refuses before the executor is ever involved
    let provider = MockDnsProvider::replying(200, "addresses updated");
    let addrs = AddressSet::new().with_ipv4("203.0.113.5").unwrap();

    assert!(build(&selection(IpVersion::Both), &addrs).is_err());
    assert_eq!(provider.call_count(), 0);
}
