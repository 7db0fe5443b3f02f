// # Reporter Trait
//
// Receives exactly one record per invocation. The engine owns the
// reporter it is given; there is no process-global logger in the core.

use crate::error::Error;
use crate::types::{IpVersion, UpdateOutcome};
use tracing::{error, info};

/// Sink for invocation outcomes
///
/// [`UpdateEngine`](crate::engine::UpdateEngine) calls exactly one of these
/// methods per invocation. A request covering both families produces one
/// record, never one per family.
pub trait Reporter: Send + Sync {
    /// The provider answered; `outcome.success` tells which way
    fn outcome(&self, hostname: &str, outcome: &UpdateOutcome);

    /// The invocation stopped before the provider answered
    fn failure(&self, hostname: &str, families: IpVersion, error: &Error);
}

/// Reporter that writes through `tracing`
///
/// Successful updates are logged at `INFO`, everything else at `ERROR`.
/// Records carry the `hostname`, `families`, `status` and `success` fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for TracingReporter {
    fn outcome(&self, hostname: &str, outcome: &UpdateOutcome) {
        let message = one_line(&outcome.provider_message);
        if outcome.success {
            info!(
                hostname = hostname,
                families = %outcome.families,
                status = outcome.status_code,
                success = true,
                "Updated {} address for {}, dynv6 returned {}: {}",
                outcome.families,
                hostname,
                outcome.status_code,
                message
            );
        } else {
            error!(
                hostname = hostname,
                families = %outcome.families,
                status = outcome.status_code,
                success = false,
                "Failed to update {} address for {}, dynv6 returned {}: {}",
                outcome.families,
                hostname,
                outcome.status_code,
                message
            );
        }
    }

    fn failure(&self, hostname: &str, families: IpVersion, err: &Error) {
        error!(
            hostname = hostname,
            families = %families,
            stage = err.stage(),
            success = false,
            "Failed to update {} address for {}: {}",
            families,
            hostname,
            err
        );
    }
}

/// Collapse a provider body onto a single log line
fn one_line(body: &str) -> String {
    body.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DiscoveryError, ProviderError};
    use crate::log_capture::capture_logs;
    use tracing::Level;

    const TOKEN: &str = "s3cr3t-token";

    #[test]
    fn accepted_update_is_one_info_line() {
        let outcome =
            UpdateOutcome::from_response(IpVersion::Both, 200, "addresses updated");
        let lines = capture_logs(Level::TRACE, || {
            TracingReporter::new().outcome("home.dynv6.net", &outcome)
        });

        assert_eq!(lines.len(), 1, "{lines:?}");
        let line = &lines[0];
        assert!(line.contains("INFO"), "{line}");
        assert!(!line.contains("ERROR"), "{line}");
        assert!(line.contains("home.dynv6.net"), "{line}");
        assert!(line.contains("families=IPv4+IPv6"), "{line}");
        assert!(line.contains("status=200"), "{line}");
        assert!(line.contains("success=true"), "{line}");
        assert!(line.contains("addresses updated"), "{line}");
    }

    #[test]
    fn rejected_update_is_one_error_line() {
        let outcome = UpdateOutcome::from_response(IpVersion::V4, 503, "service\nunavailable");
        let lines = capture_logs(Level::TRACE, || {
            TracingReporter::new().outcome("home.dynv6.net", &outcome)
        });

        assert_eq!(lines.len(), 1, "{lines:?}");
        let line = &lines[0];
        assert!(line.contains("ERROR"), "{line}");
        assert!(line.contains("families=IPv4"), "{line}");
        assert!(line.contains("status=503"), "{line}");
        assert!(line.contains("success=false"), "{line}");
        assert!(line.contains("service unavailable"), "{line}");
    }

    #[test]
    fn failure_is_one_error_line_with_stage() {
        let err: Error = DiscoveryError::NoIpv6Found.into();
        let lines = capture_logs(Level::TRACE, || {
            TracingReporter::new().failure("home.dynv6.net", IpVersion::V6, &err)
        });

        assert_eq!(lines.len(), 1, "{lines:?}");
        let line = &lines[0];
        assert!(line.contains("ERROR"), "{line}");
        assert!(line.contains("stage=\"discovery\""), "{line}");
        assert!(line.contains("families=IPv6"), "{line}");
        assert!(line.contains("success=false"), "{line}");
    }

    #[test]
    fn token_never_reaches_the_log() {
        // The selection carries the token; the reporter only ever sees derived data
        let selection =
            crate::types::UpdateSelection::with_version("home.dynv6.net", TOKEN, IpVersion::Both)
                .unwrap();
        let outcome = UpdateOutcome::from_response(selection.version(), 401, "invalid token");
        let transport: Error = ProviderError::transport("connection reset").into();

        let lines = capture_logs(Level::TRACE, || {
            let reporter = TracingReporter::new();
            reporter.outcome(selection.hostname(), &outcome);
            reporter.failure(selection.hostname(), selection.version(), &transport);
        });

        assert_eq!(lines.len(), 2, "{lines:?}");
        assert!(lines.iter().all(|line| !line.contains(TOKEN)), "{lines:?}");
    }

    #[test]
    fn body_is_flattened() {
        assert_eq!(one_line("  addresses\nupdated \r\n"), "addresses updated");
        assert_eq!(one_line(""), "");
    }
}
