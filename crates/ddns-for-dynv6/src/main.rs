// # ddns-for-dynv6
//
// This binary is a THIN integration layer: it parses arguments, sets up
// logging, assembles an `UpdateSelection` and hands it to `UpdateEngine`.
// Request building, classification and reporting live in dynv6-core.
//
// One run is one update cycle. Schedule it (cron, systemd timer) for
// periodic updates and do not let runs overlap.
//
// ## Example
//
// ```bash
// ddns-for-dynv6 --hostname myhost.dynv6.net --token "$TOKEN" -4 -6
// ddns-for-dynv6 -c /etc/ddns-for-dynv6/config.json
// ```

mod cli;

use anyhow::{Context, Result};
use cli::Cli;
use dynv6_core::discovery::MatchPolicy;
use dynv6_core::error::{DiscoveryError, Error, ProviderError};
use dynv6_core::{
    AddressDiscovery, AddressFamily, IpVersion, TracingReporter, UpdateEngine, UpdateExecutor,
    UpdateOutcome,
};
use dynv6_ip_ifaddrs::IfAddrsSource;
use dynv6_provider::Dynv6Provider;
use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, error};

/// Exit codes for different termination scenarios
///
/// - 0: Address(es) updated
/// - 1: Configuration error (including a freshly written template)
/// - 2: Not used here; clap exits with 2 on usage errors
/// - 3: No usable address for a requested family
/// - 4: The provider rejected the update
/// - 5: Runtime error (provider unreachable, client setup)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Update accepted by the provider
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Discovery or request build failure
    DiscoveryError = 3,
    /// Provider answered with a non-200 status
    UpdateFailed = 4,
    /// Runtime error (unexpected failure)
    RuntimeError = 5,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl DdnsExitCode {
    fn for_error(err: &Error) -> Self {
        match err {
            Error::Config(_) => DdnsExitCode::ConfigError,
            Error::Discovery(_) | Error::Build(_) => DdnsExitCode::DiscoveryError,
            Error::Provider(ProviderError::NonSuccessStatus { .. }) => DdnsExitCode::UpdateFailed,
            Error::Provider(_) => DdnsExitCode::RuntimeError,
        }
    }

    fn for_outcome(outcome: &UpdateOutcome) -> Self {
        if outcome.success {
            DdnsExitCode::Success
        } else {
            DdnsExitCode::UpdateFailed
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to set up logging: {:#}", e);
        return DdnsExitCode::ConfigError.into();
    }

    let policy = match &cli.interface {
        Some(name) => MatchPolicy::default().with_interface(name),
        None => MatchPolicy::default(),
    };
    let discovery = AddressDiscovery::new(Box::new(IfAddrsSource::new()), policy);

    if cli.show_ipv4 || cli.show_ipv6 {
        let family = if cli.show_ipv4 {
            AddressFamily::V4
        } else {
            AddressFamily::V6
        };
        return show_address(&discovery, family, cli.interface.as_deref()).into();
    }

    let selection = match cli.selection() {
        Ok(selection) => selection,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("Configuration error: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    let provider = match Dynv6Provider::with_timeout(Duration::from_secs(cli.timeout)) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to create dynv6 provider: {}", e);
            eprintln!("Failed to create dynv6 provider: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let engine = UpdateEngine::new(
        discovery,
        UpdateExecutor::new(Box::new(provider), Box::new(TracingReporter::new())),
    );

    // Single-threaded: each stage is awaited in order
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    debug!(
        "Updating {} address for {}",
        selection.version(),
        selection.hostname()
    );

    let code = match rt.block_on(engine.run(&selection)) {
        Ok(outcome) => {
            if !outcome.success {
                eprintln!(
                    "dynv6 rejected the update with status {}: {}",
                    outcome.status_code, outcome.provider_message
                );
            }
            DdnsExitCode::for_outcome(&outcome)
        }
        Err(e) => {
            eprintln!("Update failed: {}", e);
            DdnsExitCode::for_error(&e)
        }
    };

    code.into()
}

/// Install a `tracing` subscriber appending to the log file
fn init_logging(cli: &Cli) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .with_context(|| format!("cannot open log file {}", cli.log_file.display()))?;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}

/// Print the discovered address of `family`
fn show_address(
    discovery: &AddressDiscovery,
    family: AddressFamily,
    interface: Option<&str>,
) -> DdnsExitCode {
    let version = match family {
        AddressFamily::V4 => IpVersion::V4,
        AddressFamily::V6 => IpVersion::V6,
    };
    let scope = interface.map(|name| format!(" on {}", name)).unwrap_or_default();

    let found = discovery
        .discover_for(version)
        .and_then(|addrs| match addrs.get(family) {
            Some(addr) => Ok(addr.to_string()),
            None => Err(DiscoveryError::not_found(family)),
        });

    match found {
        Ok(addr) => {
            println!("{} address{}: {}", family, scope, addr);
            DdnsExitCode::Success
        }
        Err(e) => {
            error!("{} discovery failed{}: {}", family, scope, e);
            println!("No {} address found{}: {}", family, scope, e);
            DdnsExitCode::for_error(&e.into())
        }
    }
}
