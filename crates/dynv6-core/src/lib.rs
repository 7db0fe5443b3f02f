// # dynv6-core
//
// Core library for the dynv6 dynamic DNS updater.
//
// ## Architecture Overview
//
// This library provides the update-decision engine for one invocation:
// - **InterfaceSource**: Trait for enumerating the host's interface addresses
// - **AddressDiscovery**: First-match selection of the IPv4/IPv6 address
// - **build()**: Pure construction of the provider request
// - **DnsProvider**: Trait for sending the request to the provider
// - **Reporter**: Trait receiving exactly one record per invocation
// - **UpdateEngine**: Runs discover → build → execute → report
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from platform and HTTP code
// 2. **Single-shot**: One invocation, one HTTP call, one log record
// 3. **No retries**: A failed cycle is reported and left to the scheduler
// 4. **Library-First**: Entry points only assemble an `UpdateSelection`
// 5. **Idempotency**: No hidden state between invocations

pub mod traits;
pub mod types;
pub mod builder;
pub mod discovery;
pub mod engine;
pub mod config;
pub mod error;

#[cfg(test)]
mod log_capture;

// Re-export core types for convenience
pub use traits::{DnsProvider, InterfaceSource, Reporter, TracingReporter};
pub use types::{AddressFamily, AddressSet, IpVersion, UpdateOutcome, UpdateRequest, UpdateSelection};
pub use builder::build;
pub use discovery::{AddressDiscovery, MatchPolicy};
pub use engine::{UpdateEngine, UpdateExecutor};
pub use config::ConfigFile;
pub use error::{Error, Result};
