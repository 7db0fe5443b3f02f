//! Core traits for the dynv6 updater
//!
//! This module defines the seams where platform and network code plug in.
//!
//! - [`InterfaceSource`]: Enumerate the host's interface addresses
//! - [`DnsProvider`]: Send one update request to the provider
//! - [`Reporter`]: Record the outcome of an invocation

pub mod interface_source;
pub mod dns_provider;
pub mod reporter;

pub use interface_source::{InterfaceAddress, InterfaceSource};
pub use dns_provider::{DnsProvider, ProviderResponse};
pub use reporter::{Reporter, TracingReporter};
