// # Interface Source Trait
//
// Defines the platform seam for reading the host's interface addresses.
//
// ## Implementations
//
// - getifaddrs(3) (Unix): `dynv6-ip-ifaddrs` crate
// - Static lists: contract tests
//
// ## Usage
//
// ```rust,ignore
// use dynv6_core::InterfaceSource;
//
// let source = /* InterfaceSource implementation */;
// for entry in source.interface_addresses()? {
//     println!("{}: {}", entry.interface, entry.addr);
// }
// ```

use crate::error::DiscoveryError;
use std::net::IpAddr;

/// One address assigned to one interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    /// Interface name as reported by the OS (e.g. "eth0")
    pub interface: String,
    /// The assigned address
    pub addr: IpAddr,
    /// Whether the interface is administratively up
    pub is_up: bool,
}

impl InterfaceAddress {
    /// An address on an interface that is up
    pub fn new(interface: impl Into<String>, addr: IpAddr) -> Self {
        Self {
            interface: interface.into(),
            addr,
            is_up: true,
        }
    }

    /// Mark the interface as down
    pub fn down(mut self) -> Self {
        self.is_up = false;
        self
    }
}

/// Trait for interface enumeration implementations
///
/// Implementations perform read-only system introspection and nothing else.
/// They must not filter, de-duplicate or reorder: the selection policy lives
/// in [`crate::discovery::AddressDiscovery`] and relies on OS order for its
/// "first match wins" rule.
pub trait InterfaceSource: Send + Sync {
    /// List every address on every interface, in enumeration order
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<InterfaceAddress>)`: All addresses, possibly empty
    /// - `Err(DiscoveryError)`: If the OS refused the enumeration
    fn interface_addresses(&self) -> Result<Vec<InterfaceAddress>, DiscoveryError>;

    /// Name of the source (for logging)
    fn source_name(&self) -> &'static str;
}
