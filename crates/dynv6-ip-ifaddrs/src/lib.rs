// # getifaddrs Interface Source
//
// This crate provides an `InterfaceSource` backed by getifaddrs(3),
// read through `nix::ifaddrs`.
//
// ## Platform Support
//
// - Unix (Linux, macOS, BSD): full support via `nix`
// - Other targets: `interface_addresses()` returns
//   `DiscoveryError::Unsupported`
//
// ## Scope
//
// The source only reads. Filtering (loopback, link-local, notation) and
// the first-match rule live in `dynv6_core::discovery`.

use dynv6_core::error::DiscoveryError;
use dynv6_core::traits::{InterfaceAddress, InterfaceSource};

/// Interface source reading the kernel's address list
#[derive(Debug, Default, Clone, Copy)]
pub struct IfAddrsSource;

impl IfAddrsSource {
    pub fn new() -> Self {
        Self
    }
}

impl InterfaceSource for IfAddrsSource {
    fn interface_addresses(&self) -> Result<Vec<InterfaceAddress>, DiscoveryError> {
        let entries = sys::interface_addresses()?;
        tracing::trace!("getifaddrs returned {} address(es)", entries.len());
        Ok(entries)
    }

    fn source_name(&self) -> &'static str {
        "getifaddrs"
    }
}

#[cfg(unix)]
mod sys {
    use super::*;
    use nix::ifaddrs::getifaddrs;
    use nix::net::if_::InterfaceFlags;
    use nix::sys::socket::SockaddrStorage;
    use std::net::{IpAddr, SocketAddrV4, SocketAddrV6};

    pub(super) fn interface_addresses() -> Result<Vec<InterfaceAddress>, DiscoveryError> {
        let list = getifaddrs().map_err(|e| DiscoveryError::Enumeration(e.to_string()))?;

        let entries = list
            .filter_map(|ifa| {
                let addr = ifa.address.as_ref().and_then(to_ip)?;
                let entry = InterfaceAddress::new(ifa.interface_name, addr);
                if ifa.flags.contains(InterfaceFlags::IFF_UP) {
                    Some(entry)
                } else {
                    Some(entry.down())
                }
            })
            .collect();

        Ok(entries)
    }

    /// Decode an AF_INET / AF_INET6 address; other families yield `None`
    fn to_ip(storage: &SockaddrStorage) -> Option<IpAddr> {
        if let Some(sin) = storage.as_sockaddr_in() {
            return Some(IpAddr::V4(*SocketAddrV4::from(*sin).ip()));
        }
        storage
            .as_sockaddr_in6()
            .map(|sin6| IpAddr::V6(*SocketAddrV6::from(*sin6).ip()))
    }

}

#[cfg(not(unix))]
mod sys {
    use super::*;

    pub(super) fn interface_addresses() -> Result<Vec<InterfaceAddress>, DiscoveryError> {
        Err(DiscoveryError::Unsupported)
    }
}
