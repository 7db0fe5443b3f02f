//! Address discovery
//!
//! Picks the host's IPv4 and IPv6 address out of whatever an
//! [`InterfaceSource`] enumerates. The first address (in OS order) that
//! passes the [`MatchPolicy`] wins for each family.
//!
//! ## Known limitation: full IPv6 notation only
//!
//! With [`REQUIRE_FULL_IPV6_NOTATION`] on, an IPv6 address is accepted only
//! when its textual form is eight colon-separated hex groups. Addresses
//! whose canonical text is `::`-compressed (for example `2001:db8::1`) are
//! not recognised. This mirrors what earlier releases matched and is kept
//! until a decision is made to broaden it.

use crate::error::DiscoveryError;
use crate::traits::{InterfaceAddress, InterfaceSource};
use crate::types::{AddressFamily, AddressSet, IpVersion};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// Skip loopback addresses (127.0.0.0/8, ::1)
pub const EXCLUDE_LOOPBACK: bool = true;

/// Skip link-local addresses (169.254.0.0/16, fe80::/10)
pub const EXCLUDE_LINK_LOCAL: bool = true;

/// Accept only IPv6 addresses written as eight full groups
pub const REQUIRE_FULL_IPV6_NOTATION: bool = true;

/// Skip addresses on interfaces that are down
pub const SKIP_DOWN_INTERFACES: bool = true;

/// Which enumerated addresses count as "the host's address"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPolicy {
    pub exclude_loopback: bool,
    pub exclude_link_local: bool,
    pub require_full_ipv6_notation: bool,
    pub skip_down_interfaces: bool,
    /// Only consider this interface, when set
    pub interface: Option<String>,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            exclude_loopback: EXCLUDE_LOOPBACK,
            exclude_link_local: EXCLUDE_LINK_LOCAL,
            require_full_ipv6_notation: REQUIRE_FULL_IPV6_NOTATION,
            skip_down_interfaces: SKIP_DOWN_INTERFACES,
            interface: None,
        }
    }
}

impl MatchPolicy {
    /// Restrict matching to a single interface
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Textual form of `entry` if it is acceptable for `family`
    pub fn accept(&self, entry: &InterfaceAddress, family: AddressFamily) -> Option<String> {
        if self.skip_down_interfaces && !entry.is_up {
            return None;
        }
        if let Some(only) = &self.interface
            && *only != entry.interface
        {
            return None;
        }

        match (family, entry.addr) {
            (AddressFamily::V4, IpAddr::V4(addr)) => self.accept_v4(addr),
            (AddressFamily::V6, IpAddr::V6(addr)) => self.accept_v6(&addr.to_string(), addr),
            _ => None,
        }
    }

    /// Apply the IPv6 rules to an address given as text
    ///
    /// Fails for text that does not parse, and for `::`-compressed text
    /// while full notation is required.
    pub fn accept_ipv6_text(&self, text: &str) -> Option<String> {
        let addr: Ipv6Addr = text.parse().ok()?;
        self.accept_v6(text, addr)
    }

    fn accept_v4(&self, addr: Ipv4Addr) -> Option<String> {
        if addr.is_unspecified() || addr.is_multicast() || addr.is_broadcast() {
            return None;
        }
        if self.exclude_loopback && addr.is_loopback() {
            return None;
        }
        if self.exclude_link_local && addr.is_link_local() {
            return None;
        }
        Some(addr.to_string())
    }

    fn accept_v6(&self, text: &str, addr: Ipv6Addr) -> Option<String> {
        if addr.is_unspecified() || addr.is_multicast() {
            return None;
        }
        if self.exclude_loopback && addr.is_loopback() {
            return None;
        }
        if self.exclude_link_local && is_ipv6_link_local(addr) {
            return None;
        }
        if self.require_full_ipv6_notation && !is_full_ipv6_literal(text) {
            return None;
        }
        Some(text.to_string())
    }
}

/// Whether `text` is eight colon-separated groups of 1-4 hex digits
///
/// Lowercase only, no `::`, no zone suffix, no embedded IPv4.
pub fn is_full_ipv6_literal(text: &str) -> bool {
    let groups: Vec<&str> = text.split(':').collect();
    groups.len() == 8
        && groups.iter().all(|group| {
            (1..=4).contains(&group.len())
                && group
                    .bytes()
                    .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        })
}

fn is_ipv6_link_local(addr: Ipv6Addr) -> bool {
    (addr.segments()[0] & 0xffc0) == 0xfe80
}

/// Address discovery over a pluggable interface source
pub struct AddressDiscovery {
    source: Box<dyn InterfaceSource>,
    policy: MatchPolicy,
}

impl AddressDiscovery {
    pub fn new(source: Box<dyn InterfaceSource>, policy: MatchPolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Discover both families; either one missing is an error
    pub fn discover(&self) -> Result<AddressSet, DiscoveryError> {
        self.discover_for(IpVersion::Both)
    }

    /// Discover addresses, requiring only the families in `version`
    ///
    /// A family outside `version` is still filled in when found, but its
    /// absence is tolerated. IPv4 is checked first.
    pub fn discover_for(&self, version: IpVersion) -> Result<AddressSet, DiscoveryError> {
        let entries = self.source.interface_addresses()?;
        debug!(
            "{} enumerated {} interface address(es)",
            self.source.source_name(),
            entries.len()
        );

        let ipv4 = self.first_match(&entries, AddressFamily::V4);
        let ipv6 = self.first_match(&entries, AddressFamily::V6);

        for family in version.families() {
            let found = match family {
                AddressFamily::V4 => ipv4.is_some(),
                AddressFamily::V6 => ipv6.is_some(),
            };
            if !found {
                return Err(DiscoveryError::not_found(family));
            }
        }

        Ok(AddressSet::from_parts(ipv4, ipv6))
    }

    fn first_match(&self, entries: &[InterfaceAddress], family: AddressFamily) -> Option<String> {
        let found = entries
            .iter()
            .find_map(|entry| self.policy.accept(entry, family).map(|text| (entry, text)));

        match found {
            Some((entry, text)) => {
                debug!("Selected {} address {} on {}", family, text, entry.interface);
                Some(text)
            }
            None => {
                debug!("No {} address matched the discovery policy", family);
                None
            }
        }
    }
}
