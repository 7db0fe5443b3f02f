//! Value types that flow through one invocation
//!
//! ```text
//! AddressSet ──┐
//!              ├── build() ──► UpdateRequest ──► execute() ──► UpdateOutcome
//! UpdateSelection ┘
//! ```
//!
//! Everything here is created fresh per invocation and never mutated after
//! construction.

use crate::error::ConfigError;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A single address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Query parameter key the provider uses for this family
    pub fn query_key(self) -> &'static str {
        match self {
            AddressFamily::V4 => "ipv4",
            AddressFamily::V6 => "ipv6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => f.write_str("IPv4"),
            AddressFamily::V6 => f.write_str("IPv6"),
        }
    }
}

/// The non-empty set of families an update covers
///
/// A selection that wants neither family cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    /// IPv4 only
    V4,
    /// IPv6 only
    V6,
    /// IPv4 and IPv6 in one combined call
    Both,
}

impl IpVersion {
    /// Build from a pair of "want" flags; `None` when both are false
    pub fn from_flags(ipv4: bool, ipv6: bool) -> Option<Self> {
        match (ipv4, ipv6) {
            (true, true) => Some(IpVersion::Both),
            (true, false) => Some(IpVersion::V4),
            (false, true) => Some(IpVersion::V6),
            (false, false) => None,
        }
    }

    /// Whether this set contains `family`
    pub fn includes(self, family: AddressFamily) -> bool {
        matches!(
            (self, family),
            (IpVersion::Both, _)
                | (IpVersion::V4, AddressFamily::V4)
                | (IpVersion::V6, AddressFamily::V6)
        )
    }

    /// Families in this set, IPv4 first
    pub fn families(self) -> impl Iterator<Item = AddressFamily> {
        [AddressFamily::V4, AddressFamily::V6]
            .into_iter()
            .filter(move |family| self.includes(*family))
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => f.write_str("IPv4"),
            IpVersion::V6 => f.write_str("IPv6"),
            IpVersion::Both => f.write_str("IPv4+IPv6"),
        }
    }
}

/// Addresses discovered on the host
///
/// Each present field holds the textual form of a valid address of its
/// family. The text is kept as found, so a fully expanded IPv6 literal is
/// sent to the provider exactly as discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSet {
    ipv4: Option<String>,
    ipv6: Option<String>,
}

impl AddressSet {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the IPv4 address, validating its syntax
    pub fn with_ipv4(mut self, addr: impl Into<String>) -> Result<Self, ConfigError> {
        let addr = addr.into();
        if addr.parse::<Ipv4Addr>().is_err() {
            return Err(ConfigError::invalid(format!(
                "'{addr}' is not a valid IPv4 address"
            )));
        }
        self.ipv4 = Some(addr);
        Ok(self)
    }

    /// Set the IPv6 address, validating its syntax
    pub fn with_ipv6(mut self, addr: impl Into<String>) -> Result<Self, ConfigError> {
        let addr = addr.into();
        if addr.parse::<Ipv6Addr>().is_err() {
            return Err(ConfigError::invalid(format!(
                "'{addr}' is not a valid IPv6 address"
            )));
        }
        self.ipv6 = Some(addr);
        Ok(self)
    }

    pub(crate) fn from_parts(ipv4: Option<String>, ipv6: Option<String>) -> Self {
        Self { ipv4, ipv6 }
    }

    pub fn ipv4(&self) -> Option<&str> {
        self.ipv4.as_deref()
    }

    pub fn ipv6(&self) -> Option<&str> {
        self.ipv6.as_deref()
    }

    /// Address of the given family, if present
    pub fn get(&self, family: AddressFamily) -> Option<&str> {
        match family {
            AddressFamily::V4 => self.ipv4(),
            AddressFamily::V6 => self.ipv6(),
        }
    }
}

/// What to update: hostname, token and the families to push
#[derive(Clone, PartialEq, Eq)]
pub struct UpdateSelection {
    hostname: String,
    /// ⚠️ Secret. Never log this value.
    token: String,
    version: IpVersion,
}

impl UpdateSelection {
    /// Create a selection from external configuration
    ///
    /// Fails when hostname or token is empty, or when neither family is
    /// wanted.
    pub fn new(
        hostname: impl Into<String>,
        token: impl Into<String>,
        want_ipv4: bool,
        want_ipv6: bool,
    ) -> Result<Self, ConfigError> {
        let version =
            IpVersion::from_flags(want_ipv4, want_ipv6).ok_or(ConfigError::NoFamilySelected)?;
        Self::with_version(hostname, token, version)
    }

    /// Create a selection for an explicit family set
    pub fn with_version(
        hostname: impl Into<String>,
        token: impl Into<String>,
        version: IpVersion,
    ) -> Result<Self, ConfigError> {
        let hostname = hostname.into().trim().to_string();
        let token = token.into().trim().to_string();

        if hostname.is_empty() {
            return Err(ConfigError::invalid("hostname cannot be empty"));
        }
        if token.is_empty() {
            return Err(ConfigError::invalid("token cannot be empty"));
        }

        Ok(Self {
            hostname,
            token,
            version,
        })
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn version(&self) -> IpVersion {
        self.version
    }

    pub fn wants(&self, family: AddressFamily) -> bool {
        self.version.includes(family)
    }
}

impl fmt::Debug for UpdateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateSelection")
            .field("hostname", &self.hostname)
            .field("token", &"<REDACTED>")
            .field("version", &self.version)
            .finish()
    }
}

/// A single provider update request
///
/// Only produced by [`crate::builder::build`], which guarantees at least one
/// address is present and that only wanted families are carried.
#[derive(Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    hostname: String,
    token: String,
    ipv4: Option<String>,
    ipv6: Option<String>,
}

impl UpdateRequest {
    pub(crate) fn new(
        hostname: String,
        token: String,
        ipv4: Option<String>,
        ipv6: Option<String>,
    ) -> Self {
        debug_assert!(ipv4.is_some() || ipv6.is_some());
        Self {
            hostname,
            token,
            ipv4,
            ipv6,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn ipv4(&self) -> Option<&str> {
        self.ipv4.as_deref()
    }

    pub fn ipv6(&self) -> Option<&str> {
        self.ipv6.as_deref()
    }

    /// Families carried by this request
    pub fn families(&self) -> IpVersion {
        match (self.ipv4.is_some(), self.ipv6.is_some()) {
            (true, false) => IpVersion::V4,
            (false, true) => IpVersion::V6,
            _ => IpVersion::Both,
        }
    }

    /// Query parameters for the provider call
    ///
    /// Absent families are left out entirely; an empty `ipv4=` could be read
    /// by the provider as "clear this record".
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("hostname", self.hostname.as_str()), ("token", self.token.as_str())];
        if let Some(ipv4) = &self.ipv4 {
            pairs.push((AddressFamily::V4.query_key(), ipv4.as_str()));
        }
        if let Some(ipv6) = &self.ipv6 {
            pairs.push((AddressFamily::V6.query_key(), ipv6.as_str()));
        }
        pairs
    }
}

impl fmt::Debug for UpdateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateRequest")
            .field("hostname", &self.hostname)
            .field("token", &"<REDACTED>")
            .field("ipv4", &self.ipv4)
            .field("ipv6", &self.ipv6)
            .finish()
    }
}

/// Result of one provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// `true` exactly when the provider answered 200
    pub success: bool,
    /// HTTP status code
    pub status_code: u16,
    /// Raw response body, kept for diagnostics only
    pub provider_message: String,
    /// Families the request covered
    pub families: IpVersion,
}

impl UpdateOutcome {
    /// Classify a provider response
    pub fn from_response(families: IpVersion, status_code: u16, body: impl Into<String>) -> Self {
        Self {
            success: status_code == 200,
            status_code,
            provider_message: body.into(),
            families,
        }
    }

    /// Turn a failed outcome into a [`ProviderError::NonSuccessStatus`]
    ///
    /// [`ProviderError::NonSuccessStatus`]: crate::error::ProviderError::NonSuccessStatus
    pub fn into_result(self) -> Result<Self, crate::error::ProviderError> {
        if self.success {
            Ok(self)
        } else {
            Err(crate::error::ProviderError::NonSuccessStatus {
                status: self.status_code,
                message: self.provider_message,
            })
        }
    }
}
