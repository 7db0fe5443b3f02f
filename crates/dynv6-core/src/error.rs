//! Error types for the dynv6 updater
//!
//! Each stage of an invocation has its own error enum so callers can tell a
//! configuration problem from a discovery gap or a provider rejection. The
//! umbrella [`Error`] wraps all of them.

use crate::types::AddressFamily;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dynv6 updater
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No usable address was found on the host
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The update request could not be assembled
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The provider call failed or was rejected
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl Error {
    /// Short, stable name of the stage that failed (used as a log field)
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Discovery(_) => "discovery",
            Error::Build(_) => "build",
            Error::Provider(_) => "provider",
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file did not exist; a template was written in its place
    #[error("config file {} did not exist, a template was written; fill in hostname and token and run again", .0.display())]
    TemplateCreated(PathBuf),

    /// The config file exists but could not be read
    #[error("cannot read config file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON of the expected shape
    #[error("cannot parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The template file could not be written
    #[error("cannot write config template {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config still carries template placeholder values
    #[error("config field '{0}' still holds the template placeholder")]
    Placeholder(&'static str),

    /// Neither IPv4 nor IPv6 was selected
    #[error("no address family selected, enable ipv4, ipv6 or both")]
    NoFamilySelected,

    /// Any other invalid value
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create an invalid-value error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Address discovery errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// IPv4 was wanted but no address matched the policy
    #[error("no usable IPv4 address found on this host")]
    NoIpv4Found,

    /// IPv6 was wanted but no address matched the policy
    #[error("no usable IPv6 address found on this host")]
    NoIpv6Found,

    /// The OS refused to enumerate interface addresses
    #[error("cannot enumerate interface addresses: {0}")]
    Enumeration(String),

    /// Interface enumeration is not available on this platform
    #[error("interface enumeration is not supported on this platform")]
    Unsupported,
}

impl DiscoveryError {
    /// The "not found" error for the given family
    pub fn not_found(family: AddressFamily) -> Self {
        match family {
            AddressFamily::V4 => Self::NoIpv4Found,
            AddressFamily::V6 => Self::NoIpv6Found,
        }
    }
}

/// Request builder errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The selection wants a family the address set does not carry
    #[error("{0} update requested but no {0} address is available")]
    MissingFamily(AddressFamily),
}

/// Provider errors
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider answered with something other than 200
    #[error("provider returned status {status}: {message}")]
    NonSuccessStatus {
        /// HTTP status code
        status: u16,
        /// Plain-text response body
        message: String,
    },

    /// The request never produced an HTTP status (timeout, DNS, TLS, ...)
    #[error("provider request failed: {0}")]
    Transport(String),

    /// The HTTP client could not be constructed
    #[error("cannot build HTTP client: {0}")]
    Client(String),
}

impl ProviderError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a client construction error
    pub fn client(msg: impl Into<String>) -> Self {
        Self::Client(msg.into())
    }
}
