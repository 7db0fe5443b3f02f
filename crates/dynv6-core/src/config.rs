//! Configuration file handling
//!
//! The config file is a flat JSON object:
//!
//! ```json
//! {
//!   "hostname": "myhost.dynv6.net",
//!   "ipv4": true,
//!   "ipv6": true,
//!   "token": "your dynv6 token"
//! }
//! ```
//!
//! When the file does not exist a template is written in its place and the
//! caller is told to stop, so an operator can fill it in first.

use crate::error::ConfigError;
use crate::types::UpdateSelection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Default config file name, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Placeholder hostname written into new templates
pub const TEMPLATE_HOSTNAME: &str = "your hostname";

/// Placeholder token written into new templates
pub const TEMPLATE_TOKEN: &str = "your token";

/// On-disk configuration
///
/// Fields are declared in alphabetical order so the written template has
/// sorted keys.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Hostname registered at dynv6
    pub hostname: String,

    /// Push the IPv4 address
    #[serde(default)]
    pub ipv4: bool,

    /// Push the IPv6 address
    #[serde(default)]
    pub ipv6: bool,

    /// dynv6 HTTP token for the hostname
    /// ⚠️ NEVER log this value
    pub token: String,
}

impl ConfigFile {
    /// The template written when no config file exists
    pub fn template() -> Self {
        Self {
            hostname: TEMPLATE_HOSTNAME.to_string(),
            ipv4: true,
            ipv6: true,
            token: TEMPLATE_TOKEN.to_string(),
        }
    }

    /// Read and parse the config file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or write a template there if it does not exist
    ///
    /// Nothing is logged above `DEBUG`; the caller reports the returned error.
    ///
    /// # Returns
    ///
    /// - `Ok(ConfigFile)`: The parsed config
    /// - `Err(ConfigError::TemplateCreated)`: The file was missing and a
    ///   template now exists at `path`
    /// - `Err(ConfigError::Unreadable | Parse | Write)`: Anything else
    pub fn load_or_template(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Self::template().write(path)?;
                debug!("Wrote config template to {}", path.display());
                Err(ConfigError::TemplateCreated(path.to_path_buf()))
            }
            Err(source) => Err(ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write this config to `path` as pretty-printed JSON
    ///
    /// Uses create-new semantics so an existing file is never overwritten.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        use std::io::Write;

        let path = path.as_ref();
        let to_write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;
        json.push('\n');

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(to_write_err)?;
        file.write_all(json.as_bytes()).map_err(to_write_err)?;
        Ok(())
    }

    /// Validate and convert into an [`UpdateSelection`]
    ///
    /// Rejects configs that still carry the template placeholders.
    pub fn into_selection(self) -> Result<UpdateSelection, ConfigError> {
        if self.hostname.trim() == TEMPLATE_HOSTNAME {
            return Err(ConfigError::Placeholder("hostname"));
        }
        if self.token.trim() == TEMPLATE_TOKEN {
            return Err(ConfigError::Placeholder("token"));
        }
        UpdateSelection::new(self.hostname, self.token, self.ipv4, self.ipv6)
    }
}

impl fmt::Debug for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigFile")
            .field("hostname", &self.hostname)
            .field("ipv4", &self.ipv4)
            .field("ipv6", &self.ipv6)
            .field("token", &"<REDACTED>")
            .finish()
    }
}
