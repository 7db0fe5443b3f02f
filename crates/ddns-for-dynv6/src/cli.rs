//! Command-line surface
//!
//! Two modes: `-c/--config <path>` or `--hostname <h> --token <t> [-4] [-6]`.
//!
//! An explicit `-c` wins over hostname and token, which may also arrive
//! through `DYNV6_HOSTNAME` / `DYNV6_TOKEN`. Clap treats env values as
//! present when checking conflicts, so only the env-free flags conflict
//! with `-c` and the rest is settled in [`Cli::selection`].

use clap::{ArgAction, Parser};
use dynv6_core::config::DEFAULT_CONFIG_PATH;
use dynv6_core::error::ConfigError;
use dynv6_core::{ConfigFile, UpdateSelection};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::Level;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "ddns_for_dynv6.log";

/// Update a dynv6 DNS record to point at this machine's IPv4 and/or IPv6 address
#[derive(Debug, Parser)]
#[command(name = "ddns-for-dynv6", version, disable_version_flag = true)]
pub struct Cli {
    /// Run from a JSON config file (a template is written if it does not exist);
    /// hostname and token settings are ignored in this mode
    #[arg(
        short,
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_CONFIG_PATH,
        conflicts_with_all = ["ipv4", "ipv6"]
    )]
    pub config: Option<PathBuf>,

    /// Hostname to update
    #[arg(long, env = "DYNV6_HOSTNAME")]
    pub hostname: Option<String>,

    /// dynv6 HTTP token bound to the hostname
    #[arg(long, env = "DYNV6_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Update the IPv4 address
    #[arg(short = '4', long)]
    pub ipv4: bool,

    /// Update the IPv6 address
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// Only take addresses from this network interface
    #[arg(short, long, value_name = "NAME")]
    pub interface: Option<String>,

    /// Print the discovered IPv4 address and exit
    #[arg(long, conflicts_with = "show_ipv6")]
    pub show_ipv4: bool,

    /// Print the discovered IPv6 address and exit
    #[arg(long)]
    pub show_ipv6: bool,

    /// HTTP timeout for the update call, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: u64,

    /// Append log records to this file
    #[arg(long, value_name = "PATH", env = "DYNV6_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", env = "DYNV6_LOG_LEVEL", default_value = "info")]
    pub log_level: Level,

    /// Print version information and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl Cli {
    /// Parse the process arguments, accepting the legacy `-hostname` /
    /// `-token` spellings
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// Assemble the update selection from whichever mode was used
    pub fn selection(&self) -> Result<UpdateSelection, ConfigError> {
        if let Some(path) = &self.config {
            return ConfigFile::load_or_template(path)?.into_selection();
        }

        match (&self.hostname, &self.token) {
            (Some(hostname), Some(token)) => {
                UpdateSelection::new(hostname, token, self.ipv4, self.ipv6)
            }
            _ => Err(ConfigError::invalid(
                "either --config <PATH> or both --hostname and --token are required",
            )),
        }
    }
}

/// Rewrite single-dash long options into their double-dash form
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    const LEGACY: [&str; 2] = ["hostname", "token"];

    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else { return arg };
            for name in LEGACY {
                let single = format!("-{name}");
                if text == single || text.starts_with(&format!("{single}=")) {
                    return OsString::from(format!("-{text}"));
                }
            }
            arg
        })
        .collect()
}
