//! Bulb credentials and address — JSON file in the working directory.

use std::fmt;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, TapoPywalError};

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "config.json";

/// Tapo cloud credentials and the bulb's LAN address.
///
/// All fields are required; nothing is defaulted.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub email: String,
    pub password: String,
    pub device_ip: String,
}

// Keep the password out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("device_ip", &self.device_ip)
            .finish()
    }
}

impl Config {
    /// Default config path (`config.json` in the working directory).
    pub fn path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Load and validate the config from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TapoPywalError::Config(format!(
                    "config file not found at {} (create it with \"email\", \"password\" and \"device_ip\")",
                    path.display()
                ))
            } else {
                TapoPywalError::Config(format!("cannot read {}: {e}", path.display()))
            }
        })?;
        let config = Self::parse(&contents).map_err(|e| match e {
            TapoPywalError::Config(msg) => {
                TapoPywalError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        log::debug!("loaded config from {} ({config:?})", path.display());
        Ok(config)
    }

    /// Parse and validate config JSON.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(contents)
            .map_err(|e| TapoPywalError::Config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is present and the address is an IPv4 literal.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("email", &self.email),
            ("password", &self.password),
            ("device_ip", &self.device_ip),
        ] {
            if value.trim().is_empty() {
                return Err(TapoPywalError::Config(format!("\"{field}\" must not be empty")));
            }
        }
        self.device_addr()?;
        Ok(())
    }

    /// The bulb address parsed as IPv4.
    pub fn device_addr(&self) -> Result<Ipv4Addr> {
        self.device_ip.trim().parse().map_err(|_| {
            TapoPywalError::Config(format!(
                "\"device_ip\" is not an IPv4 address: {}",
                self.device_ip
            ))
        })
    }
}
