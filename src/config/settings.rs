//! Application settings loaded from config.toml
//!
//! The file is optional. It can set the API bind address and event buffer size,
//! and list outcomes and outputs to seed on first run. Environment variables
//! (`API_BIND_ADDR`) take precedence over the file.

use crate::errors::{Error, Result};
use crate::events::DEFAULT_EVENT_CAPACITY;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Default API listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Whole config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Event bus settings
    #[serde(default)]
    pub events: EventSettings,
    /// Outcomes to create on first run
    #[serde(default)]
    pub outcomes: Vec<OutcomeSeed>,
    /// Outputs to create on first run
    #[serde(default)]
    pub outputs: Vec<OutputSeed>,
}

/// `[server]` section
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// Address the REST API listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

/// `[events]` section
#[derive(Debug, Deserialize)]
pub struct EventSettings {
    /// Buffered events per subscriber
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

const fn default_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

/// `[[outcomes]]` entry
#[derive(Debug, Deserialize, Clone)]
pub struct OutcomeSeed {
    /// Outcome name (seeding skips names that already exist)
    pub name: String,
    /// Optional unit label
    #[serde(default)]
    pub unit: Option<String>,
    /// Starting value
    pub beginning_value: f64,
    /// Current value, defaults to the beginning value
    #[serde(default)]
    pub current_value: Option<f64>,
    /// Target value
    pub target_value: f64,
    /// Priority weight
    #[serde(default)]
    pub points: f64,
}

/// `[[outputs]]` entry
#[derive(Debug, Deserialize, Clone)]
pub struct OutputSeed {
    /// Output name (seeding skips names that already exist)
    pub name: String,
    /// Optional unit label
    #[serde(default)]
    pub unit: Option<String>,
    /// Starting value
    pub beginning_value: f64,
    /// Target value
    pub target_value: f64,
}

impl Settings {
    /// Address to bind, with `API_BIND_ADDR` overriding the file.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        std::env::var("API_BIND_ADDR").unwrap_or_else(|_| self.server.bind_addr.clone())
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_settings(&contents)
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads ./config.toml, falling back to defaults when the file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if !path.exists() {
        info!("No {} found, using default settings.", DEFAULT_CONFIG_PATH);
        return Ok(Settings::default());
    }
    load_settings(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            [server]
            bind_addr = "0.0.0.0:9000"

            [events]
            capacity = 32

            [[outcomes]]
            name = "Monthly revenue"
            unit = "USD"
            beginning_value = 10000.0
            target_value = 25000.0
            points = 5.0

            [[outputs]]
            name = "Sales calls"
            beginning_value = 0.0
            target_value = 200.0
        "#;

        let settings = parse_settings(toml_str).unwrap();
        assert_eq!(settings.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(settings.events.capacity, 32);
        assert_eq!(settings.outcomes.len(), 1);
        assert_eq!(settings.outcomes[0].name, "Monthly revenue");
        assert_eq!(settings.outcomes[0].current_value, None);
        assert_eq!(settings.outputs[0].target_value, 200.0);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.server.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.events.capacity, DEFAULT_EVENT_CAPACITY);
        assert!(settings.outcomes.is_empty());
        assert!(settings.outputs.is_empty());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = parse_settings("[[outcomes]]\nname = 3");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_settings("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
