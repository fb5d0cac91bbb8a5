//! Daemon configuration: `joinbridge.toml` plus `JOINBRIDGE_*` overrides.
//!
//! The file is optional and every table has defaults. Device entries are
//! `[[devices]]` tables tagged by `platform`, deserialized straight into
//! [`DeviceConfig`]. Environment variables win over the file.

use serde::Deserialize;

use joinbridge_domain::device::{DeviceConfig, validate_all};
use joinbridge_domain::error::BridgeError;

const CONFIG_FILE: &str = "joinbridge.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub gateway: GatewayConfig,
    pub devices: Vec<DeviceConfig>,
}

/// HTTP listener.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Log filter in `RUST_LOG` syntax.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

/// Simulated control processor.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Push every command write back as feedback, as a processor program
    /// that loops command joins onto their feedback joins would.
    pub echo: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=debug".to_string(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { echo: true }
    }
}

impl Config {
    /// Read [`CONFIG_FILE`] from the working directory, apply the process
    /// environment and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or
    /// when the merged configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::read(CONFIG_FILE)?;
        config.override_with(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn read(path: &str) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(toml::from_str(&content)?)
    }

    /// Apply `JOINBRIDGE_*` variables, then `RUST_LOG`, as returned by `lookup`.
    ///
    /// Unparsable ports are ignored.
    fn override_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("JOINBRIDGE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("JOINBRIDGE_PORT").and_then(|port| port.parse().ok()) {
            self.server.port = port;
        }
        if let Some(bind) = lookup("JOINBRIDGE_BIND")
            && let Some((host, port)) = bind.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(filter) = lookup("RUST_LOG").or_else(|| lookup("JOINBRIDGE_LOG")) {
            self.logging.filter = filter;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        validate_all(&self.devices).map_err(ConfigError::Devices)
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A `[[devices]]` entry violates a device invariant.
    #[error("invalid device configuration")]
    Devices(#[source] BridgeError),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use joinbridge_domain::device::DeviceKind;
    use joinbridge_domain::error::ValidationError;

    fn overridden(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut config = Config::default();
        config.override_with(|name| vars.get(name).cloned());
        config
    }

    #[test]
    fn should_listen_on_port_3000_with_echo_by_default() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert!(config.gateway.echo);
        assert!(config.devices.is_empty());
    }

    #[test]
    fn should_fall_back_to_defaults_when_file_is_missing() {
        let config = Config::read("does-not-exist.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_devices_tagged_by_platform() {
        let config: Config = toml::from_str(
            "
            [server]
            port = 9090

            [gateway]
            echo = false

            [[devices]]
            platform = 'switch'
            name = 'Pump'
            join = 12
            pulsed = true

            [[devices]]
            platform = 'light'
            name = 'Kitchen'
            kind = 'brightness'
            join = 3

            [[devices]]
            platform = 'button'
            name = 'Doorbell'
            join = 40
            ",
        )
        .unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
        assert!(!config.gateway.echo);
        let kinds: Vec<_> = config.devices.iter().map(DeviceConfig::kind).collect();
        assert_eq!(
            kinds,
            vec![DeviceKind::Switch, DeviceKind::Light, DeviceKind::Button]
        );
    }

    #[test]
    fn should_reject_unknown_platform() {
        let result: Result<Config, _> = toml::from_str(
            "
            [[devices]]
            platform = 'toaster'
            name = 'Toast'
            ",
        );
        assert!(result.is_err());
    }

    #[test]
    fn should_override_bind_address_from_environment() {
        let config = overridden(&[("JOINBRIDGE_BIND", "127.0.0.1:8123")]);
        assert_eq!(config.bind_addr(), "127.0.0.1:8123");
    }

    #[test]
    fn should_ignore_unparsable_port() {
        let config = overridden(&[("JOINBRIDGE_HOST", "10.0.0.2"), ("JOINBRIDGE_PORT", "http")]);
        assert_eq!(config.bind_addr(), "10.0.0.2:3000");
    }

    #[test]
    fn should_prefer_rust_log_over_joinbridge_log() {
        let config = overridden(&[("JOINBRIDGE_LOG", "info"), ("RUST_LOG", "trace")]);
        assert_eq!(config.logging.filter, "trace");

        let config = overridden(&[("JOINBRIDGE_LOG", "debug")]);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_reject_zero_port() {
        let config = overridden(&[("JOINBRIDGE_PORT", "0")]);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_duplicate_device_names() {
        let config: Config = toml::from_str(
            "
            [[devices]]
            platform = 'button'
            name = 'Bell'
            join = 1

            [[devices]]
            platform = 'button'
            name = 'Bell'
            join = 2
            ",
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Devices(BridgeError::Validation(
                ValidationError::DuplicateName(ref name)
            ))) if name == "Bell"
        ));
    }
}
