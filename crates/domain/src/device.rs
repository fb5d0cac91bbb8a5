//! Device — a semantic view over a set of joins.
//!
//! Each device kind has a configuration (which joins back which roles), a
//! derived-state snapshot type, and the pure rules that turn join values into
//! that state or into the sequence of writes a command needs.

pub mod button;
pub mod climate;
pub mod cover;
pub mod elevator;
pub mod light;
pub mod media_player;
pub mod switch;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::error::{BridgeError, ValidationError};

use self::button::ButtonConfig;
use self::climate::{ClimateConfig, ClimateState};
use self::cover::{CoverConfig, CoverState};
use self::elevator::{ElevatorConfig, ElevatorState};
use self::light::{LightConfig, LightState};
use self::media_player::{MediaPlayerConfig, MediaPlayerState};
use self::switch::{SwitchConfig, SwitchState};

/// The kind of device a configuration describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Climate,
    Cover,
    Elevator,
    Light,
    Switch,
    MediaPlayer,
    Button,
}

/// Role → join mapping for one device, tagged by `platform`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum DeviceConfig {
    Climate(ClimateConfig),
    Cover(CoverConfig),
    Elevator(ElevatorConfig),
    Light(LightConfig),
    Switch(SwitchConfig),
    MediaPlayer(MediaPlayerConfig),
    Button(ButtonConfig),
}

impl DeviceConfig {
    /// Human-readable device name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Climate(c) => &c.name,
            Self::Cover(c) => &c.name,
            Self::Elevator(c) => &c.name,
            Self::Light(c) => &c.name,
            Self::Switch(c) => &c.name,
            Self::MediaPlayer(c) => &c.name,
            Self::Button(c) => &c.name,
        }
    }

    /// The kind of device this configuration builds.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Climate(_) => DeviceKind::Climate,
            Self::Cover(_) => DeviceKind::Cover,
            Self::Elevator(_) => DeviceKind::Elevator,
            Self::Light(_) => DeviceKind::Light,
            Self::Switch(_) => DeviceKind::Switch,
            Self::MediaPlayer(_) => DeviceKind::MediaPlayer,
            Self::Button(_) => DeviceKind::Button,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] when the name is empty.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.name().trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Validate every configuration and check that names are unique.
///
/// # Errors
///
/// Returns the first [`BridgeError::Validation`] encountered.
pub fn validate_all(configs: &[DeviceConfig]) -> Result<(), BridgeError> {
    let mut seen = HashSet::new();
    for config in configs {
        config.validate()?;
        if !seen.insert(config.name()) {
            return Err(ValidationError::DuplicateName(config.name().to_string()).into());
        }
    }
    Ok(())
}

/// Derived state of any device, tagged by kind for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceState {
    Climate(ClimateState),
    Cover(CoverState),
    Elevator(ElevatorState),
    Light(LightState),
    Switch(SwitchState),
    MediaPlayer(MediaPlayerState),
    Button,
}

/// Everything a host needs to render a device at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    pub name: String,
    pub unique_id: String,
    /// `false` means `state` is stale and must not be shown as live.
    pub available: bool,
    pub capabilities: Capabilities,
    pub state: DeviceState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::DigitalJoin;

    fn switch(name: &str) -> DeviceConfig {
        DeviceConfig::Switch(SwitchConfig {
            name: name.to_string(),
            join: DigitalJoin::new(1),
            pulsed: false,
            device_class: None,
        })
    }

    #[test]
    fn should_reject_empty_name() {
        let result = switch("  ").validate();
        assert!(matches!(
            result,
            Err(BridgeError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_duplicate_names() {
        let result = validate_all(&[switch("Porch"), switch("Porch")]);
        assert!(matches!(
            result,
            Err(BridgeError::Validation(ValidationError::DuplicateName(name))) if name == "Porch"
        ));
    }

    #[test]
    fn should_accept_distinct_names() {
        assert!(validate_all(&[switch("Porch"), switch("Garage")]).is_ok());
    }

    #[test]
    fn should_deserialize_tagged_config_from_toml() {
        let toml = r"
            platform = 'switch'
            name = 'Fountain'
            join = 14
            pulsed = true
        ";
        let config: DeviceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.kind(), DeviceKind::Switch);
        assert_eq!(config.name(), "Fountain");
    }

    #[test]
    fn should_reject_unknown_platform() {
        let toml = r"
            platform = 'toaster'
            name = 'Breakfast'
        ";
        let result: Result<DeviceConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn should_serialize_state_with_kind_tag() {
        let json = serde_json::to_value(DeviceState::Button).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "button"}));
    }
}
