//! Switch — a single digital join, held at a level or toggled by pulses.

use serde::{Deserialize, Serialize};

use crate::capability::{Capabilities, Capability};
use crate::join::DigitalJoin;

/// Join roles of a switch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwitchConfig {
    pub name: String,
    pub join: DigitalJoin,
    /// The join toggles the load on every pulse instead of following a level.
    #[serde(default)]
    pub pulsed: bool,
    pub device_class: Option<String>,
}

impl SwitchConfig {
    /// `switch-<join>`.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("switch-{}", self.join.number())
    }

    /// Configured device class, `"switch"` when unset.
    #[must_use]
    pub fn device_class(&self) -> &str {
        self.device_class.as_deref().unwrap_or("switch")
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::from([Capability::TurnOn, Capability::TurnOff])
    }
}

/// Derived switch state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchState {
    pub on: bool,
    pub device_class: String,
}
