//! Light — on/off lights on a digital join, dimmers on an analog join.

use serde::{Deserialize, Serialize};

use crate::capability::{Capabilities, Capability};
use crate::join::{AnalogJoin, DigitalJoin};

/// Transition used when a command does not specify one, in seconds.
pub const DEFAULT_TRANSITION_SECS: f64 = 2.0;

/// Signalling variant of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    /// Dimmable; `join` is an analog join.
    Brightness,
    /// Switched; `join` is a digital join.
    #[serde(rename = "onoff")]
    OnOff,
}

/// Join roles of a light.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LightConfig {
    pub name: String,
    pub kind: LightKind,
    pub join: u32,
}

impl LightConfig {
    /// `light-<join>` for dimmers, `toggle-light-<join>` otherwise.
    #[must_use]
    pub fn unique_id(&self) -> String {
        match self.kind {
            LightKind::Brightness => format!("light-{}", self.join),
            LightKind::OnOff => format!("toggle-light-{}", self.join),
        }
    }

    #[must_use]
    pub fn analog_join(&self) -> AnalogJoin {
        AnalogJoin::new(self.join)
    }

    #[must_use]
    pub fn digital_join(&self) -> DigitalJoin {
        DigitalJoin::new(self.join)
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::from([Capability::TurnOn, Capability::TurnOff]);
        if self.kind == LightKind::Brightness {
            caps.extend([Capability::Brightness, Capability::Transition]);
        }
        caps
    }
}

/// Derived light state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LightState {
    pub on: bool,
    /// 0–255; only dimmers report a brightness.
    pub brightness: Option<u8>,
}
