//! Capability flags advertised by a device.
//!
//! A device's capability set is derived once from which optional roles are
//! configured. It is a set: enabling the same capability through two roles
//! exposes it once.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A single feature a device may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    TurnOn,
    TurnOff,
    TargetTemperature,
    TargetTemperatureRange,
    FanMode,
    Open,
    Close,
    SetPosition,
    Stop,
    Brightness,
    Transition,
    VolumeMute,
    VolumeSet,
    VolumeStep,
    SelectSource,
    Press,
}

/// Deduplicated, ordered set of capabilities.
pub type Capabilities = BTreeSet<Capability>;
