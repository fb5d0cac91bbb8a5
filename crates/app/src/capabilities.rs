//! Capability interfaces, one per device kind.
//!
//! Hosts program against these traits; each translator in
//! [`devices`](crate::devices) implements [`Device`] plus the trait of its kind.
//! Reads derive state from the gateway on every call. Commands validate
//! their arguments before touching any join and return once every write,
//! pulse and ramp tick they issue has completed.

use std::future::Future;

use joinbridge_domain::capability::Capabilities;
use joinbridge_domain::device::climate::{FanMode, HvacAction, HvacMode};
use joinbridge_domain::device::elevator::ElevatorPosition;
use joinbridge_domain::device::{DeviceSnapshot, DeviceState};
use joinbridge_domain::error::BridgeError;

/// Behaviour common to every device.
pub trait Device {
    fn name(&self) -> &str;

    fn unique_id(&self) -> String;

    /// Features backed by configured joins. Fixed for the device's lifetime.
    fn capabilities(&self) -> Capabilities;

    /// Whether the gateway is connected; when `false` [`state`](Self::state)
    /// is stale.
    fn is_available(&self) -> bool;

    /// State derived from the current join values.
    fn state(&self) -> DeviceState;

    /// Name, capabilities, availability and state in one value.
    fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            name: self.name().to_string(),
            unique_id: self.unique_id(),
            available: self.is_available(),
            capabilities: self.capabilities(),
            state: self.state(),
        }
    }
}

/// Requested setpoints for [`Climate::set_temperature`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureRequest {
    /// Setpoint for the current single mode (heat or cool).
    pub target: Option<f64>,
    /// Heat setpoint of a range.
    pub low: Option<f64>,
    /// Cool setpoint of a range.
    pub high: Option<f64>,
}

pub trait Climate: Device {
    fn hvac_mode(&self) -> HvacMode;

    fn hvac_action(&self) -> HvacAction;

    fn fan_mode(&self) -> Option<FanMode>;

    fn set_hvac_mode(&self, mode: HvacMode) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn set_fan_mode(&self, mode: FanMode) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn set_temperature(
        &self,
        request: TemperatureRequest,
    ) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn turn_on(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn turn_off(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;
}

pub trait Cover: Device {
    fn is_opening(&self) -> bool;

    fn is_closing(&self) -> bool;

    /// `None` when closed-ness is unknown.
    fn is_closed(&self) -> Option<bool>;

    /// Percent open, for covers that report a position.
    fn position(&self) -> Option<f64>;

    fn open(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn close(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn stop(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn set_position(&self, percent: f64) -> impl Future<Output = Result<(), BridgeError>> + Send;
}

pub trait Elevator: Device {
    fn position(&self) -> ElevatorPosition;

    fn move_up(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn move_down(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn stop(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;
}

pub trait Light: Device {
    fn is_on(&self) -> bool;

    /// 0–255, for dimmable lights.
    fn brightness(&self) -> Option<u8>;

    /// Turn on, optionally to `brightness` and over `transition` seconds.
    fn turn_on(
        &self,
        brightness: Option<u8>,
        transition: Option<f64>,
    ) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn turn_off(&self, transition: Option<f64>)
    -> impl Future<Output = Result<(), BridgeError>> + Send;
}

pub trait Switch: Device {
    fn is_on(&self) -> bool;

    fn turn_on(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn turn_off(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;
}

pub trait MediaPlayer: Device {
    fn is_on(&self) -> bool;

    fn is_muted(&self) -> bool;

    /// 0.0–1.0.
    fn volume(&self) -> f64;

    fn source(&self) -> Option<String>;

    fn turn_on(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn turn_off(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn mute(&self, muted: bool) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn set_volume(&self, level: f64) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn volume_up(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn volume_down(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;

    fn select_source(&self, source: &str) -> impl Future<Output = Result<(), BridgeError>> + Send;
}

pub trait Button: Device {
    fn press(&self) -> impl Future<Output = Result<(), BridgeError>> + Send;
}
