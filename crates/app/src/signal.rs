//! Signal helpers shared by every translator.
//!
//! Roles are optional: a device whose configuration leaves a role unset holds
//! `None` for it. Reads of an unset role return `None` so callers can tell
//! "absent" from a live `false`/`0`, and writes to an unset role are skipped.

use std::sync::Arc;
use std::time::Duration;

use joinbridge_domain::join::{AnalogJoin, DigitalJoin};

use crate::ports::Gateway;

/// Pulse width used by switches, buttons, media keys and the elevator.
pub const SHORT_PULSE: Duration = Duration::from_millis(50);

/// Pulse width used by digital covers.
pub const COVER_PULSE: Duration = Duration::from_millis(200);

/// Cheaply cloneable access to the gateway with optional-role semantics.
pub struct Signals<G> {
    gateway: Arc<G>,
}

impl<G> Clone for Signals<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<G: Gateway> Signals<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// The underlying gateway.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.gateway.is_available()
    }

    #[must_use]
    pub fn digital(&self, join: DigitalJoin) -> bool {
        self.gateway.read_digital(join)
    }

    #[must_use]
    pub fn analog(&self, join: AnalogJoin) -> u16 {
        self.gateway.read_analog(join)
    }

    /// Value of an optional digital role.
    #[must_use]
    pub fn digital_role(&self, join: Option<DigitalJoin>) -> Option<bool> {
        join.map(|join| self.gateway.read_digital(join))
    }

    /// Value of an optional analog role.
    #[must_use]
    pub fn analog_role(&self, join: Option<AnalogJoin>) -> Option<u16> {
        join.map(|join| self.gateway.read_analog(join))
    }

    pub fn set_digital(&self, join: DigitalJoin, value: bool) {
        tracing::debug!(%join, value, "write digital");
        self.gateway.write_digital(join, value);
    }

    pub fn set_analog(&self, join: AnalogJoin, value: u16) {
        tracing::debug!(%join, value, "write analog");
        self.gateway.write_analog(join, value);
    }

    /// Write an optional analog role, skipping it when unset.
    pub fn set_analog_role(&self, join: Option<AnalogJoin>, value: u16) {
        if let Some(join) = join {
            self.set_analog(join, value);
        }
    }

    /// Assert `join` for `width`, then release it.
    pub async fn pulse(&self, join: DigitalJoin, width: Duration) {
        tracing::debug!(%join, width_ms = width.as_millis(), "pulse");
        self.gateway.pulse(join, width).await;
    }

    /// Drive `join` to `value`, held or pulsed.
    ///
    /// A pulse toggles the load regardless of direction, so when `pulsed` the
    /// pulse is only issued if the observed level differs from `value`.
    pub async fn set_level(&self, join: DigitalJoin, value: bool, pulsed: bool) {
        if pulsed && self.gateway.read_digital(join) == value {
            tracing::debug!(%join, value, "level already reached, pulse skipped");
            return;
        }
        tracing::debug!(%join, value, pulsed, "set level");
        self.gateway.write_digital_pulsed(join, value, pulsed).await;
    }
}
