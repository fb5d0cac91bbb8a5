//! Light translator — switched lights and ramped dimmers.

use std::sync::Arc;

use joinbridge_domain::capability::Capabilities;
use joinbridge_domain::device::DeviceState;
use joinbridge_domain::device::light::{DEFAULT_TRANSITION_SECS, LightConfig, LightKind, LightState};
use joinbridge_domain::error::{BridgeError, InvalidArgumentError};
use joinbridge_domain::scaling::{ANALOG_MAX, brightness_from_raw, brightness_to_raw};

use crate::capabilities::{Device, Light};
use crate::ports::Gateway;
use crate::signal::Signals;
use crate::transition::{Ramp, RampOutcome};

/// Longest accepted transition, in seconds.
pub const MAX_TRANSITION_SECS: f64 = 3600.0;

pub struct LightDevice<G> {
    config: LightConfig,
    signals: Signals<G>,
    ramp: Ramp,
}

fn check_transition(transition: Option<f64>) -> Result<Option<f64>, InvalidArgumentError> {
    transition
        .map(|secs| InvalidArgumentError::check_range("transition", secs, 0.0, MAX_TRANSITION_SECS))
        .transpose()
}

impl<G: Gateway> LightDevice<G> {
    pub fn new(config: LightConfig, gateway: Arc<G>) -> Self {
        Self {
            config,
            signals: Signals::new(gateway),
            ramp: Ramp::default(),
        }
    }

    async fn ramp_to(&self, target: u16, duration_secs: f64) {
        let join = self.config.analog_join();
        let outcome = self
            .ramp
            .run(self.signals.gateway(), join, target, duration_secs)
            .await;
        if outcome == RampOutcome::Superseded {
            tracing::debug!(device = %self.config.name, "transition superseded by a newer command");
        }
    }
}

impl<G: Gateway> Device for LightDevice<G> {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn unique_id(&self) -> String {
        self.config.unique_id()
    }

    fn capabilities(&self) -> Capabilities {
        self.config.capabilities()
    }

    fn is_available(&self) -> bool {
        self.signals.is_available()
    }

    fn state(&self) -> DeviceState {
        DeviceState::Light(LightState {
            on: self.is_on(),
            brightness: self.brightness(),
        })
    }
}

impl<G: Gateway> Light for LightDevice<G> {
    fn is_on(&self) -> bool {
        match self.config.kind {
            LightKind::OnOff => self.signals.digital(self.config.digital_join()),
            LightKind::Brightness => self.brightness().is_some_and(|level| level > 0),
        }
    }

    fn brightness(&self) -> Option<u8> {
        match self.config.kind {
            LightKind::OnOff => None,
            LightKind::Brightness => Some(brightness_from_raw(
                self.signals.analog(self.config.analog_join()),
            )),
        }
    }

    async fn turn_on(&self, brightness: Option<u8>, transition: Option<f64>) -> Result<(), BridgeError> {
        let transition = check_transition(transition)?;
        tracing::info!(device = %self.config.name, ?brightness, ?transition, "turn light on");
        match self.config.kind {
            LightKind::OnOff => {
                self.signals.set_digital(self.config.digital_join(), true);
            }
            LightKind::Brightness => match (brightness, transition) {
                (None, transition) => {
                    self.ramp_to(ANALOG_MAX, transition.unwrap_or(DEFAULT_TRANSITION_SECS))
                        .await;
                }
                (Some(level), None) => {
                    self.ramp_to(brightness_to_raw(level), 0.0).await;
                }
                (Some(level), Some(secs)) => {
                    self.ramp_to(brightness_to_raw(level), secs).await;
                }
            },
        }
        Ok(())
    }

    async fn turn_off(&self, transition: Option<f64>) -> Result<(), BridgeError> {
        let transition = check_transition(transition)?;
        tracing::info!(device = %self.config.name, ?transition, "turn light off");
        match self.config.kind {
            LightKind::OnOff => {
                self.signals.set_digital(self.config.digital_join(), false);
            }
            LightKind::Brightness => {
                self.ramp_to(0, transition.unwrap_or(DEFAULT_TRANSITION_SECS))
                    .await;
            }
        }
        Ok(())
    }
}
