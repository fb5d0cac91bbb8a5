//! Cover translator — analog shades and pulse-driven shades/curtains.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use joinbridge_domain::capability::Capabilities;
use joinbridge_domain::device::DeviceState;
use joinbridge_domain::device::cover::{CoverConfig, CoverState, DigitalCoverSignals, Motion};
use joinbridge_domain::error::{BridgeError, MissingRoleError};
use joinbridge_domain::join::DigitalJoin;
use joinbridge_domain::scaling::{ANALOG_MAX, position_from_raw, position_to_raw};

use crate::capabilities::{Cover, Device};
use crate::ports::Gateway;
use crate::signal::{COVER_PULSE, Signals};

pub struct CoverDevice<G> {
    config: CoverConfig,
    signals: Signals<G>,
    /// Set by a stop command, cleared by the next open/close/position command.
    manual_stop: AtomicBool,
}

impl<G: Gateway> CoverDevice<G> {
    pub fn new(config: CoverConfig, gateway: Arc<G>) -> Self {
        Self {
            config,
            signals: Signals::new(gateway),
            manual_stop: AtomicBool::new(false),
        }
    }

    fn digital_signals(&self) -> DigitalCoverSignals {
        DigitalCoverSignals {
            opening: self.signals.digital(self.config.is_opening_join),
            closing: self.signals.digital(self.config.is_closing_join),
            moving: self.signals.digital_role(self.config.is_moving_join),
        }
    }

    fn motion(&self) -> Motion {
        if self.config.is_digital() {
            self.digital_signals().motion()
        } else {
            Motion::resolve(
                self.signals.digital(self.config.is_opening_join),
                self.signals.digital(self.config.is_closing_join),
            )
        }
    }

    fn missing(&self, role: &'static str) -> MissingRoleError {
        MissingRoleError {
            device: self.config.name.clone(),
            role,
        }
    }

    fn require(
        &self,
        join: Option<DigitalJoin>,
        role: &'static str,
    ) -> Result<DigitalJoin, MissingRoleError> {
        join.ok_or_else(|| self.missing(role))
    }

    fn write_position(&self, raw: u16) -> Result<(), BridgeError> {
        let join = self
            .config
            .position_join
            .ok_or_else(|| self.missing("position"))?;
        self.manual_stop.store(false, Ordering::SeqCst);
        self.signals.set_analog(join, raw);
        Ok(())
    }
}

impl<G: Gateway> Device for CoverDevice<G> {
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
        let motion = self.motion();
        DeviceState::Cover(CoverState {
            class: self.config.class(),
            opening: motion.opening,
            closing: motion.closing,
            closed: self.is_closed(),
            position: self.position(),
        })
    }
}

impl<G: Gateway> Cover for CoverDevice<G> {
    fn is_opening(&self) -> bool {
        self.motion().opening
    }

    fn is_closing(&self) -> bool {
        self.motion().closing
    }

    fn is_closed(&self) -> Option<bool> {
        if self.config.is_digital() {
            self.digital_signals()
                .closed(self.manual_stop.load(Ordering::SeqCst))
        } else if let Some(closed) = self.signals.digital_role(self.config.is_closed_join) {
            Some(closed)
        } else {
            self.position().map(|position| position <= 0.0)
        }
    }

    fn position(&self) -> Option<f64> {
        if self.config.is_digital() {
            return None;
        }
        self.signals
            .analog_role(self.config.position_join)
            .map(position_from_raw)
    }

    async fn open(&self) -> Result<(), BridgeError> {
        tracing::info!(device = %self.config.name, "open cover");
        if self.config.is_digital() {
            let join = self.require(self.config.open_full_join, "open_full")?;
            self.manual_stop.store(false, Ordering::SeqCst);
            self.signals.pulse(join, COVER_PULSE).await;
            Ok(())
        } else {
            self.write_position(ANALOG_MAX)
        }
    }

    async fn close(&self) -> Result<(), BridgeError> {
        tracing::info!(device = %self.config.name, "close cover");
        if self.config.is_digital() {
            let join = self.require(self.config.close_full_join, "close_full")?;
            self.manual_stop.store(false, Ordering::SeqCst);
            self.signals.pulse(join, COVER_PULSE).await;
            Ok(())
        } else {
            self.write_position(0)
        }
    }

    async fn stop(&self) -> Result<(), BridgeError> {
        tracing::info!(device = %self.config.name, "stop cover");
        self.manual_stop.store(true, Ordering::SeqCst);
        self.signals.pulse(self.config.stop_join, COVER_PULSE).await;
        Ok(())
    }

    async fn set_position(&self, percent: f64) -> Result<(), BridgeError> {
        if self.config.is_digital() || self.config.position_join.is_none() {
            return Err(self.missing("position").into());
        }
        let raw = position_to_raw(percent)?;
        tracing::info!(device = %self.config.name, percent, raw, "set cover position");
        self.write_position(raw)
    }
}
