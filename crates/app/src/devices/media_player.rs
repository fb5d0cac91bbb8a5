//! Media player translator — power, mute, volume and source selection for
//! an audio zone.

use std::sync::Arc;

use joinbridge_domain::capability::Capabilities;
use joinbridge_domain::device::DeviceState;
use joinbridge_domain::device::media_player::{MediaPlayerConfig, MediaPlayerState};
use joinbridge_domain::error::{BridgeError, InvalidArgumentError};
use joinbridge_domain::scaling::{volume_from_raw, volume_to_raw};

use crate::capabilities::{Device, MediaPlayer};
use crate::ports::Gateway;
use crate::signal::{SHORT_PULSE, Signals};

pub struct MediaPlayerDevice<G> {
    config: MediaPlayerConfig,
    signals: Signals<G>,
}

impl<G: Gateway> MediaPlayerDevice<G> {
    pub fn new(config: MediaPlayerConfig, gateway: Arc<G>) -> Self {
        Self {
            config,
            signals: Signals::new(gateway),
        }
    }
}

impl<G: Gateway> Device for MediaPlayerDevice<G> {
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
        DeviceState::MediaPlayer(MediaPlayerState {
            on: self.is_on(),
            muted: self.is_muted(),
            volume: self.volume(),
            source: self.source(),
            source_list: self.config.source_list(),
        })
    }
}

impl<G: Gateway> MediaPlayer for MediaPlayerDevice<G> {
    fn is_on(&self) -> bool {
        self.signals.digital(self.config.off_join)
    }

    fn is_muted(&self) -> bool {
        self.signals.digital(self.config.mute_join)
    }

    fn volume(&self) -> f64 {
        volume_from_raw(self.signals.analog(self.config.volume_join))
    }

    fn source(&self) -> Option<String> {
        let code = self.signals.analog(self.config.source_join);
        self.config.source_name(code).map(str::to_string)
    }

    async fn turn_on(&self) -> Result<(), BridgeError> {
        tracing::info!(device = %self.config.name, "power on");
        if self.config.pulsed_power_on {
            self.signals.pulse(self.config.on_join, SHORT_PULSE).await;
        } else {
            self.signals.set_digital(self.config.on_join, true);
        }
        Ok(())
    }

    async fn turn_off(&self) -> Result<(), BridgeError> {
        tracing::info!(device = %self.config.name, "power off");
        self.signals.pulse(self.config.off_join, SHORT_PULSE).await;
        Ok(())
    }

    async fn mute(&self, muted: bool) -> Result<(), BridgeError> {
        self.signals.set_digital(self.config.mute_join, muted);
        Ok(())
    }

    async fn set_volume(&self, level: f64) -> Result<(), BridgeError> {
        let raw = volume_to_raw(level)?;
        self.signals.set_analog(self.config.volume_join, raw);
        Ok(())
    }

    async fn volume_up(&self) -> Result<(), BridgeError> {
        self.signals
            .pulse(self.config.volume_up_join, SHORT_PULSE)
            .await;
        Ok(())
    }

    async fn volume_down(&self) -> Result<(), BridgeError> {
        self.signals
            .pulse(self.config.volume_down_join, SHORT_PULSE)
            .await;
        Ok(())
    }

    async fn select_source(&self, source: &str) -> Result<(), BridgeError> {
        let code = self
            .config
            .source_code(source)
            .ok_or_else(|| InvalidArgumentError::UnknownSource(source.to_string()))?;
        tracing::info!(device = %self.config.name, source, code, "select source");
        self.signals.set_analog(self.config.source_join, code);
        Ok(())
    }
}
