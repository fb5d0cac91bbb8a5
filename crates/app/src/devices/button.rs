//! Button translator.

use std::sync::Arc;

use joinbridge_domain::capability::Capabilities;
use joinbridge_domain::device::DeviceState;
use joinbridge_domain::device::button::ButtonConfig;
use joinbridge_domain::error::BridgeError;

use crate::capabilities::{Button, Device};
use crate::ports::Gateway;
use crate::signal::{SHORT_PULSE, Signals};

pub struct ButtonDevice<G> {
    config: ButtonConfig,
    signals: Signals<G>,
}

impl<G: Gateway> ButtonDevice<G> {
    pub fn new(config: ButtonConfig, gateway: Arc<G>) -> Self {
        Self {
            config,
            signals: Signals::new(gateway),
        }
    }
}

impl<G: Gateway> Device for ButtonDevice<G> {
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
        DeviceState::Button
    }
}

impl<G: Gateway> Button for ButtonDevice<G> {
    async fn press(&self) -> Result<(), BridgeError> {
        tracing::info!(device = %self.config.name, "press");
        self.signals.pulse(self.config.join, SHORT_PULSE).await;
        Ok(())
    }
}
