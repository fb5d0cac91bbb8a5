//! Switch translator.

use std::sync::Arc;

use joinbridge_domain::capability::Capabilities;
use joinbridge_domain::device::DeviceState;
use joinbridge_domain::device::switch::{SwitchConfig, SwitchState};
use joinbridge_domain::error::BridgeError;

use crate::capabilities::{Device, Switch};
use crate::ports::Gateway;
use crate::signal::Signals;

pub struct SwitchDevice<G> {
    config: SwitchConfig,
    signals: Signals<G>,
}

impl<G: Gateway> SwitchDevice<G> {
    pub fn new(config: SwitchConfig, gateway: Arc<G>) -> Self {
        Self {
            config,
            signals: Signals::new(gateway),
        }
    }

    async fn drive(&self, on: bool) {
        tracing::info!(device = %self.config.name, on, pulsed = self.config.pulsed, "switch");
        self.signals
            .set_level(self.config.join, on, self.config.pulsed)
            .await;
    }
}

impl<G: Gateway> Device for SwitchDevice<G> {
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
        DeviceState::Switch(SwitchState {
            on: self.is_on(),
            device_class: self.config.device_class().to_string(),
        })
    }
}

impl<G: Gateway> Switch for SwitchDevice<G> {
    fn is_on(&self) -> bool {
        self.signals.digital(self.config.join)
    }

    async fn turn_on(&self) -> Result<(), BridgeError> {
        self.drive(true).await;
        Ok(())
    }

    async fn turn_off(&self) -> Result<(), BridgeError> {
        self.drive(false).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SHORT_PULSE;
    use crate::testing::{FakeGateway, Write};
    use joinbridge_domain::join::DigitalJoin;

    const JOIN: u32 = 5;

    fn device(pulsed: bool) -> (Arc<FakeGateway>, SwitchDevice<FakeGateway>) {
        let gateway = Arc::new(FakeGateway::default());
        let config = SwitchConfig {
            name: "Fountain".to_string(),
            join: DigitalJoin::new(JOIN),
            pulsed,
            device_class: Some("outlet".to_string()),
        };
        let device = SwitchDevice::new(config, Arc::clone(&gateway));
        (gateway, device)
    }

    #[tokio::test(start_paused = true)]
    async fn should_hold_level_when_maintained() {
        let (gateway, device) = device(false);

        device.turn_on().await.unwrap();
        assert!(device.is_on());
        device.turn_on().await.unwrap();
        device.turn_off().await.unwrap();
        assert!(!device.is_on());

        assert_eq!(gateway.writes().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_pulse_when_already_on() {
        let (gateway, device) = device(true);
        gateway.set_digital(JOIN, true);

        device.turn_on().await.unwrap();

        assert!(gateway.writes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_emit_short_pulse_when_state_differs() {
        let (gateway, device) = device(true);

        device.turn_on().await.unwrap();

        let writes = gateway.writes();
        let [
            Write::Digital {
                value: true,
                at: start,
                ..
            },
            Write::Digital {
                value: false,
                at: end,
                ..
            },
        ] = writes.as_slice()
        else {
            panic!("expected a single pulse, got {writes:?}");
        };
        assert_eq!(*end - *start, SHORT_PULSE);
    }

    #[test]
    fn should_report_configured_device_class() {
        let (gateway, device) = device(false);
        gateway.set_digital(JOIN, true);
        assert_eq!(
            device.state(),
            DeviceState::Switch(SwitchState {
                on: true,
                device_class: "outlet".to_string(),
            })
        );
    }
}
