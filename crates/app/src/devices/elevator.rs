//! Elevator translator — plans latch and engine pulses from a signal snapshot.

use std::sync::{Arc, Mutex, PoisonError};

use joinbridge_domain::capability::Capabilities;
use joinbridge_domain::device::DeviceState;
use joinbridge_domain::device::elevator::{
    Direction, ElevatorConfig, ElevatorPlan, ElevatorPosition, ElevatorPulse, ElevatorSignals,
    ElevatorState,
};
use joinbridge_domain::error::BridgeError;

use crate::capabilities::{Device, Elevator};
use crate::ports::Gateway;
use crate::signal::{SHORT_PULSE, Signals};

pub struct ElevatorDevice<G> {
    config: ElevatorConfig,
    signals: Signals<G>,
    last_command: Mutex<Option<Direction>>,
}

impl<G: Gateway> ElevatorDevice<G> {
    pub fn new(config: ElevatorConfig, gateway: Arc<G>) -> Self {
        Self {
            config,
            signals: Signals::new(gateway),
            last_command: Mutex::new(None),
        }
    }

    fn snapshot_signals(&self) -> ElevatorSignals {
        ElevatorSignals {
            up: self.signals.digital(self.config.up_join),
            down: self.signals.digital(self.config.down_join),
            engine: self.signals.digital(self.config.main_engine_join),
            top: self.signals.digital_role(self.config.top_join),
            bottom: self.signals.digital_role(self.config.bottom_join),
            obstructed: self.signals.digital_role(self.config.obstruction_join),
        }
    }

    fn remember(&self, command: Option<Direction>) {
        *self
            .last_command
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = command;
    }

    fn last_command(&self) -> Option<Direction> {
        *self
            .last_command
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn issue(&self, pulses: Vec<ElevatorPulse>) {
        for pulse in pulses {
            tracing::debug!(device = %self.config.name, ?pulse, "elevator pulse");
            self.signals
                .pulse(self.config.join_for(pulse), SHORT_PULSE)
                .await;
        }
    }

    async fn travel(&self, direction: Direction) -> Result<(), BridgeError> {
        match self.snapshot_signals().plan_travel(direction) {
            ElevatorPlan::Obstructed => {
                tracing::warn!(device = %self.config.name, ?direction, "elevator obstructed, command ignored");
            }
            ElevatorPlan::Pulses(pulses) => {
                tracing::info!(device = %self.config.name, ?direction, "move elevator");
                self.remember(Some(direction));
                self.issue(pulses).await;
            }
        }
        Ok(())
    }
}

impl<G: Gateway> Device for ElevatorDevice<G> {
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
        let signals = self.snapshot_signals();
        DeviceState::Elevator(ElevatorState {
            position: signals.position(),
            engine_running: signals.engine,
            obstructed: signals.obstructed,
            last_command: self.last_command(),
        })
    }
}

impl<G: Gateway> Elevator for ElevatorDevice<G> {
    fn position(&self) -> ElevatorPosition {
        self.snapshot_signals().position()
    }

    async fn move_up(&self) -> Result<(), BridgeError> {
        self.travel(Direction::Up).await
    }

    async fn move_down(&self) -> Result<(), BridgeError> {
        self.travel(Direction::Down).await
    }

    async fn stop(&self) -> Result<(), BridgeError> {
        tracing::info!(device = %self.config.name, "stop elevator");
        self.remember(None);
        let pulses = self.snapshot_signals().plan_stop();
        self.issue(pulses).await;
        Ok(())
    }
}
