//! Climate translator — thermostat mode, action, fan and setpoints.

use std::sync::Arc;

use joinbridge_domain::capability::Capabilities;
use joinbridge_domain::device::DeviceState;
use joinbridge_domain::device::climate::{
    ClimateConfig, ClimateState, FanIndicators, FanMode, HvacAction, HvacMode, ModeIndicators,
    StageIndicators,
};
use joinbridge_domain::error::{BridgeError, InvalidArgumentError, MissingRoleError};
use joinbridge_domain::join::{AnalogJoin, DigitalJoin};

use crate::capabilities::{Climate, Device, TemperatureRequest};
use crate::ports::Gateway;
use crate::signal::Signals;

/// Thermostat backed by mode, stage, fan and setpoint joins.
pub struct ClimateDevice<G> {
    config: ClimateConfig,
    signals: Signals<G>,
}

impl<G: Gateway> ClimateDevice<G> {
    pub fn new(config: ClimateConfig, gateway: Arc<G>) -> Self {
        if config.hvac_modes().is_empty() {
            tracing::warn!(device = %config.name, "no mode joins configured, mode control disabled");
        }
        Self {
            config,
            signals: Signals::new(gateway),
        }
    }

    fn mode_indicators(&self) -> ModeIndicators {
        ModeIndicators {
            auto: self.signals.digital_role(self.config.mode_auto_join),
            heat: self.signals.digital_role(self.config.mode_heat_join),
            cool: self.signals.digital_role(self.config.mode_cool_join),
            off: self.signals.digital_role(self.config.mode_off_join),
        }
    }

    fn stage_indicators(&self) -> StageIndicators {
        StageIndicators {
            heat: [
                self.signals.digital_role(self.config.heat_stage_1_join),
                self.signals.digital_role(self.config.heat_stage_2_join),
            ],
            cool: [
                self.signals.digital_role(self.config.cool_stage_1_join),
                self.signals.digital_role(self.config.cool_stage_2_join),
            ],
            off: self.signals.digital_role(self.config.mode_off_join),
        }
    }

    fn scaled(&self, join: Option<AnalogJoin>) -> Option<f64> {
        self.signals
            .analog_role(join)
            .map(|raw| self.config.divisor.to_display(raw))
    }

    /// Setpoint join that a single target temperature applies to in `mode`.
    fn single_setpoint_join(&self, mode: HvacMode) -> Result<Option<AnalogJoin>, MissingRoleError> {
        let (join, role) = match mode {
            HvacMode::Heat => (self.config.heat_setpoint_join, "heat_setpoint"),
            HvacMode::Cool => (self.config.cool_setpoint_join, "cool_setpoint"),
            HvacMode::HeatCool | HvacMode::Off => return Ok(None),
        };
        join.map(Some).ok_or_else(|| self.missing(role))
    }

    fn missing(&self, role: &'static str) -> MissingRoleError {
        MissingRoleError {
            device: self.config.name.clone(),
            role,
        }
    }

    async fn write_levels(&self, writes: Vec<(DigitalJoin, bool)>) {
        for (join, value) in writes {
            self.signals.set_level(join, value, self.config.pulsed).await;
        }
    }
}

impl<G: Gateway> Device for ClimateDevice<G> {
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
        let hvac_mode = self.hvac_mode();
        let target_temperature = match hvac_mode {
            HvacMode::Heat => self.scaled(self.config.heat_setpoint_join),
            HvacMode::Cool => self.scaled(self.config.cool_setpoint_join),
            HvacMode::HeatCool | HvacMode::Off => None,
        };
        DeviceState::Climate(ClimateState {
            hvac_mode,
            hvac_action: self.hvac_action(),
            hvac_modes: self.config.hvac_modes(),
            fan_mode: self.fan_mode(),
            fan_modes: self.config.fan_modes(),
            fan_running: self.signals.digital_role(self.config.fan_active_join),
            current_temperature: self.scaled(self.config.current_temperature_join),
            target_temperature,
            target_temperature_low: self.scaled(self.config.heat_setpoint_join),
            target_temperature_high: self.scaled(self.config.cool_setpoint_join),
        })
    }
}

impl<G: Gateway> Climate for ClimateDevice<G> {
    fn hvac_mode(&self) -> HvacMode {
        self.mode_indicators().resolve()
    }

    fn hvac_action(&self) -> HvacAction {
        self.stage_indicators().resolve()
    }

    fn fan_mode(&self) -> Option<FanMode> {
        FanIndicators {
            auto: self.signals.digital_role(self.config.fan_auto_join),
            on: self.signals.digital_role(self.config.fan_on_join),
        }
        .resolve()
    }

    async fn set_hvac_mode(&self, mode: HvacMode) -> Result<(), BridgeError> {
        if !self.config.hvac_modes().contains(&mode) {
            return Err(InvalidArgumentError::UnsupportedMode(format!("{mode:?}")).into());
        }
        tracing::info!(device = %self.config.name, ?mode, "set hvac mode");
        self.write_levels(self.config.mode_writes(mode)).await;
        Ok(())
    }

    async fn set_fan_mode(&self, mode: FanMode) -> Result<(), BridgeError> {
        if !self.config.fan_modes().contains(&mode) {
            return Err(InvalidArgumentError::UnsupportedMode(format!("{mode:?}")).into());
        }
        tracing::info!(device = %self.config.name, ?mode, "set fan mode");
        self.write_levels(self.config.fan_writes(mode)).await;
        Ok(())
    }

    async fn set_temperature(&self, request: TemperatureRequest) -> Result<(), BridgeError> {
        let divisor = self.config.divisor;
        let mut writes = Vec::with_capacity(3);

        if let Some(target) = request.target {
            let raw = divisor.to_raw("temperature", target)?;
            if let Some(join) = self.single_setpoint_join(self.hvac_mode())? {
                writes.push((join, raw));
            }
        }

        match (request.low, request.high) {
            (Some(low), Some(high)) => {
                let low = divisor.to_raw("target_temp_low", low)?;
                let high = divisor.to_raw("target_temp_high", high)?;
                if let Some(join) = self.config.cool_setpoint_join {
                    writes.push((join, high));
                }
                if let Some(join) = self.config.heat_setpoint_join {
                    writes.push((join, low));
                }
            }
            (Some(_), None) => return Err(InvalidArgumentError::Missing("target_temp_high").into()),
            (None, Some(_)) => return Err(InvalidArgumentError::Missing("target_temp_low").into()),
            (None, None) if request.target.is_none() => {
                return Err(InvalidArgumentError::Missing("temperature").into());
            }
            (None, None) => {}
        }

        for (join, raw) in writes {
            self.signals.set_analog(join, raw);
        }
        Ok(())
    }

    async fn turn_on(&self) -> Result<(), BridgeError> {
        let modes = self.config.hvac_modes();
        let mode = [HvacMode::HeatCool, HvacMode::Heat, HvacMode::Cool]
            .into_iter()
            .find(|mode| modes.contains(mode))
            .ok_or_else(|| self.missing("mode_heat"))?;
        self.set_hvac_mode(mode).await
    }

    async fn turn_off(&self) -> Result<(), BridgeError> {
        if self.config.mode_off_join.is_none() {
            return Err(self.missing("mode_off").into());
        }
        self.set_hvac_mode(HvacMode::Off).await
    }
}
