//! Climate — HVAC mode, action and setpoints from thermostat joins.

use serde::{Deserialize, Serialize};

use crate::capability::{Capabilities, Capability};
use crate::join::{AnalogJoin, DigitalJoin};
use crate::scaling::Divisor;

/// Operating mode requested of the equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    HeatCool,
    Heat,
    Cool,
    Off,
}

/// What the equipment is physically doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacAction {
    Heating,
    Cooling,
    Off,
    Idle,
}

/// Fan operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanMode {
    Auto,
    On,
}

/// Join roles of a thermostat. Every role is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClimateConfig {
    pub name: String,
    /// Mode and fan joins are pulsed instead of held at a level.
    #[serde(default)]
    pub pulsed: bool,
    #[serde(default)]
    pub divisor: Divisor,
    pub heat_setpoint_join: Option<AnalogJoin>,
    pub cool_setpoint_join: Option<AnalogJoin>,
    pub current_temperature_join: Option<AnalogJoin>,
    pub mode_heat_join: Option<DigitalJoin>,
    pub mode_cool_join: Option<DigitalJoin>,
    pub mode_auto_join: Option<DigitalJoin>,
    pub mode_off_join: Option<DigitalJoin>,
    pub fan_on_join: Option<DigitalJoin>,
    pub fan_auto_join: Option<DigitalJoin>,
    pub heat_stage_1_join: Option<DigitalJoin>,
    pub heat_stage_2_join: Option<DigitalJoin>,
    pub cool_stage_1_join: Option<DigitalJoin>,
    pub cool_stage_2_join: Option<DigitalJoin>,
    pub fan_active_join: Option<DigitalJoin>,
}

impl ClimateConfig {
    /// `climate-<name>`.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("climate-{}", self.name)
    }

    /// Modes with a configured command join, in display order.
    #[must_use]
    pub fn hvac_modes(&self) -> Vec<HvacMode> {
        [
            (self.mode_heat_join, HvacMode::Heat),
            (self.mode_cool_join, HvacMode::Cool),
            (self.mode_auto_join, HvacMode::HeatCool),
            (self.mode_off_join, HvacMode::Off),
        ]
        .into_iter()
        .filter_map(|(join, mode)| join.map(|_| mode))
        .collect()
    }

    /// Fan modes with a configured command join.
    #[must_use]
    pub fn fan_modes(&self) -> Vec<FanMode> {
        [
            (self.fan_on_join, FanMode::On),
            (self.fan_auto_join, FanMode::Auto),
        ]
        .into_iter()
        .filter_map(|(join, mode)| join.map(|_| mode))
        .collect()
    }

    /// Union of the capabilities enabled by the configured joins.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::from([Capability::TurnOn, Capability::TurnOff]);
        if self.fan_on_join.is_some() || self.fan_auto_join.is_some() {
            caps.insert(Capability::FanMode);
        }
        if self.mode_heat_join.is_some() || self.mode_cool_join.is_some() {
            caps.insert(Capability::TargetTemperature);
        }
        if self.mode_auto_join.is_some() {
            caps.insert(Capability::TargetTemperatureRange);
        }
        caps
    }

    /// Writes that select `target`, in the order they must be issued.
    ///
    /// Every configured mode join is written: `true` for the target's join,
    /// `false` for the others, ordered auto, cool, off, heat.
    #[must_use]
    pub fn mode_writes(&self, target: HvacMode) -> Vec<(DigitalJoin, bool)> {
        [
            (self.mode_auto_join, HvacMode::HeatCool),
            (self.mode_cool_join, HvacMode::Cool),
            (self.mode_off_join, HvacMode::Off),
            (self.mode_heat_join, HvacMode::Heat),
        ]
        .into_iter()
        .filter_map(|(join, mode)| join.map(|join| (join, mode == target)))
        .collect()
    }

    /// Writes that select fan mode `target`, ordered on, auto.
    #[must_use]
    pub fn fan_writes(&self, target: FanMode) -> Vec<(DigitalJoin, bool)> {
        [
            (self.fan_on_join, FanMode::On),
            (self.fan_auto_join, FanMode::Auto),
        ]
        .into_iter()
        .filter_map(|(join, mode)| join.map(|join| (join, mode == target)))
        .collect()
    }
}

/// Observed values of the four mode indicators. `None` marks an
/// unconfigured indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeIndicators {
    pub auto: Option<bool>,
    pub heat: Option<bool>,
    pub cool: Option<bool>,
    pub off: Option<bool>,
}

impl ModeIndicators {
    /// First asserted indicator in priority order auto, heat, cool, off.
    /// Nothing asserted resolves to [`HvacMode::Off`].
    #[must_use]
    pub fn resolve(self) -> HvacMode {
        [
            (self.auto, HvacMode::HeatCool),
            (self.heat, HvacMode::Heat),
            (self.cool, HvacMode::Cool),
            (self.off, HvacMode::Off),
        ]
        .into_iter()
        .find_map(|(asserted, mode)| (asserted == Some(true)).then_some(mode))
        .unwrap_or(HvacMode::Off)
    }
}

/// Observed values of the stage and off joins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageIndicators {
    pub heat: [Option<bool>; 2],
    pub cool: [Option<bool>; 2],
    pub off: Option<bool>,
}

impl StageIndicators {
    /// Heating beats cooling beats off; nothing asserted is idle.
    ///
    /// A running stage wins over an asserted off indicator, which can lag
    /// behind the equipment.
    #[must_use]
    pub fn resolve(self) -> HvacAction {
        let any = |joins: [Option<bool>; 2]| joins.contains(&Some(true));
        if any(self.heat) {
            HvacAction::Heating
        } else if any(self.cool) {
            HvacAction::Cooling
        } else if self.off == Some(true) {
            HvacAction::Off
        } else {
            HvacAction::Idle
        }
    }
}

/// Observed values of the fan mode joins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanIndicators {
    pub auto: Option<bool>,
    pub on: Option<bool>,
}

impl FanIndicators {
    /// Auto beats on; nothing asserted is no fan mode.
    #[must_use]
    pub fn resolve(self) -> Option<FanMode> {
        if self.auto == Some(true) {
            Some(FanMode::Auto)
        } else if self.on == Some(true) {
            Some(FanMode::On)
        } else {
            None
        }
    }
}

/// Derived thermostat state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateState {
    pub hvac_mode: HvacMode,
    pub hvac_action: HvacAction,
    pub hvac_modes: Vec<HvacMode>,
    pub fan_mode: Option<FanMode>,
    pub fan_modes: Vec<FanMode>,
    pub fan_running: Option<bool>,
    pub current_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
    pub target_temperature_low: Option<f64>,
    pub target_temperature_high: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> ClimateConfig {
        ClimateConfig {
            name: "Hall".to_string(),
            pulsed: false,
            divisor: Divisor::default(),
            heat_setpoint_join: Some(AnalogJoin::new(1)),
            cool_setpoint_join: Some(AnalogJoin::new(2)),
            current_temperature_join: Some(AnalogJoin::new(3)),
            mode_heat_join: Some(DigitalJoin::new(10)),
            mode_cool_join: Some(DigitalJoin::new(11)),
            mode_auto_join: Some(DigitalJoin::new(12)),
            mode_off_join: Some(DigitalJoin::new(13)),
            fan_on_join: Some(DigitalJoin::new(14)),
            fan_auto_join: Some(DigitalJoin::new(15)),
            heat_stage_1_join: Some(DigitalJoin::new(16)),
            heat_stage_2_join: Some(DigitalJoin::new(17)),
            cool_stage_1_join: Some(DigitalJoin::new(18)),
            cool_stage_2_join: Some(DigitalJoin::new(19)),
            fan_active_join: None,
        }
    }

    fn bare_config() -> ClimateConfig {
        toml::from_str("name = 'Bare'").unwrap()
    }

    #[test]
    fn should_let_auto_win_over_heat() {
        let indicators = ModeIndicators {
            auto: Some(true),
            heat: Some(true),
            ..ModeIndicators::default()
        };
        assert_eq!(indicators.resolve(), HvacMode::HeatCool);
    }

    #[test]
    fn should_let_heat_win_over_cool_and_off() {
        let indicators = ModeIndicators {
            auto: Some(false),
            heat: Some(true),
            cool: Some(true),
            off: Some(true),
        };
        assert_eq!(indicators.resolve(), HvacMode::Heat);
    }

    #[test]
    fn should_default_to_off_when_nothing_asserted() {
        assert_eq!(ModeIndicators::default().resolve(), HvacMode::Off);
    }

    #[test]
    fn should_report_heating_even_when_off_indicator_asserted() {
        let stages = StageIndicators {
            heat: [None, Some(true)],
            off: Some(true),
            ..StageIndicators::default()
        };
        assert_eq!(stages.resolve(), HvacAction::Heating);
    }

    #[test]
    fn should_prefer_heating_over_cooling() {
        let stages = StageIndicators {
            heat: [Some(true), None],
            cool: [Some(true), None],
            off: None,
        };
        assert_eq!(stages.resolve(), HvacAction::Heating);
    }

    #[test]
    fn should_report_off_then_idle() {
        let off = StageIndicators {
            off: Some(true),
            ..StageIndicators::default()
        };
        assert_eq!(off.resolve(), HvacAction::Off);
        assert_eq!(StageIndicators::default().resolve(), HvacAction::Idle);
    }

    #[test]
    fn should_write_every_mode_join_in_fixed_order() {
        let writes = full_config().mode_writes(HvacMode::Heat);
        assert_eq!(
            writes,
            vec![
                (DigitalJoin::new(12), false),
                (DigitalJoin::new(11), false),
                (DigitalJoin::new(13), false),
                (DigitalJoin::new(10), true),
            ]
        );
    }

    #[test]
    fn should_skip_unconfigured_mode_joins() {
        let mut config = full_config();
        config.mode_auto_join = None;
        config.mode_off_join = None;
        let writes = config.mode_writes(HvacMode::Cool);
        assert_eq!(
            writes,
            vec![(DigitalJoin::new(11), true), (DigitalJoin::new(10), false)]
        );
    }

    #[test]
    fn should_write_fan_joins_on_then_auto() {
        let writes = full_config().fan_writes(FanMode::Auto);
        assert_eq!(
            writes,
            vec![(DigitalJoin::new(14), false), (DigitalJoin::new(15), true)]
        );
    }

    #[test]
    fn should_union_capabilities_without_duplicates() {
        let caps = full_config().capabilities();
        assert_eq!(
            caps.into_iter().collect::<Vec<_>>(),
            vec![
                Capability::TurnOn,
                Capability::TurnOff,
                Capability::TargetTemperature,
                Capability::TargetTemperatureRange,
                Capability::FanMode,
            ]
        );
    }

    #[test]
    fn should_expose_only_power_capabilities_when_nothing_configured() {
        let caps = bare_config().capabilities();
        assert_eq!(caps.len(), 2);
        assert!(bare_config().hvac_modes().is_empty());
        assert!(bare_config().fan_modes().is_empty());
    }

    #[test]
    fn should_list_configured_modes() {
        assert_eq!(
            full_config().hvac_modes(),
            vec![HvacMode::Heat, HvacMode::Cool, HvacMode::HeatCool, HvacMode::Off]
        );
    }

    #[test]
    fn should_resolve_fan_auto_before_on() {
        let fans = FanIndicators {
            auto: Some(true),
            on: Some(true),
        };
        assert_eq!(fans.resolve(), Some(FanMode::Auto));
        assert_eq!(FanIndicators::default().resolve(), None);
    }

    #[test]
    fn should_parse_divisor_from_toml() {
        let config: ClimateConfig = toml::from_str("name = 'x'\ndivisor = 10").unwrap();
        assert_eq!(u16::from(config.divisor), 10);
        assert!(!config.pulsed);
    }
}
