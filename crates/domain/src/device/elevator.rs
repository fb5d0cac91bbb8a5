//! Elevator — bidirectional motion with set/reset direction latches, a
//! toggled main engine, and an obstruction gate.
//!
//! The controller keeps one latch per direction. Each latch is raised by a
//! pulse on its SET join and lowered by a pulse on its RESET join; the main
//! engine starts or stops on every pulse of its single join. Commands are
//! therefore planned from a snapshot of the current signals:
//!
//! | Command | Pulses, in order |
//! |---------|------------------|
//! | up      | up SET (unless latched), down RESET (if latched), engine (unless running) |
//! | down    | down SET (unless latched), up RESET (if latched), engine (unless running) |
//! | stop    | engine (if running), up RESET (if latched), down RESET (if latched) |
//!
//! Up and down plan nothing while the obstruction sensor is asserted.

use serde::{Deserialize, Serialize};

use crate::capability::{Capabilities, Capability};
use crate::join::DigitalJoin;

/// Join roles of an elevator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElevatorConfig {
    pub name: String,
    /// Up latch feedback.
    pub up_join: DigitalJoin,
    /// Down latch feedback.
    pub down_join: DigitalJoin,
    /// Engine running feedback; a pulse toggles the engine.
    pub main_engine_join: DigitalJoin,
    pub up_set_join: DigitalJoin,
    pub up_reset_join: DigitalJoin,
    pub down_set_join: DigitalJoin,
    pub down_reset_join: DigitalJoin,
    pub top_join: Option<DigitalJoin>,
    pub bottom_join: Option<DigitalJoin>,
    pub obstruction_join: Option<DigitalJoin>,
}

impl ElevatorConfig {
    /// `elevator-<up set join><down set join>`.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!(
            "elevator-{}{}",
            self.up_set_join.number(),
            self.down_set_join.number()
        )
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::from([Capability::Open, Capability::Close, Capability::Stop])
    }

    /// Join a planned pulse is issued on.
    #[must_use]
    pub fn join_for(&self, pulse: ElevatorPulse) -> DigitalJoin {
        match pulse {
            ElevatorPulse::UpSet => self.up_set_join,
            ElevatorPulse::UpReset => self.up_reset_join,
            ElevatorPulse::DownSet => self.down_set_join,
            ElevatorPulse::DownReset => self.down_reset_join,
            ElevatorPulse::MainEngine => self.main_engine_join,
        }
    }
}

/// Travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// Position derived from the current signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevatorPosition {
    MovingUp,
    MovingDown,
    AtTop,
    AtBottom,
    /// Stopped somewhere between the limits.
    Unknown,
}

/// One momentary edge on an elevator join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorPulse {
    UpSet,
    UpReset,
    DownSet,
    DownReset,
    MainEngine,
}

/// Outcome of planning a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElevatorPlan {
    /// The obstruction sensor is asserted; nothing may be written.
    Obstructed,
    /// Pulses to issue one after another.
    Pulses(Vec<ElevatorPulse>),
}

/// Snapshot of every elevator signal, read once per evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElevatorSignals {
    pub up: bool,
    pub down: bool,
    pub engine: bool,
    pub top: Option<bool>,
    pub bottom: Option<bool>,
    pub obstructed: Option<bool>,
}

impl ElevatorSignals {
    /// Moving requires a direction latch and the engine; up is checked first.
    /// At rest, the top sensor wins over the bottom one.
    #[must_use]
    pub fn position(self) -> ElevatorPosition {
        if self.up && self.engine {
            ElevatorPosition::MovingUp
        } else if self.down && self.engine {
            ElevatorPosition::MovingDown
        } else if self.top == Some(true) {
            ElevatorPosition::AtTop
        } else if self.bottom == Some(true) {
            ElevatorPosition::AtBottom
        } else {
            ElevatorPosition::Unknown
        }
    }

    fn is_obstructed(self) -> bool {
        self.obstructed == Some(true)
    }

    /// Pulses that engage travel in `direction`.
    #[must_use]
    pub fn plan_travel(self, direction: Direction) -> ElevatorPlan {
        if self.is_obstructed() {
            return ElevatorPlan::Obstructed;
        }
        let (latched, opposite_latched, set, opposite_reset) = match direction {
            Direction::Up => (
                self.up,
                self.down,
                ElevatorPulse::UpSet,
                ElevatorPulse::DownReset,
            ),
            Direction::Down => (
                self.down,
                self.up,
                ElevatorPulse::DownSet,
                ElevatorPulse::UpReset,
            ),
        };
        let mut pulses = Vec::with_capacity(3);
        if !latched {
            pulses.push(set);
        }
        if opposite_latched {
            pulses.push(opposite_reset);
        }
        if !self.engine {
            pulses.push(ElevatorPulse::MainEngine);
        }
        ElevatorPlan::Pulses(pulses)
    }

    /// Pulses that halt the engine and clear every raised latch.
    #[must_use]
    pub fn plan_stop(self) -> Vec<ElevatorPulse> {
        let mut pulses = Vec::with_capacity(3);
        if self.engine {
            pulses.push(ElevatorPulse::MainEngine);
        }
        if self.up {
            pulses.push(ElevatorPulse::UpReset);
        }
        if self.down {
            pulses.push(ElevatorPulse::DownReset);
        }
        pulses
    }
}

/// Derived elevator state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevatorState {
    pub position: ElevatorPosition,
    pub engine_running: bool,
    pub obstructed: Option<bool>,
    /// Direction of the last accepted travel command, cleared by stop.
    pub last_command: Option<Direction>,
}
