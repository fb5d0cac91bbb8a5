//! Cover — shades and curtains driven by analog position or digital pulses.

use serde::{Deserialize, Serialize};

use crate::capability::{Capabilities, Capability};
use crate::join::{AnalogJoin, DigitalJoin};

/// Hardware variant of a cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverKind {
    /// Position is a direct analog join.
    AnalogShade,
    /// Motion is reported and commanded through digital joins.
    DigitalShade,
    /// Same signalling as [`DigitalShade`](Self::DigitalShade), shown as a curtain.
    DigitalCurtain,
}

/// Presentation class of a cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverClass {
    Shade,
    Curtain,
}

/// Join roles of a cover.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoverConfig {
    pub name: String,
    pub kind: CoverKind,
    pub is_opening_join: DigitalJoin,
    pub is_closing_join: DigitalJoin,
    pub stop_join: DigitalJoin,
    pub is_moving_join: Option<DigitalJoin>,
    pub is_closed_join: Option<DigitalJoin>,
    pub position_join: Option<AnalogJoin>,
    pub open_full_join: Option<DigitalJoin>,
    pub close_full_join: Option<DigitalJoin>,
}

impl CoverConfig {
    /// `cover-<opening join><closing join>`.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!(
            "cover-{}{}",
            self.is_opening_join.number(),
            self.is_closing_join.number()
        )
    }

    /// Whether motion is commanded with digital pulses.
    #[must_use]
    pub fn is_digital(&self) -> bool {
        !matches!(self.kind, CoverKind::AnalogShade)
    }

    #[must_use]
    pub fn class(&self) -> CoverClass {
        match self.kind {
            CoverKind::DigitalCurtain => CoverClass::Curtain,
            CoverKind::AnalogShade | CoverKind::DigitalShade => CoverClass::Shade,
        }
    }

    /// Capabilities backed by the configured joins.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::from([Capability::Stop]);
        if self.is_digital() {
            if self.open_full_join.is_some() {
                caps.insert(Capability::Open);
            }
            if self.close_full_join.is_some() {
                caps.insert(Capability::Close);
            }
        } else if self.position_join.is_some() {
            caps.extend([Capability::Open, Capability::Close, Capability::SetPosition]);
        }
        caps
    }
}

/// Direction flags after the tie-break: opening wins when both indicators
/// are asserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Motion {
    pub opening: bool,
    pub closing: bool,
}

impl Motion {
    #[must_use]
    pub fn resolve(opening: bool, closing: bool) -> Self {
        Self {
            opening,
            closing: closing && !opening,
        }
    }
}

/// Observed joins of a digital cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitalCoverSignals {
    pub opening: bool,
    pub closing: bool,
    /// `None` when no moving join is configured.
    pub moving: Option<bool>,
}

impl DigitalCoverSignals {
    /// Opening/closing need the indicator *and* motion; without a moving join
    /// neither can be derived.
    #[must_use]
    pub fn motion(self) -> Motion {
        let moving = self.moving == Some(true);
        Motion::resolve(self.opening && moving, self.closing && moving)
    }

    /// Closed means the last direction was closing and motion has ended.
    ///
    /// Unknown (`None`) after a manual stop, or when there is no moving join.
    #[must_use]
    pub fn closed(self, manual_stop: bool) -> Option<bool> {
        if manual_stop {
            return None;
        }
        self.moving.map(|moving| self.closing && !moving)
    }
}

/// Derived cover state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverState {
    pub class: CoverClass,
    pub opening: bool,
    pub closing: bool,
    /// `None` when closed-ness cannot be known.
    pub closed: Option<bool>,
    /// Percent open; only analog covers report a position.
    pub position: Option<f64>,
}
