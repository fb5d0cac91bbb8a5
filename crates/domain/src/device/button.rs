//! Button — a momentary action modelled as a pulse on a digital join.

use serde::Deserialize;

use crate::capability::{Capabilities, Capability};
use crate::join::DigitalJoin;

/// Join roles of a button.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ButtonConfig {
    pub name: String,
    pub join: DigitalJoin,
}

impl ButtonConfig {
    /// `button-<join>`.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("button-{}", self.join.number())
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::from([Capability::Press])
    }
}
