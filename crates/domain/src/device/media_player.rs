//! Media player — a room audio zone with power, mute, volume and sources.

use serde::{Deserialize, Serialize};

use crate::capability::{Capabilities, Capability};
use crate::join::{AnalogJoin, DigitalJoin};

/// One selectable input: the numeric code written to the source join and
/// the name shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    pub code: u16,
    pub name: String,
}

/// Join roles of a media player.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaPlayerConfig {
    pub name: String,
    pub mute_join: DigitalJoin,
    pub source_join: AnalogJoin,
    pub volume_join: AnalogJoin,
    pub volume_up_join: DigitalJoin,
    pub volume_down_join: DigitalJoin,
    /// Power feedback, and pulsed to power off.
    pub off_join: DigitalJoin,
    pub on_join: DigitalJoin,
    /// Power on is a pulse on `on_join` rather than a level.
    #[serde(default)]
    pub pulsed_power_on: bool,
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl MediaPlayerConfig {
    /// `media-player-<source join>`.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("media-player-{}", self.source_join.number())
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::from([
            Capability::TurnOn,
            Capability::TurnOff,
            Capability::VolumeMute,
            Capability::VolumeSet,
            Capability::VolumeStep,
        ]);
        if !self.sources.is_empty() {
            caps.insert(Capability::SelectSource);
        }
        caps
    }

    /// Code of the first source named `name`.
    #[must_use]
    pub fn source_code(&self, name: &str) -> Option<u16> {
        self.sources
            .iter()
            .find(|source| source.name == name)
            .map(|source| source.code)
    }

    /// Name of the source with `code`; code 0 means no source.
    #[must_use]
    pub fn source_name(&self, code: u16) -> Option<&str> {
        if code == 0 {
            return None;
        }
        self.sources
            .iter()
            .find(|source| source.code == code)
            .map(|source| source.name.as_str())
    }

    /// Source names in configuration order.
    #[must_use]
    pub fn source_list(&self) -> Vec<String> {
        self.sources.iter().map(|source| source.name.clone()).collect()
    }
}

/// Derived media player state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaPlayerState {
    pub on: bool,
    pub muted: bool,
    /// 0.0–1.0.
    pub volume: f64,
    pub source: Option<String>,
    pub source_list: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MediaPlayerConfig {
        toml::from_str(
            "
            name = 'Lounge'
            mute_join = 1
            source_join = 2
            volume_join = 3
            volume_up_join = 4
            volume_down_join = 5
            off_join = 6
            on_join = 7
            sources = [
                { code = 1, name = 'TV' },
                { code = 2, name = 'Radio' },
            ]
            ",
        )
        .unwrap()
    }

    #[test]
    fn should_find_source_code_by_name() {
        assert_eq!(config().source_code("Radio"), Some(2));
        assert_eq!(config().source_code("Vinyl"), None);
    }

    #[test]
    fn should_treat_code_zero_as_no_source() {
        assert_eq!(config().source_name(0), None);
        assert_eq!(config().source_name(1), Some("TV"));
        assert_eq!(config().source_name(9), None);
    }

    #[test]
    fn should_list_sources_in_order() {
        assert_eq!(config().source_list(), vec!["TV", "Radio"]);
    }

    #[test]
    fn should_offer_source_selection_only_with_sources() {
        let mut cfg = config();
        assert!(cfg.capabilities().contains(&Capability::SelectSource));
        cfg.sources.clear();
        assert!(!cfg.capabilities().contains(&Capability::SelectSource));
    }

    #[test]
    fn should_build_unique_id_from_source_join() {
        assert_eq!(config().unique_id(), "media-player-2");
        assert!(!config().pulsed_power_on);
    }
}
