//! Configuration profiles
//!
//! A Configuration is a saved profile describing one tuner setup: which
//! platform feature gates the radio, where to tune on start, and the station
//! list used by the mock tuner.

use serde::{Deserialize, Serialize};

/// Platform feature that must be present for any radio operation
pub const DEFAULT_FEATURE_ID: &str = "http://tizen.org/feature/fmradio";

/// Frequency the demo driver tunes to first (kHz)
pub const DEFAULT_FREQUENCY_KHZ: u32 = 107_700;

fn default_feature_id() -> String {
    DEFAULT_FEATURE_ID.to_string()
}

fn default_stations_khz() -> Vec<u32> {
    vec![89_100, 91_900, 96_500, 101_300, 107_700]
}

/// A saved configuration profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Profile name (e.g., "Default", "Car")
    pub name: String,
    /// Capability checked before every operation
    #[serde(default = "default_feature_id")]
    pub feature_id: String,
    /// Frequency tuned on start, in kHz
    pub initial_frequency_khz: u32,
    /// Stations the mock tuner reports, in kHz
    #[serde(default = "default_stations_khz")]
    pub stations_khz: Vec<u32>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            feature_id: default_feature_id(),
            initial_frequency_khz: DEFAULT_FREQUENCY_KHZ,
            stations_khz: default_stations_khz(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_has_sensible_values() {
        let config = Configuration::default();
        assert_eq!(config.name, "Default");
        assert_eq!(config.feature_id, DEFAULT_FEATURE_ID);
        assert_eq!(config.initial_frequency_khz, 107_700);
        assert!(!config.stations_khz.is_empty());
    }

    #[test]
    fn configuration_serializes_to_json() {
        let config = Configuration::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"name\":\"Default\""));
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let json = r#"{"name":"Car","initial_frequency_khz":96500}"#;
        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.feature_id, DEFAULT_FEATURE_ID);
        assert_eq!(config.stations_khz, default_stations_khz());
    }
}
