use std::{fs, path::Path, path::PathBuf};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/tour.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawTourConfig {
    #[serde(default)]
    tour: RawTourSection,
    #[serde(default)]
    transition: RawTransitionSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTourSection {
    starting_index: usize,
    registry_path: String,
    debug: bool,
}

impl Default for RawTourSection {
    fn default() -> Self {
        Self {
            starting_index: 0,
            registry_path: "assets/tour/locations.toml".to_string(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTransitionSection {
    fade_seconds: f32,
    eye_level_height: f32,
}

impl Default for RawTransitionSection {
    fn default() -> Self {
        Self {
            fade_seconds: 1.5,
            eye_level_height: 1.5,
        }
    }
}

/// Runtime configuration derived from `config/tour.toml`.
#[derive(Resource, Debug, Clone)]
pub struct TourSettings {
    pub starting_index: usize,
    pub registry_path: PathBuf,
    /// Logs the full tour state after every navigation.
    pub debug: bool,
    pub fade_seconds: f32,
    /// Height substituted for hotspots authored at exactly y = 0.
    pub eye_level_height: f32,
}

impl TourSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<RawTourConfig>(&raw) {
                Ok(parsed) => parsed.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawTourConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawTourConfig::default().into()
            }
        }
    }
}

impl Default for TourSettings {
    fn default() -> Self {
        RawTourConfig::default().into()
    }
}

impl From<RawTourConfig> for TourSettings {
    fn from(value: RawTourConfig) -> Self {
        let registry_path = if value.tour.registry_path.trim().is_empty() {
            RawTourSection::default().registry_path
        } else {
            value.tour.registry_path.trim().to_string()
        };

        Self {
            starting_index: value.tour.starting_index,
            registry_path: PathBuf::from(registry_path),
            debug: value.tour.debug,
            fade_seconds: value.transition.fade_seconds.max(0.0),
            eye_level_height: value.transition.eye_level_height,
        }
    }
}
