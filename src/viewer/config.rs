use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/viewer.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawViewerConfig {
    eye_height: f32,
    mouse_sensitivity: f32,
    keyboard_sensitivity: f32,
    vertical_limit_degrees: f32,
}

impl Default for RawViewerConfig {
    fn default() -> Self {
        Self {
            eye_height: 1.6,
            mouse_sensitivity: 0.1,
            keyboard_sensitivity: 80.0,
            vertical_limit_degrees: 85.0,
        }
    }
}

/// Runtime configuration derived from `config/viewer.toml`.
#[derive(Resource, Debug, Clone)]
pub struct ViewerSettings {
    pub eye_height: f32,
    /// Degrees turned per pixel of mouse motion while a button is held.
    pub mouse_sensitivity: f32,
    /// Degrees per second turned by the arrow keys.
    pub keyboard_sensitivity: f32,
    pub vertical_limit_degrees: f32,
}

impl ViewerSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawViewerConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawViewerConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawViewerConfig::default().into()
            }
        }
    }
}

impl From<RawViewerConfig> for ViewerSettings {
    fn from(value: RawViewerConfig) -> Self {
        Self {
            eye_height: value.eye_height,
            mouse_sensitivity: value.mouse_sensitivity.max(0.0),
            keyboard_sensitivity: value.keyboard_sensitivity.max(0.0),
            vertical_limit_degrees: value.vertical_limit_degrees.clamp(0.0, 89.9),
        }
    }
}
