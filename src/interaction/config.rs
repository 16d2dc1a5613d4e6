use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::gaze::ReticlePalette;

const CONFIG_PATH: &str = "config/interaction.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInteractionConfig {
    #[serde(default)]
    gaze: RawGaze,
    #[serde(default)]
    reticle: RawReticle,
    #[serde(default)]
    hotspots: RawHotspots,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawGaze {
    distance: f32,
    dwell_seconds: f32,
}

impl Default for RawGaze {
    fn default() -> Self {
        Self {
            distance: 100.0,
            dwell_seconds: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawReticle {
    fill_decay_rate: f32,
    colour_lerp_rate: f32,
    normal_colour: [f32; 3],
    hover_colour: [f32; 3],
    active_colour: [f32; 3],
}

impl Default for RawReticle {
    fn default() -> Self {
        Self {
            fill_decay_rate: 5.0,
            colour_lerp_rate: 10.0,
            normal_colour: [1.0, 1.0, 1.0],
            hover_colour: [0.0, 1.0, 1.0],
            active_colour: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHotspots {
    collider_radius: f32,
    hover_scale: f32,
    animation_speed: f32,
    pulse_speed: f32,
    pulse_amount: f32,
    info_colour: [f32; 3],
    info_hover_colour: [f32; 3],
    nav_colour: [f32; 3],
    nav_hover_colour: [f32; 3],
}

impl Default for RawHotspots {
    fn default() -> Self {
        Self {
            collider_radius: 0.35,
            hover_scale: 1.2,
            animation_speed: 5.0,
            pulse_speed: 2.0,
            pulse_amount: 0.1,
            info_colour: [1.0, 1.0, 1.0],
            info_hover_colour: [0.0, 1.0, 1.0],
            nav_colour: [0.2, 0.8, 1.0],
            nav_hover_colour: [0.0, 1.0, 0.0],
        }
    }
}

/// Runtime configuration derived from `config/interaction.toml`.
#[derive(Resource, Debug, Clone)]
pub struct InteractionSettings {
    pub gaze_distance: f32,
    pub dwell_seconds: f32,
    pub fill_decay_rate: f32,
    pub colour_lerp_rate: f32,
    pub reticle: ReticlePalette,
    pub hotspots: HotspotStyle,
}

#[derive(Debug, Clone)]
pub struct HotspotStyle {
    pub collider_radius: f32,
    pub hover_scale: f32,
    pub animation_speed: f32,
    pub pulse_speed: f32,
    pub pulse_amount: f32,
    pub info_colour: Vec3,
    pub info_hover_colour: Vec3,
    pub nav_colour: Vec3,
    pub nav_hover_colour: Vec3,
}

impl InteractionSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<RawInteractionConfig>(&raw) {
                Ok(parsed) => parsed.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawInteractionConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInteractionConfig::default().into()
            }
        }
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        RawInteractionConfig::default().into()
    }
}

fn colour(raw: [f32; 3]) -> Vec3 {
    Vec3::from_array(raw).clamp(Vec3::ZERO, Vec3::ONE)
}

impl From<RawInteractionConfig> for InteractionSettings {
    fn from(value: RawInteractionConfig) -> Self {
        let hotspots = HotspotStyle {
            collider_radius: value.hotspots.collider_radius.max(0.01),
            hover_scale: value.hotspots.hover_scale.max(0.1),
            animation_speed: value.hotspots.animation_speed.max(0.0),
            pulse_speed: value.hotspots.pulse_speed.max(0.0),
            pulse_amount: value.hotspots.pulse_amount.clamp(0.0, 0.9),
            info_colour: colour(value.hotspots.info_colour),
            info_hover_colour: colour(value.hotspots.info_hover_colour),
            nav_colour: colour(value.hotspots.nav_colour),
            nav_hover_colour: colour(value.hotspots.nav_hover_colour),
        };

        Self {
            gaze_distance: value.gaze.distance.max(0.1),
            dwell_seconds: value.gaze.dwell_seconds.max(0.05),
            fill_decay_rate: value.reticle.fill_decay_rate.max(0.0),
            colour_lerp_rate: value.reticle.colour_lerp_rate.max(0.0),
            reticle: ReticlePalette {
                normal: colour(value.reticle.normal_colour),
                hover: colour(value.reticle.hover_colour),
                active: colour(value.reticle.active_colour),
            },
            hotspots,
        }
    }
}
