use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/audio.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawAudioConfig {
    #[serde(default)]
    volume: RawVolume,
    #[serde(default)]
    clips: RawClips,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawVolume {
    master: f32,
    music: f32,
    ambience: f32,
    sfx: f32,
    fade_seconds: f32,
}

impl Default for RawVolume {
    fn default() -> Self {
        Self {
            master: 1.0,
            music: 0.6,
            ambience: 0.4,
            sfx: 0.8,
            fade_seconds: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawClips {
    welcome_music: Option<String>,
    hover: Option<String>,
    select: Option<String>,
    transition: Option<String>,
}

/// Runtime configuration derived from `config/audio.toml`.
#[derive(Resource, Debug, Clone)]
pub struct AudioSettings {
    pub master_volume: f32,
    pub music_volume: f32,
    pub ambience_volume: f32,
    pub sfx_volume: f32,
    pub fade_seconds: f32,
    pub welcome_music: Option<String>,
    pub hover_clip: Option<String>,
    pub select_clip: Option<String>,
    pub transition_clip: Option<String>,
}

impl AudioSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<RawAudioConfig>(&raw) {
                Ok(parsed) => parsed.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawAudioConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawAudioConfig::default().into()
            }
        }
    }

    pub fn music_level(&self) -> f32 {
        self.music_volume * self.master_volume
    }

    pub fn ambience_level(&self) -> f32 {
        self.ambience_volume * self.master_volume
    }

    /// One-shot level; `scale` lets quieter cues (hover) share the sfx channel.
    pub fn sfx_level(&self, scale: f32) -> f32 {
        self.sfx_volume * self.master_volume * scale.clamp(0.0, 1.0)
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        RawAudioConfig::default().into()
    }
}

fn clip(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl From<RawAudioConfig> for AudioSettings {
    fn from(value: RawAudioConfig) -> Self {
        Self {
            master_volume: value.volume.master.clamp(0.0, 1.0),
            music_volume: value.volume.music.clamp(0.0, 1.0),
            ambience_volume: value.volume.ambience.clamp(0.0, 1.0),
            sfx_volume: value.volume.sfx.clamp(0.0, 1.0),
            fade_seconds: value.volume.fade_seconds.max(0.0),
            welcome_music: clip(value.clips.welcome_music),
            hover_clip: clip(value.clips.hover),
            select_clip: clip(value.clips.select),
            transition_clip: clip(value.clips.transition),
        }
    }
}
