//! Audio module: location ambience, welcome music, and interaction cues.
pub mod config;
pub mod crossfade;
pub mod plugin;
pub mod systems;

pub use config::AudioSettings;
pub use plugin::TourAudioPlugin;
