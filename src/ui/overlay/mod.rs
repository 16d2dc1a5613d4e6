// src/ui/overlay/mod.rs
//
// Screen-space fade overlay and gaze reticle.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::OverlayPlugin;
