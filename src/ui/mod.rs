// src/ui/mod.rs
//
// UI module providing the screen-space presentation layer.
//
// Current features:
// - Fade overlay and gaze reticle
// - HUD, info panel, navigation menu, pause label, completion banner
// - Welcome and outro screens
//
// Future features:
// - World-space panels for head-mounted displays

pub mod overlay;
pub mod panels;
pub mod plugin;
pub mod screens;

pub use plugin::UiPlugin;
