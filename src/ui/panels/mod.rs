// src/ui/panels/mod.rs
//
// In-tour panels: HUD, info panel, navigation menu, pause label, and the
// completion banner.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PanelsPlugin;
