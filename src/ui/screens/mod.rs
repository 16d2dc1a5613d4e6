// src/ui/screens/mod.rs
//
// Full-screen welcome and outro pages around the tour.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::ScreensPlugin;
