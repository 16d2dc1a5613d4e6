//! Viewer module housing the camera and desktop look controls.
pub mod components;
pub mod config;
pub mod plugin;
pub mod systems;

pub use components::ViewerCamera;
pub use plugin::ViewerPlugin;
