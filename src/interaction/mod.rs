//! Interaction module: hotspot entities and the gaze dwell loop.
pub mod components;
pub mod config;
pub mod events;
pub mod gaze;
pub mod plugin;
pub mod systems;

pub use components::{
    GazeCursor, HotspotAction, HotspotCollider, HotspotVisual, Interactable, TourHotspot,
};
pub use config::InteractionSettings;
pub use events::{GazeHoverEvent, HotspotActivatedEvent, ShowInfoPanelEvent};
pub use plugin::{GazeSet, InteractionPlugin};
