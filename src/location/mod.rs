//! Location module: authored tour data and its registry.
pub mod data;
pub mod errors;
pub mod plugin;

pub use data::{InfoHotspotData, Location, LocationRegistry, NavHotspotData};
pub use plugin::LocationPlugin;
